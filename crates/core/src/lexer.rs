use std::str::FromStr;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Whole number literal
    Int(i64),
    /// Number with a fractional part
    Decimal(Decimal),
    /// Numeric literal too large for `i64` (whole) or `Decimal` (fractional)
    Overflow(String),
    /// Run of letters, lower-cased. Units and keywords are distinguished in the parser.
    Word(String),
    /// `x` or U+00D7 between sets and reps
    X,
    At,
    Plus,
    Hyphen,
    Comma,
    Slash,
    Percent,
    /// Any other non-whitespace character
    Other(char),
    Eof,
}

/// A token plus its byte range in the lexed string.
#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

/// Split a normalized set line into lexical classes.
///
/// Never fails: characters the grammar has no use for become
/// [`Token::Other`] so free-text circuit names still lex.
pub fn lex(src: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(src.len(), |&(b, _)| b);
    let mut pos = 0usize;

    while pos < chars.len() {
        let (start, c) = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // Number
        if c.is_ascii_digit() {
            while pos < chars.len() && chars[pos].1.is_ascii_digit() {
                pos += 1;
            }
            if pos + 1 < chars.len() && chars[pos].1 == '.' && chars[pos + 1].1.is_ascii_digit() {
                pos += 1; // consume '.'
                while pos < chars.len() && chars[pos].1.is_ascii_digit() {
                    pos += 1;
                }
            }
            let end = byte_at(pos);
            let text = &src[start..end];
            let parsed = if text.contains('.') {
                Decimal::from_str(text).ok().map(Token::Decimal)
            } else {
                text.parse::<i64>().ok().map(Token::Int)
            };
            let token = parsed.unwrap_or_else(|| Token::Overflow(text.to_owned()));
            tokens.push(Spanned { token, start, end });
            continue;
        }

        // Word
        if c.is_alphabetic() {
            while pos < chars.len() && (chars[pos].1.is_alphabetic() || chars[pos].1 == '\'') {
                pos += 1;
            }
            let end = byte_at(pos);
            let word = src[start..end].to_lowercase();
            let token = if word == "x" {
                Token::X
            } else {
                Token::Word(word)
            };
            tokens.push(Spanned { token, start, end });
            continue;
        }

        let token = match c {
            '\u{00D7}' => Token::X,
            '@' => Token::At,
            '+' => Token::Plus,
            '-' => Token::Hyphen,
            ',' => Token::Comma,
            '/' => Token::Slash,
            '%' => Token::Percent,
            other => Token::Other(other),
        };
        pos += 1;
        tokens.push(Spanned {
            token,
            start,
            end: byte_at(pos),
        });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        start: src.len(),
        end: src.len(),
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        lex(src).into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn tight_notation_splits_into_classes() {
        assert_eq!(
            kinds("4x3@50KG"),
            vec![
                Token::Int(4),
                Token::X,
                Token::Int(3),
                Token::At,
                Token::Int(50),
                Token::Word("kg".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn decimal_and_percent() {
        assert_eq!(
            kinds("@72.5%"),
            vec![
                Token::At,
                Token::Decimal(Decimal::new(725, 1)),
                Token::Percent,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_not_a_fraction() {
        assert_eq!(
            kinds("50."),
            vec![Token::Int(50), Token::Other('.'), Token::Eof]
        );
    }

    #[test]
    fn rir_clause() {
        assert_eq!(
            kinds("2-3RIR"),
            vec![
                Token::Int(2),
                Token::Hyphen,
                Token::Int(3),
                Token::Word("rir".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn multiplication_sign_is_x() {
        assert_eq!(kinds("4×3")[1], Token::X);
    }

    #[test]
    fn spans_index_original_text() {
        let src = "3 x 10 Push-Ups";
        let toks = lex(src);
        let push = &toks[3];
        assert_eq!(push.token, Token::Word("push".into()));
        assert_eq!(&src[push.start..push.end], "Push");
        assert_eq!(toks.last().unwrap().start, src.len());
    }

    #[test]
    fn oversized_literals_are_overflow() {
        let big = "99999999999999999999";
        assert_eq!(kinds(big)[0], Token::Overflow(big.into()));
        let huge = format!("{}.5", "9".repeat(30));
        assert_eq!(kinds(&huge)[0], Token::Overflow(huge.clone()));
        assert_eq!(kinds("9223372036854775807")[0], Token::Int(i64::MAX));
    }

    #[test]
    fn word_containing_x_is_not_the_separator() {
        assert_eq!(kinds("box")[0], Token::Word("box".into()));
    }
}
