//! Set-line grammar: one independent matcher per notation, tried in a fixed
//! priority order over the lexed token stream.
//!
//! A matcher returns `None` when the line does not have its shape, and
//! `Some(Err(..))` when it does but a value is out of range. The first
//! `Some` wins, so a structurally recognised line is never re-routed to a
//! lower-priority notation.

use rust_decimal::Decimal;

use crate::error::ParseError;
use crate::lexer::{self, Spanned, Token};
use crate::normalize::normalize;
use crate::notation::{Notation, NotationKind, Prescription};

mod circuit;
mod percentage;
mod rir;
mod wave;
mod weighted;

type Matcher = fn(&mut Parser<'_>) -> Option<Result<Notation, ParseError>>;

/// Dispatch table in priority order.
///
/// Percentage rules come before the plain `@` rules, and weight ranges
/// before weight lists, because each earlier shape is a prefix-compatible
/// superset of a later one.
const RULES: &[(NotationKind, Matcher)] = &[
    (
        NotationKind::CompoundPercentage,
        percentage::compound_percentage,
    ),
    (NotationKind::PercentageRange, percentage::percentage_range),
    (NotationKind::PercentageSingle, percentage::percentage_single),
    (NotationKind::WeightRange, weighted::weight_range),
    (NotationKind::MultiWeight, weighted::multi_weight),
    (NotationKind::Standard, weighted::standard),
    (NotationKind::Compound, weighted::compound),
    (NotationKind::Wave, wave::wave),
    (NotationKind::Circuit, circuit::circuit),
    (NotationKind::RmBuild, rm_build),
    (NotationKind::RirOnly, rir::rir_only),
    (NotationKind::RirWithWeight, rir::rir_with_weight),
];

/// The order in which notations are tried.
pub fn rule_order() -> impl Iterator<Item = NotationKind> {
    RULES.iter().map(|(kind, _)| *kind)
}

/// Decode a raw set line, including any trailing rest time.
pub fn parse_set_line(raw: &str) -> Result<Prescription, ParseError> {
    let normalized = normalize(raw)?;
    let notation = parse_notation(normalized.core)?;
    Ok(Prescription::new(notation, normalized.rest_time_seconds))
}

/// Run the dispatcher over an already-normalized line.
pub fn parse_notation(core: &str) -> Result<Notation, ParseError> {
    if core.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let tokens = lexer::lex(core);
    for (_, matcher) in RULES {
        let mut parser = Parser::new(core, &tokens);
        if let Some(result) = matcher(&mut parser) {
            if let Some(literal) = parser.overflow {
                return Err(ParseError::out_of_range(
                    "number",
                    format!("'{}' is too large", literal),
                ));
            }
            return result;
        }
    }
    Err(ParseError::StructuralMismatch {
        input: core.to_owned(),
    })
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Spanned],
    pos: usize,
    /// First oversized literal consumed as a number. A rule that claims the
    /// line with one of these is reported as out of range.
    overflow: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, tokens: &'a [Spanned]) -> Self {
        Parser {
            src,
            tokens,
            pos: 0,
            overflow: None,
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let i = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[i].token
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Option<()> {
        self.eat(expected).then_some(())
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Word(x) if x == w)
    }

    fn expect_word(&mut self, w: &str) -> Option<()> {
        if self.is_word(w) {
            self.advance();
            Some(())
        } else {
            None
        }
    }

    /// Consume an optional `kg` unit.
    fn eat_kg(&mut self) -> bool {
        if self.is_word("kg") {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_end(&self) -> Option<()> {
        (self.peek() == &Token::Eof).then_some(())
    }

    /// Whole number with an optional leading `-`.
    ///
    /// Negatives are accepted here so the owning rule can reject them with
    /// a range error instead of failing to match.
    fn signed_int(&mut self) -> Option<i64> {
        let (negative, value) = match (self.peek(), self.peek_at(1)) {
            (Token::Int(n), _) => (false, *n),
            (Token::Hyphen, Token::Int(n)) => (true, *n),
            (Token::Overflow(_), _) => (false, i64::MAX),
            (Token::Hyphen, Token::Overflow(_)) => (true, i64::MAX),
            _ => return None,
        };
        self.consume_number(negative);
        Some(if negative { -value } else { value })
    }

    /// Integer or decimal with an optional leading `-`.
    fn signed_number(&mut self) -> Option<Decimal> {
        let (negative, value) = match (self.peek(), self.peek_at(1)) {
            (Token::Int(n), _) => (false, Decimal::from(*n)),
            (Token::Decimal(d), _) => (false, *d),
            (Token::Hyphen, Token::Int(n)) => (true, Decimal::from(*n)),
            (Token::Hyphen, Token::Decimal(d)) => (true, *d),
            (Token::Overflow(_), _) => (false, Decimal::MAX),
            (Token::Hyphen, Token::Overflow(_)) => (true, Decimal::MAX),
            _ => return None,
        };
        self.consume_number(negative);
        Some(if negative { -value } else { value })
    }

    /// Step past a number (and its sign), remembering it if it overflowed.
    /// Oversized literals stand in as the type's maximum.
    fn consume_number(&mut self, negative: bool) {
        if negative {
            self.advance();
        }
        let literal = match self.peek() {
            Token::Overflow(text) => Some(text.clone()),
            _ => None,
        };
        if self.overflow.is_none() {
            self.overflow = literal;
        }
        self.advance();
    }

    /// `N x R`, the prefix shared by most notations.
    fn sets_x_reps(&mut self) -> Option<(i64, i64)> {
        let sets = self.signed_int()?;
        self.expect(&Token::X)?;
        let reps = self.signed_int()?;
        Some((sets, reps))
    }

    /// `R {+ R}`, at least one part.
    fn rep_parts(&mut self) -> Option<Vec<i64>> {
        let mut parts = vec![self.signed_int()?];
        while self.eat(&Token::Plus) {
            parts.push(self.signed_int()?);
        }
        Some(parts)
    }

    /// Source text from the current token to the end of the line.
    fn rest_text(&self) -> &'a str {
        &self.src[self.cur().start..]
    }
}

fn rm_build(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    p.expect_word("build")?;
    p.expect_word("to")?;
    let target = p.signed_int()?;
    p.expect_word("rm")?;
    p.expect_end()?;
    Some(count("target RM", target).map(|target_rm| Notation::RmBuild { target_rm }))
}

// ──────────────────────────────────────────────
// Value checks shared by the rules
// ──────────────────────────────────────────────

/// A count that must be at least 1 (sets, reps, target RM).
fn count(field: &str, value: i64) -> Result<u32, ParseError> {
    if value < 1 {
        return Err(ParseError::out_of_range(
            field,
            format!("must be at least 1, got {}", value),
        ));
    }
    u32::try_from(value).map_err(|_| ParseError::out_of_range(field, "is too large"))
}

/// Validate each compound part and make sure their total fits a count.
fn rep_parts_checked(parts: Vec<i64>) -> Result<Vec<u32>, ParseError> {
    let parts = parts
        .into_iter()
        .map(|r| count("reps", r))
        .collect::<Result<Vec<_>, _>>()?;
    parts
        .iter()
        .try_fold(0u32, |total, r| total.checked_add(*r))
        .ok_or_else(|| ParseError::out_of_range("reps", "is too large"))?;
    Ok(parts)
}

/// A count that may be zero (reps in reserve).
fn non_negative(field: &str, value: i64) -> Result<u32, ParseError> {
    if value < 0 {
        return Err(ParseError::out_of_range(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    u32::try_from(value).map_err(|_| ParseError::out_of_range(field, "is too large"))
}

fn weight(field: &str, value: Decimal) -> Result<Decimal, ParseError> {
    if value <= Decimal::ZERO {
        return Err(ParseError::out_of_range(
            field,
            format!("must be greater than 0, got {}", value.normalize()),
        ));
    }
    Ok(value.normalize())
}

fn percentage(field: &str, value: Decimal) -> Result<Decimal, ParseError> {
    if value <= Decimal::ZERO {
        return Err(ParseError::out_of_range(
            field,
            format!("must be greater than 0%, got {}%", value.normalize()),
        ));
    }
    if value > Decimal::ONE_HUNDRED {
        return Err(ParseError::out_of_range(
            field,
            format!("must be at most 100%, got {}%", value.normalize()),
        ));
    }
    Ok(value.normalize())
}

fn ordered<T: PartialOrd + std::fmt::Display>(field: &str, min: T, max: T) -> Result<(), ParseError> {
    if min > max {
        return Err(ParseError::out_of_range(
            field,
            format!("minimum {} is greater than maximum {}", min, max),
        ));
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
