use rust_decimal::Decimal;

use super::{count, weight, Parser};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::notation::{Notation, WavePhase};

/// A token found in a hyphen-separated rep position.
enum RepSlot {
    Whole(i64),
    Fraction(Decimal),
    Word(String),
}

/// `r1-r2-...-rk W[kg]`
///
/// Claimed as soon as a number is followed by a hyphen and the line ends in
/// a weight, so a bad rep token rejects the whole line.
pub(super) fn wave(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let first = p.signed_int()?;
    if p.peek() != &Token::Hyphen {
        return None;
    }
    let mut slots = vec![RepSlot::Whole(first)];
    while p.eat(&Token::Hyphen) {
        if let Some(n) = p.signed_int() {
            slots.push(RepSlot::Whole(n));
            continue;
        }
        let slot = match p.peek() {
            Token::Decimal(d) => RepSlot::Fraction(*d),
            Token::Word(w) => RepSlot::Word(w.clone()),
            _ => return None,
        };
        p.advance();
        slots.push(slot);
    }
    let w = p.signed_number()?;
    p.eat_kg();
    p.expect_end()?;
    Some(build_wave(slots, w))
}

fn build_wave(slots: Vec<RepSlot>, w: Decimal) -> Result<Notation, ParseError> {
    let mut reps = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            RepSlot::Whole(n) => reps.push(count("wave reps", n)?),
            RepSlot::Fraction(d) => {
                return Err(ParseError::out_of_range(
                    "wave reps",
                    format!("must be whole numbers, got {}", d),
                ))
            }
            RepSlot::Word(word) => return Err(ParseError::non_numeric(word)),
        }
    }
    let weight = weight("weight", w)?;
    Ok(Notation::Wave {
        phases: reps
            .into_iter()
            .map(|reps| WavePhase { reps, weight })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::notation::NotationKind;
    use crate::parse_set_line;

    #[test]
    fn two_phases_is_enough() {
        let p = parse_set_line("5-5 100").unwrap();
        assert_eq!(p.kind(), NotationKind::Wave);
        assert_eq!(p.summary().sets, 2);
    }

    #[test]
    fn spaced_hyphens() {
        let p = parse_set_line("3 - 2 - 1 70 kg").unwrap();
        assert_eq!(p.summary().sets, 3);
    }

    #[test]
    fn single_number_is_not_a_wave() {
        let err = parse_set_line("5 100").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralMismatch);
    }

    #[test]
    fn first_bad_token_is_reported() {
        let err = parse_set_line("3-x-0 60").unwrap_err();
        // `x` lexes as the sets separator, which no rep slot accepts
        assert_eq!(err.kind(), ErrorKind::StructuralMismatch);
        let err = parse_set_line("3-two-0 60").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonNumericToken);
    }
}
