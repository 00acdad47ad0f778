use rust_decimal::Decimal;

use super::{count, non_negative, ordered, weight, Parser};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::notation::Notation;

/// `Rmin[-Rmax]RIR`
fn rir_clause(p: &mut Parser<'_>) -> Option<(i64, Option<i64>)> {
    let min = p.signed_int()?;
    let max = if p.eat(&Token::Hyphen) {
        Some(p.signed_int()?)
    } else {
        None
    };
    p.expect_word("rir")?;
    Some((min, max))
}

fn rir_bounds(min: i64, max: Option<i64>) -> Result<(u32, u32), ParseError> {
    let rir_min = non_negative("RIR", min)?;
    let rir_max = match max {
        Some(max) => non_negative("RIR", max)?,
        None => rir_min,
    };
    ordered("RIR range", rir_min, rir_max)?;
    Ok((rir_min, rir_max))
}

/// `N x R, Rmin[-Rmax]RIR`
pub(super) fn rir_only(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::Comma)?;
    let (min, max) = rir_clause(p)?;
    p.expect_end()?;
    Some(build_rir_only(sets, reps, min, max))
}

fn build_rir_only(
    sets: i64,
    reps: i64,
    min: i64,
    max: Option<i64>,
) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps = count("reps", reps)?;
    let (rir_min, rir_max) = rir_bounds(min, max)?;
    Ok(Notation::RirOnly {
        sets,
        reps,
        rir_min,
        rir_max,
    })
}

/// `N x R @W[kg], Rmin[-Rmax]RIR`
pub(super) fn rir_with_weight(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::At)?;
    let w = p.signed_number()?;
    p.eat_kg();
    p.expect(&Token::Comma)?;
    let (min, max) = rir_clause(p)?;
    p.expect_end()?;
    Some(build_rir_with_weight(sets, reps, w, min, max))
}

fn build_rir_with_weight(
    sets: i64,
    reps: i64,
    w: Decimal,
    min: i64,
    max: Option<i64>,
) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps = count("reps", reps)?;
    let weight = weight("weight", w)?;
    let (rir_min, rir_max) = rir_bounds(min, max)?;
    Ok(Notation::RirWithWeight {
        sets,
        reps,
        weight,
        rir_min,
        rir_max,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::notation::Notation;
    use crate::parse_set_line;
    use rust_decimal::Decimal;

    #[test]
    fn single_rir_sets_both_bounds() {
        let p = parse_set_line("3 x 8, 2 RIR").unwrap();
        assert_eq!(
            p.notation(),
            &Notation::RirOnly {
                sets: 3,
                reps: 8,
                rir_min: 2,
                rir_max: 2
            }
        );
    }

    #[test]
    fn weighted_rir_with_rest() {
        let p = parse_set_line("3 x 5 @82.5kg, 1-2RIR 2min").unwrap();
        assert_eq!(
            p.notation(),
            &Notation::RirWithWeight {
                sets: 3,
                reps: 5,
                weight: Decimal::new(825, 1),
                rir_min: 1,
                rir_max: 2
            }
        );
        assert_eq!(p.rest_time_seconds(), Some(120));
    }

    #[test]
    fn weighted_rir_rejects_zero_weight() {
        let err = parse_set_line("3 x 5 @0kg, 2RIR").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRangeValue);
    }

    #[test]
    fn rir_without_comma_is_unmatched() {
        let err = parse_set_line("3 x 5 2RIR").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralMismatch);
    }
}
