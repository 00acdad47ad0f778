use rust_decimal::Decimal;

use super::{count, ordered, percentage, rep_parts_checked, Parser};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::notation::Notation;

/// `N x R1+R2{+Ri} @P%`
pub(super) fn compound_percentage(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let sets = p.signed_int()?;
    p.expect(&Token::X)?;
    let parts = p.rep_parts()?;
    if parts.len() < 2 {
        return None;
    }
    p.expect(&Token::At)?;
    let pct = p.signed_number()?;
    p.expect(&Token::Percent)?;
    p.expect_end()?;
    Some(build_compound_percentage(sets, parts, pct))
}

fn build_compound_percentage(
    sets: i64,
    parts: Vec<i64>,
    pct: Decimal,
) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps_parts = rep_parts_checked(parts)?;
    Ok(Notation::CompoundPercentage {
        sets,
        reps_parts,
        percentage: percentage("percentage", pct)?,
    })
}

/// `N x R @P1-P2%`; the first `%` is optional.
pub(super) fn percentage_range(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::At)?;
    let min = p.signed_number()?;
    p.eat(&Token::Percent);
    p.expect(&Token::Hyphen)?;
    let max = p.signed_number()?;
    p.expect(&Token::Percent)?;
    p.expect_end()?;
    Some(build_percentage_range(sets, reps, min, max))
}

fn build_percentage_range(
    sets: i64,
    reps: i64,
    min: Decimal,
    max: Decimal,
) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps = count("reps", reps)?;
    let percentage_min = percentage("minimum percentage", min)?;
    let percentage_max = percentage("maximum percentage", max)?;
    ordered("percentage range", percentage_min, percentage_max)?;
    Ok(Notation::PercentageRange {
        sets,
        reps,
        percentage_min,
        percentage_max,
    })
}

/// `N x R @P%`
pub(super) fn percentage_single(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::At)?;
    let pct = p.signed_number()?;
    p.expect(&Token::Percent)?;
    p.expect_end()?;
    Some(build_percentage_single(sets, reps, pct))
}

fn build_percentage_single(sets: i64, reps: i64, pct: Decimal) -> Result<Notation, ParseError> {
    Ok(Notation::PercentageSingle {
        sets: count("sets", sets)?,
        reps: count("reps", reps)?,
        percentage: percentage("percentage", pct)?,
    })
}
