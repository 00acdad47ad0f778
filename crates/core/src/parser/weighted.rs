use rust_decimal::Decimal;

use super::{count, ordered, rep_parts_checked, weight, Parser};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::notation::Notation;

/// `N x R @W1-W2[kg]`
pub(super) fn weight_range(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::At)?;
    let min = p.signed_number()?;
    p.eat_kg();
    p.expect(&Token::Hyphen)?;
    let max = p.signed_number()?;
    p.eat_kg();
    p.expect_end()?;
    Some(build_weight_range(sets, reps, min, max))
}

fn build_weight_range(
    sets: i64,
    reps: i64,
    min: Decimal,
    max: Decimal,
) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps = count("reps", reps)?;
    let weight_min = weight("minimum weight", min)?;
    let weight_max = weight("maximum weight", max)?;
    ordered("weight range", weight_min, weight_max)?;
    Ok(Notation::WeightRange {
        sets,
        reps,
        weight_min,
        weight_max,
    })
}

// ──────────────────────────────────────────────
// Standard / MultiWeight lookahead
// ──────────────────────────────────────────────

/// What follows `@` on a plain weighted line.
struct WeightTail {
    numbers: Vec<Decimal>,
    /// First word that is not a `kg` unit.
    stray_word: Option<String>,
    /// A `kg` unit appears before the final number.
    kg_before_last: bool,
    /// Every number is directly followed by `kg`.
    every_weight_marked: bool,
}

impl WeightTail {
    /// Two or more bare numbers with no `kg` ahead of the last one read as a
    /// weight list. So does the fully marked form `@60kg 70kg 80kg`.
    fn is_weight_list(&self) -> bool {
        self.numbers.len() > 1 && (!self.kg_before_last || self.every_weight_marked)
    }
}

/// Scan everything after `@` as whitespace-separated weights.
///
/// Only numbers, `kg` units and words are accepted; any punctuation means
/// the line belongs to another notation. A leading `-` is allowed on the
/// first weight so a negative single weight is claimed and rejected.
fn weight_tail(p: &mut Parser<'_>) -> Option<WeightTail> {
    let mut numbers = Vec::new();
    let mut stray_word = None;
    let mut kg_seen = false;
    let mut kg_before_last = false;
    let mut marked = 0usize;
    let mut after_number = false;
    let mut first = true;
    loop {
        match p.peek() {
            Token::Eof => break,
            Token::Int(_) | Token::Decimal(_) | Token::Overflow(_) => {
                numbers.push(p.signed_number()?);
                kg_before_last = kg_seen;
                after_number = true;
                first = false;
                continue;
            }
            Token::Hyphen if first => {
                numbers.push(p.signed_number()?);
                after_number = true;
                first = false;
                continue;
            }
            Token::Word(w) if w == "kg" => {
                kg_seen = true;
                if after_number {
                    marked += 1;
                }
            }
            Token::Word(w) => {
                if stray_word.is_none() {
                    stray_word = Some(w.clone());
                }
            }
            _ => return None,
        }
        p.advance();
        after_number = false;
        first = false;
    }
    if numbers.is_empty() && stray_word.is_none() {
        return None;
    }
    let every_weight_marked = !numbers.is_empty() && marked == numbers.len();
    Some(WeightTail {
        numbers,
        stray_word,
        kg_before_last,
        every_weight_marked,
    })
}

/// `N x R @W1 W2 ... Wn[kg]`, claimed when the tail reads as a weight list.
pub(super) fn multi_weight(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::At)?;
    let tail = weight_tail(p)?;
    if !tail.is_weight_list() {
        return None;
    }
    Some(build_multi_weight(sets, reps, tail))
}

fn build_multi_weight(sets: i64, reps: i64, tail: WeightTail) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps = count("reps", reps)?;
    if let Some(word) = tail.stray_word {
        return Err(ParseError::non_numeric(word));
    }
    if tail.numbers.len() != sets as usize {
        return Err(ParseError::ArityMismatch {
            expected: sets,
            got: tail.numbers.len(),
        });
    }
    let weights = tail
        .numbers
        .into_iter()
        .map(|w| weight("weight", w))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Notation::MultiWeight {
        sets,
        reps,
        weights,
    })
}

/// `N x R @W[kg]`, claimed by every weighted tail that is not a weight list.
///
/// A tail with several numbers and a `kg` part-way through (`@60kg 70`)
/// lands here and is rejected as a mismatch.
pub(super) fn standard(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let (sets, reps) = p.sets_x_reps()?;
    p.expect(&Token::At)?;
    let tail = weight_tail(p)?;
    if tail.is_weight_list() {
        return None;
    }
    Some(build_standard(p.src, sets, reps, tail))
}

fn build_standard(
    src: &str,
    sets: i64,
    reps: i64,
    tail: WeightTail,
) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps = count("reps", reps)?;
    if let Some(word) = tail.stray_word {
        return Err(ParseError::non_numeric(word));
    }
    let w = match tail.numbers.as_slice() {
        [] => return Err(ParseError::out_of_range("weight", "is missing")),
        [w] => *w,
        _ => {
            return Err(ParseError::StructuralMismatch {
                input: src.to_owned(),
            })
        }
    };
    Ok(Notation::Standard {
        sets,
        reps,
        weight: weight("weight", w)?,
    })
}

// ──────────────────────────────────────────────
// Compound
// ──────────────────────────────────────────────

/// `N x R1+R2{+Ri} @W[kg]`
pub(super) fn compound(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let sets = p.signed_int()?;
    p.expect(&Token::X)?;
    let parts = p.rep_parts()?;
    if parts.len() < 2 {
        return None;
    }
    p.expect(&Token::At)?;
    let w = p.signed_number()?;
    p.eat_kg();
    p.expect_end()?;
    Some(build_compound(sets, parts, w))
}

fn build_compound(sets: i64, parts: Vec<i64>, w: Decimal) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let reps_parts = rep_parts_checked(parts)?;
    Ok(Notation::Compound {
        sets,
        reps_parts,
        weight: weight("weight", w)?,
    })
}
