use super::{count, Parser};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::notation::{CircuitItem, Notation};

/// `N x Item{,Item}` or `N sets of Item{,Item}`.
///
/// Works on the raw tail text so exercise names keep their spelling.
/// Tails that look like another notation (an `@`, a RIR clause, no letters
/// at all) are left to the other rules.
pub(super) fn circuit(p: &mut Parser<'_>) -> Option<Result<Notation, ParseError>> {
    let sets = p.signed_int()?;
    if !p.eat(&Token::X) {
        if p.expect_word("sets").is_none() {
            p.expect_word("set")?;
        }
        p.expect_word("of")?;
    }

    let tail = p.rest_text().trim();
    if tail.contains('@') || !tail.chars().any(char::is_alphabetic) {
        return None;
    }

    let mut items = Vec::new();
    for raw in tail.split(',') {
        let raw = raw.trim();
        if is_rir_clause(raw) {
            return None;
        }
        let (reps, name) = split_item(raw);
        if !name.chars().any(char::is_alphabetic) || name.eq_ignore_ascii_case("kg") {
            return None;
        }
        items.push((reps, name));
    }
    Some(build_circuit(sets, items))
}

fn build_circuit(sets: i64, items: Vec<(&str, &str)>) -> Result<Notation, ParseError> {
    let sets = count("sets", sets)?;
    let mut out = Vec::with_capacity(items.len());
    for (reps, name) in items {
        for part in reps.split('/').filter(|s| !s.is_empty()) {
            let n: i64 = part
                .parse()
                .map_err(|_| ParseError::out_of_range("circuit reps", "is too large"))?;
            count("circuit reps", n)?;
        }
        out.push(CircuitItem {
            reps: reps.to_owned(),
            name: name.to_owned(),
        });
    }
    Ok(Notation::Circuit { sets, items: out })
}

/// Split `10/12 KB swings` into (`10/12`, `KB swings`).
///
/// Anything that does not start with `<digits>[/<digits>]` and a space is
/// a bare name with empty reps.
fn split_item(raw: &str) -> (&str, &str) {
    let digits = |s: &str| s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    let first = digits(raw);
    if first == 0 {
        return ("", raw);
    }
    let mut end = first;
    if let Some(after_slash) = raw[end..].strip_prefix('/') {
        let second = digits(after_slash);
        if second > 0 {
            end += 1 + second;
        }
    }
    match raw[end..].chars().next() {
        Some(c) if c.is_whitespace() => (&raw[..end], raw[end..].trim()),
        _ => ("", raw),
    }
}

/// `2RIR`, `2-3 rir`, `-1RIR` and the like.
fn is_rir_clause(raw: &str) -> bool {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    match compact.strip_suffix("rir") {
        Some(bounds) => {
            !bounds.is_empty() && bounds.chars().all(|c| c.is_ascii_digit() || c == '-')
        }
        None => false,
    }
}
