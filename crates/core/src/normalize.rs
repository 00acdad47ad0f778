//! Input normalization: trimming and rest-time suffix extraction.

use crate::error::ParseError;

/// A trimmed set line with any trailing rest time split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'a> {
    /// The notation text, original letter case preserved.
    pub core: &'a str,
    pub rest_time_seconds: Option<u32>,
}

/// Trim `raw` and strip a trailing `<int><unit>` rest time.
///
/// The suffix must be separated from the notation by whitespace and carry
/// a unit; a bare trailing number is left alone because it may be the last
/// entry of a weight list.
pub fn normalize(raw: &str) -> Result<Normalized<'_>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let Some(split) = trimmed.rfind(char::is_whitespace) else {
        return Ok(Normalized {
            core: trimmed,
            rest_time_seconds: None,
        });
    };
    let head = trimmed[..split].trim_end();
    let last = trimmed[split..].trim_start();

    match rest_seconds(last)? {
        Some(seconds) if !head.is_empty() => Ok(Normalized {
            core: head,
            rest_time_seconds: Some(seconds),
        }),
        _ => Ok(Normalized {
            core: trimmed,
            rest_time_seconds: None,
        }),
    }
}

/// Interpret `token` as `<digits><unit>`, returning the duration in seconds.
fn rest_seconds(token: &str) -> Result<Option<u32>, ParseError> {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if digits_end == 0 || digits_end == token.len() {
        return Ok(None);
    }
    let (digits, unit) = token.split_at(digits_end);
    let multiplier: u32 = match unit.to_ascii_lowercase().as_str() {
        "s" | "sec" | "second" | "seconds" => 1,
        "m" | "min" | "minute" | "minutes" => 60,
        _ => return Ok(None),
    };
    let value: u32 = digits
        .parse()
        .map_err(|_| ParseError::out_of_range("rest time", "is too large"))?;
    value
        .checked_mul(multiplier)
        .map(Some)
        .ok_or_else(|| ParseError::out_of_range("rest time", "is too large"))
}
