use serde::{Deserialize, Serialize};

/// Every surface form the dispatcher accepts, in priority order.
///
/// Appended to each parse error so a caller can show the message as-is.
pub const ACCEPTED_FORMS: &str = "\
Accepted formats:
  4 x 3 @50kg            sets x reps @weight
  3 x 5 @60 70 80kg      one weight per set
  4 x 2 + 2 @50kg        compound reps
  3 x 5 @60-70kg         weight range
  4 x 5 @80%             percentage of 1RM
  4 x 5 @75-80%          percentage range
  4 x 2 + 2 @80%         compound reps at a percentage
  3-2-1-1-1 65kg         wave, one set per rep count
  3 x 10 push-ups, 5 pull-ups  circuit (also '3 sets of ...')
  Build to 8RM           build to a rep max
  2 x 10, 2-3RIR         reps in reserve
  3 x 5 @80kg, 2RIR      reps in reserve at a weight
Any form may end with a rest time such as '90s' or '2m'.";

/// Machine-readable classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    StructuralMismatch,
    ArityMismatch,
    NonNumericToken,
    OutOfRangeValue,
}

/// A rejected set line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Nothing but whitespace was entered.
    #[error("input is empty\n\n{}", ACCEPTED_FORMS)]
    EmptyInput,

    /// No notation rule recognised the line.
    #[error("'{input}' does not match any set notation\n\n{}", ACCEPTED_FORMS)]
    StructuralMismatch { input: String },

    /// A multi-weight line listed a different number of weights than sets.
    #[error(
        "Expected {expected} weights (one per set), got {got}\n\n{}",
        ACCEPTED_FORMS
    )]
    ArityMismatch { expected: u32, got: usize },

    /// A word appeared where a number is required.
    #[error("'{token}' is not a number\n\n{}", ACCEPTED_FORMS)]
    NonNumericToken { token: String },

    /// A number was structurally valid but outside its allowed range.
    #[error("{field} {reason}\n\n{}", ACCEPTED_FORMS)]
    OutOfRangeValue { field: String, reason: String },
}

impl ParseError {
    pub fn out_of_range(field: &str, reason: impl Into<String>) -> Self {
        ParseError::OutOfRangeValue {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    pub fn non_numeric(token: impl Into<String>) -> Self {
        ParseError::NonNumericToken {
            token: token.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::EmptyInput => ErrorKind::EmptyInput,
            ParseError::StructuralMismatch { .. } => ErrorKind::StructuralMismatch,
            ParseError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            ParseError::NonNumericToken { .. } => ErrorKind::NonNumericToken,
            ParseError::OutOfRangeValue { .. } => ErrorKind::OutOfRangeValue,
        }
    }

    /// Serialize for `--output json`. The message is the full display text.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":    self.kind(),
            "message": self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_names_both_counts() {
        let err = ParseError::ArityMismatch {
            expected: 3,
            got: 2,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Expected 3 weights (one per set), got 2"));
        assert!(msg.contains("Accepted formats:"));
    }

    #[test]
    fn json_value_carries_snake_case_kind() {
        let err = ParseError::out_of_range("percentage", "must be at most 100");
        let json = err.to_json_value();
        assert_eq!(json["kind"], "out_of_range_value");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("percentage must be at most 100"));
    }
}
