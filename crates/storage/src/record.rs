use repline_core::PhaseRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

use crate::error::StorageError;

/// A phase record as held by a store, with its identity and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPhase {
    pub id: String,
    pub exercise_id: String,
    /// Zero-based position of the phase within its exercise.
    pub sequence: u32,
    pub phase: PhaseRecord,
}

/// A recorded rep max for an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepMaxRecord {
    pub exercise_name: String,
    pub reps: u32,
    pub weight: Decimal,
    /// Calendar date, `YYYY-MM-DD`.
    pub recorded_on: String,
}

impl RepMaxRecord {
    /// Check the record and return its parsed date.
    pub fn validate(&self) -> Result<Date, StorageError> {
        if self.exercise_name.trim().is_empty() {
            return Err(StorageError::invalid("exercise name must not be empty"));
        }
        if self.reps == 0 {
            return Err(StorageError::invalid("reps must be at least 1"));
        }
        if self.weight <= Decimal::ZERO {
            return Err(StorageError::invalid(format!(
                "weight must be positive, got {}",
                self.weight
            )));
        }
        parse_date(&self.recorded_on)
    }
}

pub(crate) fn parse_date(s: &str) -> Result<Date, StorageError> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|e| StorageError::invalid(format!("recorded_on '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rm(weight: i64, recorded_on: &str) -> RepMaxRecord {
        RepMaxRecord {
            exercise_name: "Back Squat".to_string(),
            reps: 1,
            weight: Decimal::from(weight),
            recorded_on: recorded_on.to_string(),
        }
    }

    #[test]
    fn valid_record_parses_date() {
        let date = rm(140, "2024-03-09").validate().unwrap();
        assert_eq!(date.to_string(), "2024-03-09");
    }

    #[test]
    fn rejects_bad_dates_and_weights() {
        assert!(rm(140, "2024-13-01").validate().is_err());
        assert!(rm(140, "09/03/2024").validate().is_err());
        assert!(rm(0, "2024-03-09").validate().is_err());
        let mut nameless = rm(140, "2024-03-09");
        nameless.exercise_name = "  ".to_string();
        assert!(matches!(
            nameless.validate(),
            Err(StorageError::InvalidRecord { .. })
        ));
    }
}
