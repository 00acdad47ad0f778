//! One-rep-max table for `repline resolve`.
//!
//! # Example
//!
//! ```toml
//! [[max]]
//! exercise = "Back Squat"
//! weight = 140
//! recorded_on = "2024-03-01"
//!
//! [[max]]
//! exercise = "Back Squat"
//! weight = 150
//! reps = 1
//! recorded_on = "2024-06-01"
//! ```

use std::path::Path;

use repline_storage::{RepMaxRecord, TrainingStore};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level maxes file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MaxesFile {
    #[serde(default, rename = "max")]
    pub(crate) maxes: Vec<MaxEntry>,
}

/// `[[max]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MaxEntry {
    pub(crate) exercise: String,
    pub(crate) weight: Decimal,
    #[serde(default = "single_rep")]
    pub(crate) reps: u32,
    /// `YYYY-MM-DD`.
    pub(crate) recorded_on: String,
}

fn single_rep() -> u32 {
    1
}

impl From<MaxEntry> for RepMaxRecord {
    fn from(entry: MaxEntry) -> Self {
        RepMaxRecord {
            exercise_name: entry.exercise,
            reps: entry.reps,
            weight: entry.weight,
            recorded_on: entry.recorded_on,
        }
    }
}

/// Read and parse a maxes TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub(crate) fn read_maxes(path: &Path) -> Result<MaxesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Record every entry in `store`. Entries are validated by the store.
pub(crate) async fn load_into<S>(store: &S, file: MaxesFile) -> Result<usize, String>
where
    S: TrainingStore,
{
    let count = file.maxes.len();
    for (i, entry) in file.maxes.into_iter().enumerate() {
        let exercise = entry.exercise.clone();
        store
            .record_rep_max(entry.into())
            .await
            .map_err(|e| format!("max #{} ('{}'): {}", i + 1, exercise, e))?;
    }
    tracing::debug!(count, "loaded one-rep maxes");
    Ok(count)
}
