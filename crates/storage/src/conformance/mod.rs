//! Conformance test suite for `TrainingStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `TrainingStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Phases**: append order, per-exercise sequencing, update in place,
//!   not-found errors
//! - **Rep maxes**: validation, case-insensitive lookup, latest-date and
//!   write-order tie-breaking
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use repline_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn sqlite_conformance() {
//!     let report = run_conformance_suite(|| async { open_test_sqlite().await }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod phases;
mod rep_max;

use std::fmt;
use std::future::Future;

use repline_core::{ExerciseType, PhaseRecord};
use rust_decimal::Decimal;

use crate::record::RepMaxRecord;
use crate::TrainingStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category ("phases" or "rep_max").
    pub category: String,
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in self.results.iter().filter(|r| !r.passed) {
            writeln!(
                f,
                "  FAIL [{}/{}]: {}",
                r.category,
                r.name,
                r.message.as_deref().unwrap_or("(no message)")
            )?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(phases::run_phase_tests(&factory).await);
    results.extend(rep_max::run_rep_max_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers: record constructors with sensible defaults ──────────────────────

fn make_phase(sets: u32, reps: u32, weight: i64) -> PhaseRecord {
    PhaseRecord {
        sets,
        repetitions: reps,
        weight: Decimal::from(weight),
        exercise_type: ExerciseType::Standard,
        ..PhaseRecord::default()
    }
}

fn make_rep_max(name: &str, reps: u32, weight: i64, recorded_on: &str) -> RepMaxRecord {
    RepMaxRecord {
        exercise_name: name.to_string(),
        reps,
        weight: Decimal::from(weight),
        recorded_on: recorded_on.to_string(),
    }
}
