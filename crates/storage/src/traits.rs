use async_trait::async_trait;
use repline_core::PhaseRecord;

use crate::error::StorageError;
use crate::record::{RepMaxRecord, StoredPhase};

/// The storage trait for repline backends.
///
/// A `TrainingStore` keeps the decomposed phase records of each exercise
/// and the rep maxes used to resolve percentage notations.
///
/// ## Phase ordering
///
/// Phases of an exercise are returned in `sequence` order. `insert_phases`
/// appends after the current last phase and either writes every record or
/// none of them.
///
/// ## Rep max lookup
///
/// `latest_rep_max` matches exercise names case-insensitively and returns
/// the record with the latest `recorded_on`; ties go to the record written
/// last.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be shared behind an
/// `Arc` across async task boundaries.
#[async_trait]
pub trait TrainingStore: Send + Sync + 'static {
    // ── Phases ───────────────────────────────────────────────────────────────

    /// Append phases to an exercise. Returns the stored phases in order.
    async fn insert_phases(
        &self,
        exercise_id: &str,
        phases: Vec<PhaseRecord>,
    ) -> Result<Vec<StoredPhase>, StorageError>;

    /// Replace the record held by an existing phase, keeping its position.
    ///
    /// Returns `Err(StorageError::PhaseNotFound)` if no phase has the id.
    async fn update_phase(
        &self,
        phase_id: &str,
        phase: PhaseRecord,
    ) -> Result<StoredPhase, StorageError>;

    /// Returns `Err(StorageError::PhaseNotFound)` if no phase has the id.
    async fn get_phase(&self, phase_id: &str) -> Result<StoredPhase, StorageError>;

    /// Remove a phase. Later phases keep their sequence numbers.
    ///
    /// Returns `Err(StorageError::PhaseNotFound)` if no phase has the id.
    async fn delete_phase(&self, phase_id: &str) -> Result<(), StorageError>;

    /// All phases of an exercise in sequence order. Empty if none exist.
    async fn list_phases(&self, exercise_id: &str) -> Result<Vec<StoredPhase>, StorageError>;

    // ── Rep maxes ────────────────────────────────────────────────────────────

    /// Store a rep max. Returns `Err(StorageError::InvalidRecord)` if the
    /// record does not validate.
    async fn record_rep_max(&self, record: RepMaxRecord) -> Result<(), StorageError>;

    /// Most recent rep max for `exercise_name` at exactly `reps` reps.
    async fn latest_rep_max(
        &self,
        exercise_name: &str,
        reps: u32,
    ) -> Result<Option<RepMaxRecord>, StorageError>;
}
