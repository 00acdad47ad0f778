//! In-memory `TrainingStore` backend.

use async_trait::async_trait;
use repline_core::PhaseRecord;
use time::Date;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::{RepMaxRecord, StoredPhase};
use crate::traits::TrainingStore;

/// A process-local store. Phase ids are `phase-<n>`, unique per store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    phases: Vec<StoredPhase>,
    /// Insertion order doubles as the tie-break for equal dates.
    rep_maxes: Vec<(Date, RepMaxRecord)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrainingStore for InMemoryStore {
    async fn insert_phases(
        &self,
        exercise_id: &str,
        phases: Vec<PhaseRecord>,
    ) -> Result<Vec<StoredPhase>, StorageError> {
        if exercise_id.is_empty() {
            return Err(StorageError::invalid("exercise id must not be empty"));
        }
        let mut inner = self.inner.write().await;
        let start = inner
            .phases
            .iter()
            .filter(|p| p.exercise_id == exercise_id)
            .map(|p| p.sequence + 1)
            .max()
            .unwrap_or(0);

        let mut stored = Vec::with_capacity(phases.len());
        for (offset, phase) in phases.into_iter().enumerate() {
            inner.next_id += 1;
            stored.push(StoredPhase {
                id: format!("phase-{}", inner.next_id),
                exercise_id: exercise_id.to_string(),
                sequence: start + offset as u32,
                phase,
            });
        }
        inner.phases.extend(stored.iter().cloned());
        tracing::debug!(exercise_id, count = stored.len(), "inserted phases");
        Ok(stored)
    }

    async fn update_phase(
        &self,
        phase_id: &str,
        phase: PhaseRecord,
    ) -> Result<StoredPhase, StorageError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .phases
            .iter_mut()
            .find(|p| p.id == phase_id)
            .ok_or_else(|| StorageError::PhaseNotFound {
                phase_id: phase_id.to_string(),
            })?;
        slot.phase = phase;
        tracing::debug!(phase_id, "updated phase");
        Ok(slot.clone())
    }

    async fn get_phase(&self, phase_id: &str) -> Result<StoredPhase, StorageError> {
        let inner = self.inner.read().await;
        inner
            .phases
            .iter()
            .find(|p| p.id == phase_id)
            .cloned()
            .ok_or_else(|| StorageError::PhaseNotFound {
                phase_id: phase_id.to_string(),
            })
    }

    async fn delete_phase(&self, phase_id: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        let before = inner.phases.len();
        inner.phases.retain(|p| p.id != phase_id);
        if inner.phases.len() == before {
            return Err(StorageError::PhaseNotFound {
                phase_id: phase_id.to_string(),
            });
        }
        tracing::debug!(phase_id, "deleted phase");
        Ok(())
    }

    async fn list_phases(&self, exercise_id: &str) -> Result<Vec<StoredPhase>, StorageError> {
        let inner = self.inner.read().await;
        let mut phases: Vec<StoredPhase> = inner
            .phases
            .iter()
            .filter(|p| p.exercise_id == exercise_id)
            .cloned()
            .collect();
        phases.sort_by_key(|p| p.sequence);
        Ok(phases)
    }

    async fn record_rep_max(&self, record: RepMaxRecord) -> Result<(), StorageError> {
        let date = record.validate()?;
        tracing::debug!(
            exercise = %record.exercise_name,
            reps = record.reps,
            weight = %record.weight,
            %date,
            "recorded rep max"
        );
        self.inner.write().await.rep_maxes.push((date, record));
        Ok(())
    }

    async fn latest_rep_max(
        &self,
        exercise_name: &str,
        reps: u32,
    ) -> Result<Option<RepMaxRecord>, StorageError> {
        let wanted = exercise_name.to_lowercase();
        let inner = self.inner.read().await;
        let latest = inner
            .rep_maxes
            .iter()
            .enumerate()
            .filter(|(_, (_, r))| r.reps == reps && r.exercise_name.to_lowercase() == wanted)
            .max_by_key(|(seq, (date, _))| (*date, *seq))
            .map(|(_, (_, r))| r.clone());
        Ok(latest)
    }
}
