//! One-rep-max provider trait and implementations.
//!
//! A `OneRepMaxProvider` asynchronously supplies the most recent
//! single-repetition maximum for an exercise. Exercise names match
//! case-insensitively.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use repline_storage::TrainingStore;
use rust_decimal::Decimal;

use crate::error::ProviderError;

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// Asynchronous source of one-rep maxes.
#[async_trait]
pub trait OneRepMaxProvider: Send + Sync {
    /// The latest one-rep max for `exercise`, or `None` if none is recorded.
    async fn latest_one_rep_max(&self, exercise: &str) -> Result<Option<Decimal>, ProviderError>;
}

// ──────────────────────────────────────────────
// StaticOneRepMaxProvider
// ──────────────────────────────────────────────

/// A provider that answers from a fixed table.
///
/// Useful for tests and for tables loaded once from a config file.
#[derive(Debug, Clone, Default)]
pub struct StaticOneRepMaxProvider {
    maxes: HashMap<String, Decimal>,
}

impl StaticOneRepMaxProvider {
    /// Build from `(exercise, weight)` pairs. Later pairs overwrite earlier
    /// ones for the same exercise.
    pub fn new<I, S>(maxes: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        Self {
            maxes: maxes
                .into_iter()
                .map(|(name, weight)| (name.as_ref().to_lowercase(), weight))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.maxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maxes.is_empty()
    }
}

#[async_trait]
impl OneRepMaxProvider for StaticOneRepMaxProvider {
    async fn latest_one_rep_max(&self, exercise: &str) -> Result<Option<Decimal>, ProviderError> {
        Ok(self.maxes.get(&exercise.to_lowercase()).copied())
    }
}

// ──────────────────────────────────────────────
// StoreOneRepMaxProvider
// ──────────────────────────────────────────────

/// A provider backed by a store's recorded rep maxes.
pub struct StoreOneRepMaxProvider<S> {
    store: Arc<S>,
}

impl<S: TrainingStore> StoreOneRepMaxProvider<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: TrainingStore> OneRepMaxProvider for StoreOneRepMaxProvider<S> {
    async fn latest_one_rep_max(&self, exercise: &str) -> Result<Option<Decimal>, ProviderError> {
        let record = self
            .store
            .latest_rep_max(exercise, 1)
            .await
            .map_err(|e| ProviderError(e.to_string()))?;
        Ok(record.map(|r| r.weight))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use repline_storage::{InMemoryStore, RepMaxRecord};

    #[tokio::test]
    async fn static_provider_ignores_case() {
        let provider = StaticOneRepMaxProvider::new([("Back Squat", Decimal::from(140))]);
        assert_eq!(
            provider.latest_one_rep_max("back squat").await.unwrap(),
            Some(Decimal::from(140))
        );
        assert_eq!(provider.latest_one_rep_max("deadlift").await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_provider_has_no_maxes() {
        let provider = StaticOneRepMaxProvider::empty();
        assert!(provider.is_empty());
        assert_eq!(provider.latest_one_rep_max("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_provider_reads_latest_single() {
        let store = Arc::new(InMemoryStore::new());
        for (reps, weight, date) in [(1, 140, "2024-01-01"), (1, 150, "2024-04-01"), (3, 160, "2024-05-01")] {
            store
                .record_rep_max(RepMaxRecord {
                    exercise_name: "Back Squat".to_string(),
                    reps,
                    weight: Decimal::from(weight),
                    recorded_on: date.to_string(),
                })
                .await
                .unwrap();
        }
        let provider = StoreOneRepMaxProvider::new(store);
        assert_eq!(
            provider.latest_one_rep_max("BACK SQUAT").await.unwrap(),
            Some(Decimal::from(150))
        );
    }

    #[test]
    fn error_display() {
        let err = ProviderError("connection refused".to_string());
        assert_eq!(err.to_string(), "one-rep-max provider error: connection refused");
    }
}
