/// All errors that can be returned by a TrainingStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No stored phase has the given id.
    #[error("phase not found: {phase_id}")]
    PhaseNotFound { phase_id: String },

    /// A record failed validation before it was written.
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// A backend-specific storage error (DB connection, lock poisoning, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StorageError::InvalidRecord {
            reason: reason.into(),
        }
    }
}
