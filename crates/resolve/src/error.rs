use repline_core::ParseError;
use repline_storage::StorageError;

/// Errors that can occur when a provider fetches a one-rep max.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("one-rep-max provider error: {0}")]
pub struct ProviderError(pub String);

/// Errors from resolving a percentage prescription to absolute weights.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No one-rep max is recorded for the exercise.
    #[error("no one-rep max recorded for '{exercise}'; record one before using percentages")]
    RmNotFound { exercise: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The one-rep max produced an unusable weight.
    #[error(transparent)]
    InvalidWeight(#[from] ParseError),
}

/// Errors from submitting or editing a set line.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
