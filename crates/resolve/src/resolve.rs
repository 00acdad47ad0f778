use repline_core::{Prescription, ResolvedPrescription};

use crate::error::ResolveError;
use crate::provider::OneRepMaxProvider;

/// Resolve a prescription to absolute weights.
///
/// Absolute notations are returned as-is without calling the provider.
/// Percentage notations are computed against the latest one-rep max for
/// `exercise`.
pub async fn resolve<P>(
    prescription: Prescription,
    exercise: &str,
    provider: &P,
) -> Result<ResolvedPrescription, ResolveError>
where
    P: OneRepMaxProvider + ?Sized,
{
    let pending = match prescription.into_resolved() {
        Ok(resolved) => return Ok(resolved),
        Err(pending) => pending,
    };

    tracing::debug!(exercise, kind = %pending.kind(), "looking up one-rep max");
    let Some(one_rep_max) = provider.latest_one_rep_max(exercise).await? else {
        tracing::warn!(exercise, "no one-rep max recorded");
        return Err(ResolveError::RmNotFound {
            exercise: exercise.to_string(),
        });
    };

    let resolved = pending.apply_one_rep_max(one_rep_max)?;
    tracing::debug!(exercise, %one_rep_max, "resolved percentage prescription");
    Ok(resolved)
}
