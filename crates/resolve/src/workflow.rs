//! Submit and edit set lines against a store.

use repline_core::{decompose, format_record, parse_set_line, PhaseRecord};
use repline_storage::{StoredPhase, TrainingStore};

use crate::error::SubmitError;
use crate::provider::OneRepMaxProvider;
use crate::resolve::resolve;

async fn records_for<P>(
    provider: &P,
    exercise_name: &str,
    line: &str,
) -> Result<Vec<PhaseRecord>, SubmitError>
where
    P: OneRepMaxProvider + ?Sized,
{
    let prescription = parse_set_line(line)?;
    let resolved = resolve(prescription, exercise_name, provider).await?;
    Ok(decompose(&resolved))
}

/// Parse, resolve and store one line as new phases of an exercise.
///
/// Nothing is written unless the line parses and resolves. A wave stores
/// one phase per wave step.
pub async fn submit_line<S, P>(
    store: &S,
    provider: &P,
    exercise_id: &str,
    exercise_name: &str,
    line: &str,
) -> Result<Vec<StoredPhase>, SubmitError>
where
    S: TrainingStore + ?Sized,
    P: OneRepMaxProvider + ?Sized,
{
    let records = records_for(provider, exercise_name, line).await?;
    let stored = store.insert_phases(exercise_id, records).await?;
    tracing::debug!(exercise_id, phases = stored.len(), "submitted set line");
    Ok(stored)
}

/// Replace a stored phase with the result of a new line.
///
/// The first decomposed record overwrites the phase in place. Any further
/// records (a wave) are appended to the same exercise.
pub async fn edit_phase<S, P>(
    store: &S,
    provider: &P,
    phase_id: &str,
    exercise_name: &str,
    line: &str,
) -> Result<Vec<StoredPhase>, SubmitError>
where
    S: TrainingStore + ?Sized,
    P: OneRepMaxProvider + ?Sized,
{
    let existing = store.get_phase(phase_id).await?;
    let mut records = records_for(provider, exercise_name, line).await?.into_iter();
    let Some(first) = records.next() else {
        return Ok(Vec::new());
    };

    let mut stored = vec![store.update_phase(phase_id, first).await?];
    let rest: Vec<PhaseRecord> = records.collect();
    if !rest.is_empty() {
        stored.extend(store.insert_phases(&existing.exercise_id, rest).await?);
    }
    tracing::debug!(phase_id, phases = stored.len(), "edited phase");
    Ok(stored)
}

/// The text to pre-fill when a stored phase is opened for editing.
pub async fn edit_text<S>(store: &S, phase_id: &str) -> Result<String, SubmitError>
where
    S: TrainingStore + ?Sized,
{
    let stored = store.get_phase(phase_id).await?;
    Ok(format_record(&stored.phase))
}
