use std::future::Future;

use super::{make_phase, TestResult};
use crate::{StorageError, TrainingStore};

pub(super) async fn run_phase_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "phases",
            "insert_returns_phases_in_order",
            insert_returns_phases_in_order(factory).await,
        ),
        TestResult::from_result(
            "phases",
            "second_insert_appends_after_first",
            second_insert_appends_after_first(factory).await,
        ),
        TestResult::from_result(
            "phases",
            "exercises_are_independent",
            exercises_are_independent(factory).await,
        ),
        TestResult::from_result(
            "phases",
            "update_keeps_id_and_sequence",
            update_keeps_id_and_sequence(factory).await,
        ),
        TestResult::from_result(
            "phases",
            "delete_removes_only_that_phase",
            delete_removes_only_that_phase(factory).await,
        ),
        TestResult::from_result(
            "phases",
            "unknown_phase_is_not_found",
            unknown_phase_is_not_found(factory).await,
        ),
        TestResult::from_result(
            "phases",
            "empty_exercise_lists_nothing",
            empty_exercise_lists_nothing(factory).await,
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn insert_returns_phases_in_order<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let stored = s
        .insert_phases(
            "ex-1",
            vec![make_phase(1, 3, 65), make_phase(1, 2, 65), make_phase(1, 1, 65)],
        )
        .await
        .map_err(|e| e.to_string())?;
    let reps: Vec<u32> = stored.iter().map(|p| p.phase.repetitions).collect();
    if reps != [3, 2, 1] {
        return Err(format!("expected reps [3, 2, 1], got {:?}", reps));
    }
    let seq: Vec<u32> = stored.iter().map(|p| p.sequence).collect();
    if seq != [0, 1, 2] {
        return Err(format!("expected sequence [0, 1, 2], got {:?}", seq));
    }

    let listed = s.list_phases("ex-1").await.map_err(|e| e.to_string())?;
    if listed != stored {
        return Err("list_phases differs from inserted phases".to_string());
    }
    Ok(())
}

async fn second_insert_appends_after_first<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.insert_phases("ex-1", vec![make_phase(4, 3, 50)])
        .await
        .map_err(|e| e.to_string())?;
    let second = s
        .insert_phases("ex-1", vec![make_phase(3, 5, 60)])
        .await
        .map_err(|e| e.to_string())?;
    if second[0].sequence != 1 {
        return Err(format!("expected sequence 1, got {}", second[0].sequence));
    }
    let listed = s.list_phases("ex-1").await.map_err(|e| e.to_string())?;
    if listed.len() != 2 || listed[1].phase.sets != 3 {
        return Err(format!("unexpected phases after append: {:?}", listed));
    }
    Ok(())
}

async fn exercises_are_independent<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.insert_phases("ex-a", vec![make_phase(4, 3, 50), make_phase(4, 3, 55)])
        .await
        .map_err(|e| e.to_string())?;
    let b = s
        .insert_phases("ex-b", vec![make_phase(2, 10, 20)])
        .await
        .map_err(|e| e.to_string())?;
    if b[0].sequence != 0 {
        return Err(format!("ex-b should start at 0, got {}", b[0].sequence));
    }
    let a = s.list_phases("ex-a").await.map_err(|e| e.to_string())?;
    if a.len() != 2 {
        return Err(format!("ex-a should hold 2 phases, got {}", a.len()));
    }
    Ok(())
}

async fn update_keeps_id_and_sequence<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let stored = s
        .insert_phases("ex-1", vec![make_phase(4, 3, 50), make_phase(4, 3, 55)])
        .await
        .map_err(|e| e.to_string())?;
    let target = &stored[1];
    let updated = s
        .update_phase(&target.id, make_phase(5, 5, 70))
        .await
        .map_err(|e| e.to_string())?;
    if updated.id != target.id || updated.sequence != target.sequence {
        return Err("update changed the phase identity".to_string());
    }
    let read = s.get_phase(&target.id).await.map_err(|e| e.to_string())?;
    if read.phase != make_phase(5, 5, 70) {
        return Err(format!("update not visible: {:?}", read.phase));
    }
    Ok(())
}

async fn delete_removes_only_that_phase<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let stored = s
        .insert_phases(
            "ex-1",
            vec![make_phase(1, 3, 65), make_phase(1, 2, 65), make_phase(1, 1, 65)],
        )
        .await
        .map_err(|e| e.to_string())?;
    s.delete_phase(&stored[1].id)
        .await
        .map_err(|e| e.to_string())?;
    let listed = s.list_phases("ex-1").await.map_err(|e| e.to_string())?;
    let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
    if ids != [stored[0].id.as_str(), stored[2].id.as_str()] {
        return Err(format!("unexpected phases after delete: {:?}", ids));
    }
    match s.delete_phase(&stored[1].id).await {
        Err(StorageError::PhaseNotFound { .. }) => Ok(()),
        other => Err(format!("second delete: expected PhaseNotFound, got {:?}", other)),
    }
}

async fn unknown_phase_is_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s.get_phase("missing").await {
        Err(StorageError::PhaseNotFound { phase_id }) if phase_id == "missing" => {}
        other => return Err(format!("get_phase: expected PhaseNotFound, got {:?}", other)),
    }
    match s.update_phase("missing", make_phase(1, 1, 1)).await {
        Err(StorageError::PhaseNotFound { .. }) => Ok(()),
        other => Err(format!(
            "update_phase: expected PhaseNotFound, got {:?}",
            other
        )),
    }
}

async fn empty_exercise_lists_nothing<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let listed = s.list_phases("nobody").await.map_err(|e| e.to_string())?;
    if !listed.is_empty() {
        return Err(format!("expected no phases, got {}", listed.len()));
    }
    Ok(())
}
