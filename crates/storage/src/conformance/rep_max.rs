use std::future::Future;

use rust_decimal::Decimal;

use super::{make_rep_max, TestResult};
use crate::{StorageError, TrainingStore};

pub(super) async fn run_rep_max_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "rep_max",
            "latest_by_date_wins",
            latest_by_date_wins(factory).await,
        ),
        TestResult::from_result(
            "rep_max",
            "same_date_goes_to_last_written",
            same_date_goes_to_last_written(factory).await,
        ),
        TestResult::from_result(
            "rep_max",
            "name_match_ignores_case",
            name_match_ignores_case(factory).await,
        ),
        TestResult::from_result(
            "rep_max",
            "reps_must_match_exactly",
            reps_must_match_exactly(factory).await,
        ),
        TestResult::from_result(
            "rep_max",
            "invalid_record_is_rejected",
            invalid_record_is_rejected(factory).await,
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn latest_by_date_wins<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    for (w, d) in [(150, "2024-05-01"), (140, "2024-01-15"), (145, "2024-03-01")] {
        s.record_rep_max(make_rep_max("Back Squat", 1, w, d))
            .await
            .map_err(|e| e.to_string())?;
    }
    let latest = s
        .latest_rep_max("Back Squat", 1)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("no rep max found")?;
    if latest.weight != Decimal::from(150) {
        return Err(format!("expected 150, got {}", latest.weight));
    }
    Ok(())
}

async fn same_date_goes_to_last_written<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.record_rep_max(make_rep_max("Deadlift", 1, 200, "2024-02-02"))
        .await
        .map_err(|e| e.to_string())?;
    s.record_rep_max(make_rep_max("Deadlift", 1, 195, "2024-02-02"))
        .await
        .map_err(|e| e.to_string())?;
    let latest = s
        .latest_rep_max("Deadlift", 1)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("no rep max found")?;
    if latest.weight != Decimal::from(195) {
        return Err(format!("expected 195, got {}", latest.weight));
    }
    Ok(())
}

async fn name_match_ignores_case<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.record_rep_max(make_rep_max("Bench Press", 1, 100, "2024-01-01"))
        .await
        .map_err(|e| e.to_string())?;
    let found = s
        .latest_rep_max("bench press", 1)
        .await
        .map_err(|e| e.to_string())?;
    if found.is_none() {
        return Err("lowercase lookup missed 'Bench Press'".to_string());
    }
    let other = s
        .latest_rep_max("bench", 1)
        .await
        .map_err(|e| e.to_string())?;
    if other.is_some() {
        return Err("partial name must not match".to_string());
    }
    Ok(())
}

async fn reps_must_match_exactly<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.record_rep_max(make_rep_max("Back Squat", 5, 120, "2024-06-01"))
        .await
        .map_err(|e| e.to_string())?;
    let one = s
        .latest_rep_max("Back Squat", 1)
        .await
        .map_err(|e| e.to_string())?;
    if one.is_some() {
        return Err("a 5RM must not answer a 1RM lookup".to_string());
    }
    let five = s
        .latest_rep_max("Back Squat", 5)
        .await
        .map_err(|e| e.to_string())?;
    if five.map(|r| r.weight) != Some(Decimal::from(120)) {
        return Err("5RM lookup did not return the recorded weight".to_string());
    }
    Ok(())
}

async fn invalid_record_is_rejected<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: TrainingStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s
        .record_rep_max(make_rep_max("Back Squat", 1, 140, "2024-02-30"))
        .await
    {
        Err(StorageError::InvalidRecord { .. }) => {}
        other => return Err(format!("expected InvalidRecord, got {:?}", other)),
    }
    let stored = s
        .latest_rep_max("Back Squat", 1)
        .await
        .map_err(|e| e.to_string())?;
    if stored.is_some() {
        return Err("rejected record was stored".to_string());
    }
    Ok(())
}
