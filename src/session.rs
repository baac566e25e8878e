//! Building, saving and clearing the workout logged for one day.

use crate::calendar::date_key;
use crate::errors::StorageError;
use crate::models::{
    BlockNumber, ExerciseSet, PreviousStats, ProgressData, SessionDraft, WorkoutEntry,
};
use crate::progress::ProgressRepository;
use crate::stats::default_block_stats;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::info;

/// Start of `date` on the local clock, as a UTC instant.
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Set counts and values are taken as given.
pub fn build_entry(
    date: NaiveDate,
    block: BlockNumber,
    exercise_a: Vec<ExerciseSet>,
    exercise_b: Vec<ExerciseSet>,
    duration_secs: f64,
) -> WorkoutEntry {
    WorkoutEntry {
        completed: true,
        block_number: block,
        exercise_a,
        exercise_b,
        date: local_midnight(date),
        duration: Some(duration_secs),
    }
}

pub async fn save_workout<S: KeyValueStore>(
    repo: &mut ProgressRepository<S>,
    date: NaiveDate,
    block: BlockNumber,
    exercise_a: Vec<ExerciseSet>,
    exercise_b: Vec<ExerciseSet>,
    duration_secs: f64,
) -> Result<WorkoutEntry, StorageError> {
    let key = date_key(date);
    let entry = build_entry(date, block, exercise_a, exercise_b, duration_secs);
    repo.save(&key, entry.clone()).await?;
    info!(%key, block = block.get(), duration_secs, "workout saved");
    Ok(entry)
}

pub async fn clear_workout<S: KeyValueStore>(
    repo: &mut ProgressRepository<S>,
    date: NaiveDate,
) -> Result<bool, StorageError> {
    let key = date_key(date);
    let removed = repo.clear(&key).await?;
    info!(%key, removed, "workout cleared");
    Ok(removed)
}

/// What the editor shows when a day is opened.
///
/// A logged day reopens with its own entry. An empty day starts from the
/// last sets of the requested block (block 1 when none is given).
pub fn draft_for(
    date: NaiveDate,
    block: Option<BlockNumber>,
    progress: &ProgressData,
    previous: &PreviousStats,
) -> SessionDraft {
    let existing = progress.get(&date_key(date));
    let block_number = existing
        .map(|entry| entry.block_number)
        .or(block)
        .unwrap_or(BlockNumber::One);
    let last_time = previous
        .get(&block_number)
        .cloned()
        .unwrap_or_else(default_block_stats);

    match existing {
        Some(entry) => SessionDraft {
            date: date.to_string(),
            block_number,
            is_completed: entry.completed,
            exercise_a: entry.exercise_a.clone(),
            exercise_b: entry.exercise_b.clone(),
            last_time,
            duration: entry.duration,
        },
        None => SessionDraft {
            date: date.to_string(),
            block_number,
            is_completed: false,
            exercise_a: last_time.exercise_a.clone(),
            exercise_b: last_time.exercise_b.clone(),
            last_time,
            duration: None,
        },
    }
}
