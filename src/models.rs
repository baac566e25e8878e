use crate::i18n::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single weight/repetition pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub weight: f64,
    pub reps: i32,
}

impl ExerciseSet {
    pub const fn new(weight: f64, reps: i32) -> Self {
        Self { weight, reps }
    }

    /// Heavier wins; equal weight falls back to more reps.
    pub fn beats(&self, other: &ExerciseSet) -> bool {
        self.weight > other.weight || (self.weight == other.weight && self.reps > other.reps)
    }
}

/// One of the three rotating training blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BlockNumber {
    One,
    Two,
    Three,
}

impl BlockNumber {
    pub const ALL: [BlockNumber; 3] = [BlockNumber::One, BlockNumber::Two, BlockNumber::Three];

    pub fn get(self) -> u8 {
        match self {
            BlockNumber::One => 1,
            BlockNumber::Two => 2,
            BlockNumber::Three => 3,
        }
    }
}

impl TryFrom<u8> for BlockNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BlockNumber::One),
            2 => Ok(BlockNumber::Two),
            3 => Ok(BlockNumber::Three),
            other => Err(format!("block number must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<BlockNumber> for u8 {
    fn from(block: BlockNumber) -> Self {
        block.get()
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A logged session for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub completed: bool,
    pub block_number: BlockNumber,
    pub exercise_a: Vec<ExerciseSet>,
    pub exercise_b: Vec<ExerciseSet>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Date key (`"{year}-{month}-{day}"`) to entry.
pub type ProgressData = BTreeMap<String, WorkoutEntry>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStats {
    pub exercise_a: Vec<ExerciseSet>,
    pub exercise_b: Vec<ExerciseSet>,
}

/// "Last time" sets for every block, keyed by block number.
pub type PreviousStats = BTreeMap<BlockNumber, BlockStats>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub total_workouts: usize,
    pub personal_bests: BTreeMap<String, ExerciseSet>,
    pub days_in_month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayState {
    pub date: String,
    pub day: u32,
    pub key: String,
    pub is_today: bool,
    pub is_completed: bool,
    pub is_rest_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<BlockNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub days: Vec<DayState>,
}

/// What the editor opens with for a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub date: String,
    pub block_number: BlockNumber,
    pub is_completed: bool,
    pub exercise_a: Vec<ExerciseSet>,
    pub exercise_b: Vec<ExerciseSet>,
    pub last_time: BlockStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWorkoutRequest {
    pub block_number: BlockNumber,
    pub exercise_a: Vec<ExerciseSet>,
    pub exercise_b: Vec<ExerciseSet>,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DraftQuery {
    pub block: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct LanguagePayload {
    pub language: Language,
}
