use crate::calendar::days_in_month;
use crate::models::{
    BlockNumber, BlockStats, ExerciseSet, MonthSummary, PreviousStats, ProgressData, WorkoutEntry,
};
use chrono::{Datelike, Local, TimeZone};
use std::collections::BTreeMap;

const DEFAULT_SET: ExerciseSet = ExerciseSet::new(0.0, 20);
const SETS_PER_EXERCISE: usize = 3;

/// Three `0 x 20` sets per exercise.
pub fn default_block_stats() -> BlockStats {
    BlockStats {
        exercise_a: vec![DEFAULT_SET; SETS_PER_EXERCISE],
        exercise_b: vec![DEFAULT_SET; SETS_PER_EXERCISE],
    }
}

/// Most recent completed sets per block, used to pre-fill the next session.
///
/// Blocks that were never completed get three `0 x 20` sets per exercise.
/// When two entries of a block share a timestamp the later date key wins.
pub fn previous_stats(progress: &ProgressData) -> PreviousStats {
    let mut latest: BTreeMap<BlockNumber, &WorkoutEntry> = BTreeMap::new();

    for entry in progress.values().filter(|entry| entry.completed) {
        match latest.get(&entry.block_number) {
            Some(current) if current.date > entry.date => {}
            _ => {
                latest.insert(entry.block_number, entry);
            }
        }
    }

    BlockNumber::ALL
        .into_iter()
        .map(|block| {
            let stats = latest
                .get(&block)
                .map(|entry| BlockStats {
                    exercise_a: entry.exercise_a.clone(),
                    exercise_b: entry.exercise_b.clone(),
                })
                .unwrap_or_else(default_block_stats);
            (block, stats)
        })
        .collect()
}

pub fn month_summary(progress: &ProgressData, year: i32, month: u32) -> MonthSummary {
    month_summary_in(progress, year, month, &Local)
}

/// Completed sessions in the displayed month, plus personal bests over the
/// whole history.
pub fn month_summary_in<Tz: TimeZone>(
    progress: &ProgressData,
    year: i32,
    month: u32,
    tz: &Tz,
) -> MonthSummary {
    let mut total_workouts = 0;
    let mut personal_bests: BTreeMap<String, ExerciseSet> = BTreeMap::new();

    for entry in progress.values().filter(|entry| entry.completed) {
        let local = entry.date.with_timezone(tz);
        if local.year() == year && local.month() == month {
            total_workouts += 1;
        }

        update_best(&mut personal_bests, slot_key(entry.block_number, 'a'), &entry.exercise_a);
        update_best(&mut personal_bests, slot_key(entry.block_number, 'b'), &entry.exercise_b);
    }

    MonthSummary {
        total_workouts,
        personal_bests,
        days_in_month: days_in_month(year, month).unwrap_or(0),
    }
}

/// `b{block}_{exercise}`, e.g. `b1_a`.
pub fn slot_key(block: BlockNumber, exercise: char) -> String {
    format!("b{block}_{exercise}")
}

fn update_best(bests: &mut BTreeMap<String, ExerciseSet>, key: String, sets: &[ExerciseSet]) {
    for set in sets {
        match bests.get(&key) {
            Some(best) if !set.beats(best) => {}
            _ => {
                bests.insert(key.clone(), *set);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
    }

    fn entry(block: BlockNumber, date: DateTime<Utc>, a: ExerciseSet, b: ExerciseSet) -> WorkoutEntry {
        WorkoutEntry {
            completed: true,
            block_number: block,
            exercise_a: vec![a; 3],
            exercise_b: vec![b; 3],
            date,
            duration: None,
        }
    }

    fn key(date: DateTime<Utc>) -> String {
        format!("{}-{}-{}", date.year(), date.month(), date.day())
    }

    fn insert(data: &mut ProgressData, item: WorkoutEntry) {
        data.insert(key(item.date), item);
    }

    #[test]
    fn previous_stats_defaults_for_untouched_blocks() {
        let mut data = ProgressData::new();
        insert(
            &mut data,
            entry(BlockNumber::Two, at(2026, 1, 3), ExerciseSet::new(30.0, 12), ExerciseSet::new(20.0, 15)),
        );

        let stats = previous_stats(&data);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[&BlockNumber::One], default_block_stats());
        assert_eq!(stats[&BlockNumber::Three].exercise_b, vec![ExerciseSet::new(0.0, 20); 3]);
        assert_eq!(stats[&BlockNumber::Two].exercise_a[0], ExerciseSet::new(30.0, 12));
    }

    #[test]
    fn previous_stats_takes_most_recent_not_heaviest() {
        let mut data = ProgressData::new();
        insert(
            &mut data,
            entry(BlockNumber::One, at(2026, 1, 1), ExerciseSet::new(50.0, 10), ExerciseSet::new(50.0, 10)),
        );
        insert(
            &mut data,
            entry(BlockNumber::One, at(2026, 1, 5), ExerciseSet::new(55.0, 8), ExerciseSet::new(55.0, 8)),
        );

        let stats = previous_stats(&data);
        assert_eq!(stats[&BlockNumber::One].exercise_a, vec![ExerciseSet::new(55.0, 8); 3]);
    }

    #[test]
    fn previous_stats_orders_by_timestamp_not_key() {
        // "2026-1-10" sorts before "2026-1-9" as a string.
        let mut data = ProgressData::new();
        insert(
            &mut data,
            entry(BlockNumber::Three, at(2026, 1, 10), ExerciseSet::new(70.0, 5), ExerciseSet::new(1.0, 1)),
        );
        insert(
            &mut data,
            entry(BlockNumber::Three, at(2026, 1, 9), ExerciseSet::new(90.0, 5), ExerciseSet::new(1.0, 1)),
        );

        let stats = previous_stats(&data);
        assert_eq!(stats[&BlockNumber::Three].exercise_a[0].weight, 70.0);
    }

    #[test]
    fn previous_stats_equal_timestamps_pick_last_key() {
        let same = at(2026, 1, 1);
        let mut data = ProgressData::new();
        data.insert(
            "2026-1-1".to_string(),
            entry(BlockNumber::One, same, ExerciseSet::new(1.0, 1), ExerciseSet::new(1.0, 1)),
        );
        data.insert(
            "2026-1-2".to_string(),
            entry(BlockNumber::One, same, ExerciseSet::new(2.0, 1), ExerciseSet::new(2.0, 1)),
        );

        let stats = previous_stats(&data);
        assert_eq!(stats[&BlockNumber::One].exercise_a, vec![ExerciseSet::new(2.0, 1); 3]);
    }

    #[test]
    fn previous_stats_skips_uncompleted() {
        let mut data = ProgressData::new();
        let mut pending = entry(BlockNumber::One, at(2026, 2, 1), ExerciseSet::new(99.0, 1), ExerciseSet::new(99.0, 1));
        pending.completed = false;
        insert(&mut data, pending);

        assert_eq!(previous_stats(&data)[&BlockNumber::One], default_block_stats());
    }

    #[test]
    fn personal_best_breaks_weight_tie_on_reps() {
        let mut data = ProgressData::new();
        insert(
            &mut data,
            entry(BlockNumber::One, at(2026, 1, 2), ExerciseSet::new(60.0, 8), ExerciseSet::new(20.0, 10)),
        );
        insert(
            &mut data,
            entry(BlockNumber::One, at(2026, 1, 4), ExerciseSet::new(60.0, 10), ExerciseSet::new(20.0, 9)),
        );

        let summary = month_summary_in(&data, 2026, 1, &Utc);
        assert_eq!(summary.personal_bests["b1_a"], ExerciseSet::new(60.0, 10));
        assert_eq!(summary.personal_bests["b1_b"], ExerciseSet::new(20.0, 10));
        assert!(!summary.personal_bests.contains_key("b2_a"));
    }

    #[test]
    fn personal_bests_span_all_months() {
        let mut data = ProgressData::new();
        insert(
            &mut data,
            entry(BlockNumber::Two, at(2025, 11, 20), ExerciseSet::new(80.0, 6), ExerciseSet::new(40.0, 10)),
        );
        insert(
            &mut data,
            entry(BlockNumber::Two, at(2026, 1, 7), ExerciseSet::new(75.0, 8), ExerciseSet::new(42.5, 10)),
        );
        insert(
            &mut data,
            entry(BlockNumber::Three, at(2026, 1, 9), ExerciseSet::new(30.0, 15), ExerciseSet::new(10.0, 15)),
        );

        let january = month_summary_in(&data, 2026, 1, &Utc);
        let november = month_summary_in(&data, 2025, 11, &Utc);
        let march = month_summary_in(&data, 2026, 3, &Utc);

        assert_eq!(january.total_workouts, 2);
        assert_eq!(november.total_workouts, 1);
        assert_eq!(march.total_workouts, 0);
        assert_eq!(january.days_in_month, 31);
        assert_eq!(november.days_in_month, 30);

        assert_eq!(january.personal_bests, november.personal_bests);
        assert_eq!(january.personal_bests, march.personal_bests);
        assert_eq!(january.personal_bests["b2_a"], ExerciseSet::new(80.0, 6));
        assert_eq!(january.personal_bests["b2_b"], ExerciseSet::new(42.5, 10));
    }

    #[test]
    fn personal_bests_never_decrease_as_history_grows() {
        let sessions = [
            (at(2026, 1, 1), 40.0, 10),
            (at(2026, 1, 3), 45.0, 8),
            (at(2026, 1, 5), 42.5, 12),
            (at(2026, 1, 7), 45.0, 9),
            (at(2026, 1, 9), 30.0, 20),
        ];

        let mut data = ProgressData::new();
        let mut previous: Option<ExerciseSet> = None;
        for (date, weight, reps) in sessions {
            let set = ExerciseSet::new(weight, reps);
            insert(&mut data, entry(BlockNumber::One, date, set, set));
            let best = month_summary_in(&data, 2026, 1, &Utc).personal_bests["b1_a"];
            if let Some(prev) = previous {
                assert!(!prev.beats(&best), "{best:?} regressed from {prev:?}");
            }
            previous = Some(best);
        }
        assert_eq!(previous, Some(ExerciseSet::new(45.0, 9)));
    }

    #[test]
    fn month_count_uses_given_zone() {
        use chrono::FixedOffset;

        // 23:30 UTC on Jan 31 is already Feb 1 at UTC+2.
        let mut data = ProgressData::new();
        let late = Utc.with_ymd_and_hms(2026, 1, 31, 23, 30, 0).unwrap();
        data.insert(
            "2026-2-1".to_string(),
            entry(BlockNumber::One, late, ExerciseSet::new(1.0, 1), ExerciseSet::new(1.0, 1)),
        );

        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(month_summary_in(&data, 2026, 2, &east).total_workouts, 1);
        assert_eq!(month_summary_in(&data, 2026, 1, &Utc).total_workouts, 1);
    }
}
