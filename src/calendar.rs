//! Per-day calendar state derived from the progress map.

use crate::models::{CalendarMonth, DayState, ProgressData};
use chrono::{Datelike, Duration, Local, NaiveDate};

/// `"{year}-{month}-{day}"` without zero padding, e.g. `2026-3-7`.
pub fn date_key(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

pub fn previous_date_key(date: NaiveDate) -> String {
    date_key(date - Duration::days(1))
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = shift_month(year, month, 1);
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((next - first).num_days() as u32)
}

/// Moves `delta` months from (year, month), wrapping across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn day_state(date: NaiveDate, progress: &ProgressData) -> DayState {
    day_state_at(today(), date, progress)
}

pub fn day_state_at(today: NaiveDate, date: NaiveDate, progress: &ProgressData) -> DayState {
    let key = date_key(date);
    let entry = progress.get(&key);
    let is_completed = entry.is_some_and(|entry| entry.completed);
    let previous_completed = progress
        .get(&previous_date_key(date))
        .is_some_and(|entry| entry.completed);

    DayState {
        date: date.to_string(),
        day: date.day(),
        key,
        is_today: date == today,
        is_completed,
        is_rest_day: !is_completed && previous_completed,
        block_number: entry.map(|entry| entry.block_number),
    }
}

pub fn calendar_month(year: i32, month: u32, progress: &ProgressData) -> Option<CalendarMonth> {
    calendar_month_at(today(), year, month, progress)
}

/// The month grid: Sunday-first blanks followed by every day's state.
pub fn calendar_month_at(
    today: NaiveDate,
    year: i32,
    month: u32,
    progress: &ProgressData,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_in_month = days_in_month(year, month)?;

    let days = first
        .iter_days()
        .take(days_in_month as usize)
        .map(|date| day_state_at(today, date, progress))
        .collect();

    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days_in_month,
        days,
    })
}
