use crate::calendar::{self, calendar_month};
use crate::errors::AppError;
use crate::i18n::{Language, persist_language};
use crate::models::{
    BlockNumber, CalendarMonth, DraftQuery, LanguagePayload, LanguageRequest, MonthQuery, MonthSummary,
    PreviousStats, ProgressData, SaveWorkoutRequest, SessionDraft, WorkoutEntry,
};
use crate::session::{clear_workout, draft_for, save_workout};
use crate::state::AppState;
use crate::stats::{month_summary, previous_stats};
use crate::ui::{IndexView, render_index};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Datelike, NaiveDate};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let (year, month) = resolve_month(&query)?;
    let language = *state.language.lock().await;
    let repo = state.progress.lock().await;
    let progress = repo.all();

    let calendar = month_view(year, month, progress)?;
    let view = IndexView {
        language,
        calendar: &calendar,
        summary: &month_summary(progress, year, month),
        previous: &previous_stats(progress),
    };
    Ok(Html(render_index(&view)))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressData> {
    let repo = state.progress.lock().await;
    Json(repo.all().clone())
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let (year, month) = resolve_month(&query)?;
    let repo = state.progress.lock().await;
    Ok(Json(month_view(year, month, repo.all())?))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthSummary>, AppError> {
    let (year, month) = resolve_month(&query)?;
    if calendar::days_in_month(year, month).is_none() {
        return Err(no_calendar(year, month));
    }
    let repo = state.progress.lock().await;
    Ok(Json(month_summary(repo.all(), year, month)))
}

pub async fn get_previous_stats(State(state): State<AppState>) -> Json<PreviousStats> {
    let repo = state.progress.lock().await;
    Json(previous_stats(repo.all()))
}

pub async fn get_draft(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<DraftQuery>,
) -> Result<Json<SessionDraft>, AppError> {
    let date = parse_date(&date)?;
    let block = query
        .block
        .map(BlockNumber::try_from)
        .transpose()
        .map_err(AppError::bad_request)?;

    let repo = state.progress.lock().await;
    let previous = previous_stats(repo.all());
    Ok(Json(draft_for(date, block, repo.all(), &previous)))
}

pub async fn put_workout(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<SaveWorkoutRequest>,
) -> Result<Json<WorkoutEntry>, AppError> {
    let date = parse_date(&date)?;
    let mut repo = state.progress.lock().await;
    let entry = save_workout(
        &mut repo,
        date,
        payload.block_number,
        payload.exercise_a,
        payload.exercise_b,
        payload.duration,
    )
    .await?;
    Ok(Json(entry))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    let date = parse_date(&date)?;
    let mut repo = state.progress.lock().await;
    clear_workout(&mut repo, date).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_language(State(state): State<AppState>) -> Json<LanguagePayload> {
    let language = *state.language.lock().await;
    Json(LanguagePayload { language })
}

pub async fn put_language(
    State(state): State<AppState>,
    Json(payload): Json<LanguageRequest>,
) -> Result<Json<LanguagePayload>, AppError> {
    let Some(language) = Language::from_code(&payload.language) else {
        return Err(AppError::bad_request("language must be one of en, ru, pl"));
    };

    let mut current = state.language.lock().await;
    *current = language;
    persist_language(&state.store, language).await?;

    Ok(Json(LanguagePayload { language }))
}

fn resolve_month(query: &MonthQuery) -> Result<(i32, u32), AppError> {
    let today = calendar::today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }
    Ok((year, month))
}

fn month_view(year: i32, month: u32, progress: &ProgressData) -> Result<CalendarMonth, AppError> {
    calendar_month(year, month, progress).ok_or_else(|| no_calendar(year, month))
}

fn no_calendar(year: i32, month: u32) -> AppError {
    AppError::bad_request(format!("no calendar for {year}-{month}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("expected a YYYY-MM-DD date, got {raw:?}")))
}
