use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/previous-stats", get(handlers::get_previous_stats))
        .route(
            "/api/workouts/:date",
            get(handlers::get_draft)
                .put(handlers::put_workout)
                .delete(handlers::delete_workout),
        )
        .route(
            "/api/language",
            get(handlers::get_language).put(handlers::put_language),
        )
        .with_state(state)
}
