use crate::commands;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/reports/generate",
            post(commands::reports::generate_report),
        )
        .route(
            "/api/reports/summary",
            post(commands::reports::get_reports_summary),
        )
}
