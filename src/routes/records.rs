use crate::commands;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/records/save", post(commands::records::save_record))
        .route("/api/records/fetch", post(commands::records::fetch_records))
        .route("/api/records/summary", post(commands::records::get_summary))
}
