use crate::commands;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/billing/individual",
            post(commands::billing::get_individual_bill),
        )
        .route(
            "/api/billing/generate",
            post(commands::billing::generate_bill),
        )
}
