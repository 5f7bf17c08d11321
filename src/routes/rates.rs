use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/rates", get(commands::rates::get_rates))
        .route(
            "/api/rates/for-category",
            post(commands::rates::get_rate_for_category),
        )
        .route("/api/rates/calculate", post(commands::rates::calculate_rate))
        .route("/api/rates/add", post(commands::rates::add_rate))
        .route("/api/rates/delete", post(commands::rates::delete_rate))
}
