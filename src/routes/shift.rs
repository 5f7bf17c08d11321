use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shift/current", get(commands::shift::get_current_shift))
        .route("/api/shift/next", post(commands::shift::start_new_shift))
}
