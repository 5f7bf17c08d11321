use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/advances", get(commands::advances::get_all_advances))
        .route("/api/advances/add", post(commands::advances::add_advance))
        .route(
            "/api/advances/delete",
            post(commands::advances::delete_advance),
        )
}
