use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/farmers", get(commands::farmers::get_all_farmers))
        .route(
            "/api/farmers/by-code",
            post(commands::farmers::get_farmer_by_code),
        )
        .route("/api/farmers/add", post(commands::farmers::add_farmer))
        .route("/api/farmers/update", post(commands::farmers::update_farmer))
        .route("/api/farmers/delete", post(commands::farmers::delete_farmer))
}
