use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sales", get(commands::sales::get_all_sales))
        .route("/api/sales/add", post(commands::sales::add_sale))
        .route("/api/sales/delete", post(commands::sales::delete_sale))
}
