use crate::state::AppState;
use axum::Router;

pub mod advances;
pub mod auth;
pub mod billing;
pub mod farmers;
pub mod files;
pub mod rates;
pub mod records;
pub mod reports;
pub mod sales;
pub mod shift;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(records::router())
        .merge(reports::router())
        .merge(billing::router())
        .merge(farmers::router())
        .merge(advances::router())
        .merge(sales::router())
        .merge(rates::router())
        .merge(shift::router())
        .merge(files::router())
}
