use crate::db::DbPool;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub session: Arc<Mutex<SessionState>>, // Global session for single-user desktop usage
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        AppState {
            pool,
            session: Arc::new(Mutex::new(SessionState::default())),
        }
    }
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub user_id: Option<i64>,
    pub username: Option<String>,
}
