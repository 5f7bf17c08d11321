use crate::db::DbPool;
use crate::error::{DairyError, DairyResult};
use crate::pricing::next_shift;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShiftStatus {
    pub success: bool,
    pub shift: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct ShiftChanged {
    pub success: bool,
    pub shift: String,
    pub message: String,
}

pub async fn get_current_shift_internal(pool: &DbPool) -> DairyResult<(String, String)> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT current_shift, shift_date FROM shift_tracker WHERE id = 1")
            .fetch_optional(pool)
            .await?;

    row.ok_or_else(|| DairyError::NotFound("Shift not found".to_string()))
}

/// Toggles the singleton shift row Morning ⇄ Evening and stamps today's
/// date. Read and write share one transaction so two racing toggles
/// cannot both observe the same starting shift.
pub async fn start_new_shift_internal(pool: &DbPool) -> DairyResult<String> {
    let mut tx = pool.begin().await?;

    let current: Option<String> =
        sqlx::query_scalar("SELECT current_shift FROM shift_tracker WHERE id = 1")
            .fetch_optional(&mut *tx)
            .await?;
    let current = current.ok_or_else(|| DairyError::NotFound("Shift not found".to_string()))?;

    let new_shift = next_shift(&current);
    sqlx::query("UPDATE shift_tracker SET current_shift = ?, shift_date = date('now') WHERE id = 1")
        .bind(new_shift)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(new_shift.to_string())
}

// --- Axum handlers ---

pub async fn get_current_shift(State(state): State<AppState>) -> DairyResult<Json<ShiftStatus>> {
    let (shift, date) = get_current_shift_internal(&state.pool).await?;
    Ok(Json(ShiftStatus {
        success: true,
        shift,
        date,
    }))
}

pub async fn start_new_shift(State(state): State<AppState>) -> DairyResult<Json<ShiftChanged>> {
    let shift = start_new_shift_internal(&state.pool).await?;
    Ok(Json(ShiftChanged {
        success: true,
        shift,
        message: "Shift changed".to_string(),
    }))
}
