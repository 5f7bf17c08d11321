use crate::commands::utils::require_date;
use crate::commands::MessageResponse;
use crate::db::{Advance, DbPool};
use crate::error::{DairyError, DairyResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct AdvancesResponse {
    pub success: bool,
    pub advances: Vec<Advance>,
}

#[derive(Debug, Deserialize)]
pub struct AddAdvanceInput {
    pub farmer_code: String,
    pub date: String,
    pub amount: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAdvanceInput {
    pub id: i64,
}

pub async fn get_all_advances_internal(pool: &DbPool) -> DairyResult<Vec<Advance>> {
    Ok(sqlx::query_as::<_, Advance>(
        "SELECT id, farmer_code, date, amount, remarks FROM farmer_advances ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn add_advance_internal(pool: &DbPool, input: AddAdvanceInput) -> DairyResult<()> {
    if input.farmer_code.trim().is_empty() {
        return Err(DairyError::Validation("Farmer code required".to_string()));
    }
    require_date("date", &input.date)?;
    if input.amount <= 0.0 {
        return Err(DairyError::Validation(
            "Advance amount must be positive".to_string(),
        ));
    }

    sqlx::query("INSERT INTO farmer_advances (farmer_code, date, amount, remarks) VALUES (?, ?, ?, ?)")
        .bind(input.farmer_code.trim())
        .bind(&input.date)
        .bind(input.amount)
        .bind(&input.remarks)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_advance_internal(pool: &DbPool, id: i64) -> DairyResult<()> {
    let result = sqlx::query("DELETE FROM farmer_advances WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DairyError::NotFound("Advance not found".to_string()));
    }
    Ok(())
}

// --- Axum handlers ---

pub async fn get_all_advances(
    State(state): State<AppState>,
) -> DairyResult<Json<AdvancesResponse>> {
    let advances = get_all_advances_internal(&state.pool).await?;
    Ok(Json(AdvancesResponse {
        success: true,
        advances,
    }))
}

pub async fn add_advance(
    State(state): State<AppState>,
    Json(input): Json<AddAdvanceInput>,
) -> DairyResult<Json<MessageResponse>> {
    add_advance_internal(&state.pool, input).await?;
    Ok(Json(MessageResponse::ok("Advance recorded")))
}

pub async fn delete_advance(
    State(state): State<AppState>,
    Json(input): Json<DeleteAdvanceInput>,
) -> DairyResult<Json<MessageResponse>> {
    delete_advance_internal(&state.pool, input.id).await?;
    Ok(Json(MessageResponse::ok("Advance deleted")))
}
