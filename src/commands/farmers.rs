use crate::commands::MessageResponse;
use crate::db::{DbPool, Farmer};
use crate::error::{DairyError, DairyResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct FarmersResponse {
    pub success: bool,
    pub farmers: Vec<Farmer>,
}

#[derive(Debug, Serialize)]
pub struct FarmerResponse {
    pub success: bool,
    pub farmer: Farmer,
}

#[derive(Debug, Deserialize)]
pub struct AddFarmerInput {
    pub code: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFarmerInput {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct FarmerByCodeInput {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteFarmerInput {
    pub id: i64,
}

pub async fn get_all_farmers_internal(pool: &DbPool) -> DairyResult<Vec<Farmer>> {
    Ok(
        sqlx::query_as::<_, Farmer>("SELECT id, code, name, category FROM farmers ORDER BY id ASC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_farmer_by_code_internal(pool: &DbPool, code: String) -> DairyResult<Farmer> {
    let farmer = sqlx::query_as::<_, Farmer>(
        "SELECT id, code, name, category FROM farmers WHERE TRIM(code) = TRIM(?)",
    )
    .bind(&code)
    .fetch_optional(pool)
    .await?;

    farmer.ok_or_else(|| DairyError::NotFound(format!("No farmer with code '{}'", code)))
}

pub async fn add_farmer_internal(pool: &DbPool, input: AddFarmerInput) -> DairyResult<()> {
    if input.code.trim().is_empty() || input.name.trim().is_empty() || input.category.trim().is_empty()
    {
        return Err(DairyError::Validation("All fields required".to_string()));
    }

    sqlx::query("INSERT INTO farmers (code, name, category) VALUES (?, ?, ?)")
        .bind(input.code.trim())
        .bind(input.name.trim())
        .bind(input.category.trim())
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_farmer_internal(pool: &DbPool, input: UpdateFarmerInput) -> DairyResult<()> {
    if input.code.trim().is_empty() || input.name.trim().is_empty() || input.category.trim().is_empty()
    {
        return Err(DairyError::Validation("All fields required".to_string()));
    }

    let result = sqlx::query("UPDATE farmers SET code = ?, name = ?, category = ? WHERE id = ?")
        .bind(input.code.trim())
        .bind(input.name.trim())
        .bind(input.category.trim())
        .bind(input.id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DairyError::NotFound("Farmer not found".to_string()));
    }
    Ok(())
}

/// Removing a farmer leaves its milk records in place; they keep their
/// snapshot name and are displayed as orphans thereafter.
pub async fn delete_farmer_internal(pool: &DbPool, id: i64) -> DairyResult<()> {
    let result = sqlx::query("DELETE FROM farmers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DairyError::NotFound("Farmer not found".to_string()));
    }
    Ok(())
}

// --- Axum handlers ---

pub async fn get_all_farmers(State(state): State<AppState>) -> DairyResult<Json<FarmersResponse>> {
    let farmers = get_all_farmers_internal(&state.pool).await?;
    Ok(Json(FarmersResponse {
        success: true,
        farmers,
    }))
}

pub async fn get_farmer_by_code(
    State(state): State<AppState>,
    Json(input): Json<FarmerByCodeInput>,
) -> DairyResult<Json<FarmerResponse>> {
    let farmer = get_farmer_by_code_internal(&state.pool, input.code).await?;
    Ok(Json(FarmerResponse {
        success: true,
        farmer,
    }))
}

pub async fn add_farmer(
    State(state): State<AppState>,
    Json(input): Json<AddFarmerInput>,
) -> DairyResult<Json<MessageResponse>> {
    add_farmer_internal(&state.pool, input).await?;
    Ok(Json(MessageResponse::ok("Farmer added")))
}

pub async fn update_farmer(
    State(state): State<AppState>,
    Json(input): Json<UpdateFarmerInput>,
) -> DairyResult<Json<MessageResponse>> {
    update_farmer_internal(&state.pool, input).await?;
    Ok(Json(MessageResponse::ok("Farmer updated")))
}

pub async fn delete_farmer(
    State(state): State<AppState>,
    Json(input): Json<DeleteFarmerInput>,
) -> DairyResult<Json<MessageResponse>> {
    delete_farmer_internal(&state.pool, input.id).await?;
    Ok(Json(MessageResponse::ok("Farmer deleted")))
}
