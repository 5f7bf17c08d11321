use crate::commands::MessageResponse;
use crate::db::{DbPool, RateEntry};
use crate::error::{DairyError, DairyResult};
use crate::pricing;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub success: bool,
    pub rates: Vec<RateEntry>,
}

#[derive(Debug, Serialize)]
pub struct RateValueResponse {
    pub success: bool,
    pub rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRateInput {
    pub category: String,
    pub fat: f64,
    pub snf: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddRateInput {
    pub category: String,
    pub base: f64,
    pub fat_rate: f64,
    pub snf_rate: f64,
}


pub async fn get_rates_internal(pool: &DbPool) -> DairyResult<Vec<RateEntry>> {
    Ok(sqlx::query_as::<_, RateEntry>(
        "SELECT id, category, base, fat_rate, snf_rate FROM rate_table ORDER BY category",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn get_formula_internal(pool: &DbPool, category: &str) -> DairyResult<RateEntry> {
    let formula = sqlx::query_as::<_, RateEntry>(
        "SELECT id, category, base, fat_rate, snf_rate FROM rate_table WHERE category = ?",
    )
    .bind(category)
    .fetch_optional(pool)
    .await?;

    formula.ok_or_else(|| DairyError::NotFound(format!("No rate found for category '{}'", category)))
}

/// Formula price for the given readings. Advisory only: `save_record`
/// stores whatever rate the caller passes.
pub async fn calculate_rate_internal(
    pool: &DbPool,
    category: &str,
    fat: f64,
    snf: f64,
) -> DairyResult<f64> {
    let formula = get_formula_internal(pool, category).await?;
    Ok(pricing::compute_rate(&formula, fat, snf))
}

pub async fn add_rate_internal(pool: &DbPool, input: AddRateInput) -> DairyResult<()> {
    if input.category.trim().is_empty() {
        return Err(DairyError::Validation("Category required".to_string()));
    }

    // One formula per category: upsert on the unique key.
    sqlx::query(
        "INSERT INTO rate_table (category, base, fat_rate, snf_rate) VALUES (?, ?, ?, ?)
         ON CONFLICT(category) DO UPDATE SET
             base = excluded.base,
             fat_rate = excluded.fat_rate,
             snf_rate = excluded.snf_rate",
    )
    .bind(input.category.trim())
    .bind(input.base)
    .bind(input.fat_rate)
    .bind(input.snf_rate)
    .execute(pool)
    .await?;

    Ok(())
}

// Category is the unique key the front end works with, so deletion is
// keyed on it rather than the row id.
pub async fn delete_rate_internal(pool: &DbPool, category: &str) -> DairyResult<()> {
    let result = sqlx::query("DELETE FROM rate_table WHERE category = ?")
        .bind(category)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DairyError::NotFound(format!(
            "No rate found for category '{}'",
            category
        )));
    }
    Ok(())
}

// --- Axum handlers ---

pub async fn get_rates(State(state): State<AppState>) -> DairyResult<Json<RatesResponse>> {
    let rates = get_rates_internal(&state.pool).await?;
    Ok(Json(RatesResponse {
        success: true,
        rates,
    }))
}

/// The category's base price, used by the front end to pre-fill the rate
/// field when no readings are entered yet.
pub async fn get_rate_for_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> DairyResult<Json<RateValueResponse>> {
    let formula = get_formula_internal(&state.pool, &input.category).await?;
    Ok(Json(RateValueResponse {
        success: true,
        rate: formula.base,
    }))
}

pub async fn calculate_rate(
    State(state): State<AppState>,
    Json(input): Json<CalculateRateInput>,
) -> DairyResult<Json<RateValueResponse>> {
    let rate = calculate_rate_internal(&state.pool, &input.category, input.fat, input.snf).await?;
    Ok(Json(RateValueResponse {
        success: true,
        rate,
    }))
}

pub async fn add_rate(
    State(state): State<AppState>,
    Json(input): Json<AddRateInput>,
) -> DairyResult<Json<MessageResponse>> {
    add_rate_internal(&state.pool, input).await?;
    Ok(Json(MessageResponse::ok("Rate saved")))
}

pub async fn delete_rate(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> DairyResult<Json<MessageResponse>> {
    delete_rate_internal(&state.pool, &input.category).await?;
    Ok(Json(MessageResponse::ok("Rate deleted")))
}
