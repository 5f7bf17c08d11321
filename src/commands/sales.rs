use crate::commands::utils::require_date;
use crate::commands::MessageResponse;
use crate::db::{DbPool, SaleRecord};
use crate::error::{DairyError, DairyResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub success: bool,
    pub sales: Vec<SaleRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AddSaleInput {
    pub sale_date: String,
    pub customer: String,
    pub litres: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSaleInput {
    pub id: i64,
}

pub async fn get_all_sales_internal(pool: &DbPool) -> DairyResult<Vec<SaleRecord>> {
    Ok(sqlx::query_as::<_, SaleRecord>(
        "SELECT id, sale_date, customer, litres, rate, amount FROM sales_records ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn add_sale_internal(pool: &DbPool, input: AddSaleInput) -> DairyResult<()> {
    require_date("sale_date", &input.sale_date)?;
    if input.customer.trim().is_empty() {
        return Err(DairyError::Validation("Customer required".to_string()));
    }
    if input.litres <= 0.0 {
        return Err(DairyError::Validation("Litres must be positive".to_string()));
    }

    sqlx::query(
        "INSERT INTO sales_records (sale_date, customer, litres, rate, amount) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&input.sale_date)
    .bind(input.customer.trim())
    .bind(input.litres)
    .bind(input.rate)
    .bind(input.amount)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_sale_internal(pool: &DbPool, id: i64) -> DairyResult<()> {
    let result = sqlx::query("DELETE FROM sales_records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DairyError::NotFound("Sale not found".to_string()));
    }
    Ok(())
}

// --- Axum handlers ---

pub async fn get_all_sales(State(state): State<AppState>) -> DairyResult<Json<SalesResponse>> {
    let sales = get_all_sales_internal(&state.pool).await?;
    Ok(Json(SalesResponse {
        success: true,
        sales,
    }))
}

pub async fn add_sale(
    State(state): State<AppState>,
    Json(input): Json<AddSaleInput>,
) -> DairyResult<Json<MessageResponse>> {
    add_sale_internal(&state.pool, input).await?;
    Ok(Json(MessageResponse::ok("Sale recorded")))
}

pub async fn delete_sale(
    State(state): State<AppState>,
    Json(input): Json<DeleteSaleInput>,
) -> DairyResult<Json<MessageResponse>> {
    delete_sale_internal(&state.pool, input.id).await?;
    Ok(Json(MessageResponse::ok("Sale deleted")))
}
