use crate::commands::utils::require_date;
use crate::db::{DbPool, MilkRecord};
use crate::error::DairyResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct IndividualBillInput {
    pub code: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct IndividualBill {
    pub success: bool,
    pub records: Vec<MilkRecord>,
    pub total_litres: f64,
    pub total_amount: f64,
    pub total_advance: f64,
    pub net: f64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateBillInput {
    pub start_date: String,
    pub end_date: String,
    pub bill_type: String, // weekly or monthly
}

/// One settlement line per registered farmer. Farmers with no activity in
/// the period appear with zero sums.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct BillLine {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub litres: f64,
    pub amount: f64,
    pub advance: f64,
    pub net: f64,
}

#[derive(Debug, Serialize)]
pub struct BillRunResponse {
    pub success: bool,
    pub bills: Vec<BillLine>,
    pub bill_type: String,
}

/// Settlement for one farmer over a period: milk income minus advances,
/// with the supporting record list.
pub async fn get_individual_bill_internal(
    pool: &DbPool,
    code: String,
    start_date: String,
    end_date: String,
) -> DairyResult<IndividualBill> {
    require_date("start_date", &start_date)?;
    require_date("end_date", &end_date)?;

    let mut tx = pool.begin().await?;

    let records = sqlx::query_as::<_, MilkRecord>(
        "SELECT id, rec_date, farmer_code, farmer_name, category, shift,
                litres, fat, snf, rate, amount
         FROM milk_records
         WHERE farmer_code = ? AND rec_date BETWEEN ? AND ?
         ORDER BY rec_date ASC, id ASC",
    )
    .bind(&code)
    .bind(&start_date)
    .bind(&end_date)
    .fetch_all(&mut *tx)
    .await?;

    let (total_litres, total_amount): (f64, f64) = sqlx::query_as(
        "SELECT CAST(COALESCE(SUM(litres), 0) AS REAL), CAST(COALESCE(SUM(amount), 0) AS REAL)
         FROM milk_records WHERE farmer_code = ? AND rec_date BETWEEN ? AND ?",
    )
    .bind(&code)
    .bind(&start_date)
    .bind(&end_date)
    .fetch_one(&mut *tx)
    .await?;

    let total_advance: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(amount), 0) AS REAL)
         FROM farmer_advances WHERE farmer_code = ? AND date BETWEEN ? AND ?",
    )
    .bind(&code)
    .bind(&start_date)
    .bind(&end_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(IndividualBill {
        success: true,
        records,
        total_litres,
        total_amount,
        total_advance,
        net: total_amount - total_advance,
    })
}

/// Bulk billing run over every registered farmer. The whole scan is one
/// statement, so a record saved mid-run cannot split a farmer's sums.
pub async fn generate_bill_internal(
    pool: &DbPool,
    start_date: String,
    end_date: String,
) -> DairyResult<Vec<BillLine>> {
    require_date("start_date", &start_date)?;
    require_date("end_date", &end_date)?;

    let sql = r#"
        SELECT
            f.code,
            f.name,
            f.category,
            CAST(COALESCE((SELECT SUM(m.litres) FROM milk_records m
                WHERE m.farmer_code = f.code AND m.rec_date BETWEEN ?1 AND ?2), 0) AS REAL) AS litres,
            CAST(COALESCE((SELECT SUM(m.amount) FROM milk_records m
                WHERE m.farmer_code = f.code AND m.rec_date BETWEEN ?1 AND ?2), 0) AS REAL) AS amount,
            CAST(COALESCE((SELECT SUM(a.amount) FROM farmer_advances a
                WHERE a.farmer_code = f.code AND a.date BETWEEN ?1 AND ?2), 0) AS REAL) AS advance,
            CAST(COALESCE((SELECT SUM(m.amount) FROM milk_records m
                WHERE m.farmer_code = f.code AND m.rec_date BETWEEN ?1 AND ?2), 0)
                - COALESCE((SELECT SUM(a.amount) FROM farmer_advances a
                WHERE a.farmer_code = f.code AND a.date BETWEEN ?1 AND ?2), 0) AS REAL) AS net
        FROM farmers f
        ORDER BY f.id ASC
    "#;

    Ok(sqlx::query_as::<_, BillLine>(sql)
        .bind(&start_date)
        .bind(&end_date)
        .fetch_all(pool)
        .await?)
}

// --- Axum handlers ---

pub async fn get_individual_bill(
    State(state): State<AppState>,
    Json(input): Json<IndividualBillInput>,
) -> DairyResult<Json<IndividualBill>> {
    let bill =
        get_individual_bill_internal(&state.pool, input.code, input.start_date, input.end_date)
            .await?;
    Ok(Json(bill))
}

pub async fn generate_bill(
    State(state): State<AppState>,
    Json(input): Json<GenerateBillInput>,
) -> DairyResult<Json<BillRunResponse>> {
    let bills = generate_bill_internal(&state.pool, input.start_date, input.end_date).await?;
    Ok(Json(BillRunResponse {
        success: true,
        bills,
        bill_type: input.bill_type,
    }))
}
