use crate::commands::utils::{canonical_shift, require_date};
use crate::commands::MessageResponse;
use crate::db::{DbPool, MilkRecord};
use crate::error::{DairyError, DairyResult};
use crate::pricing;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SaveRecordInput {
    pub rec_date: String,
    pub farmer_code: String,
    pub shift: String,
    pub litres: f64,
    pub fat: f64,
    pub snf: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecordFilter {
    pub date: Option<String>,
    pub shift: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub success: bool,
    pub records: Vec<MilkRecord>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub farmers_count: i64,
    pub total_litres: f64,
    pub total_amount: f64,
    pub total_records: i64,
}

/// Validates and persists one shift entry. The rate and amount are stored
/// as supplied by the caller; the formula never overrides the operator.
pub async fn save_record_internal(pool: &DbPool, input: SaveRecordInput) -> DairyResult<()> {
    pricing::validate_fat(input.fat).map_err(DairyError::Validation)?;
    pricing::validate_snf(input.snf).map_err(DairyError::Validation)?;
    require_date("rec_date", &input.rec_date)?;
    let shift = canonical_shift(&input.shift)?;

    let mut tx = pool.begin().await?;

    // Snapshot the farmer identity at insert time. Unmatched codes are
    // tolerated and recorded as Unknown.
    let farmer: Option<(String, Option<String>)> =
        sqlx::query_as("SELECT name, category FROM farmers WHERE TRIM(code) = TRIM(?)")
            .bind(&input.farmer_code)
            .fetch_optional(&mut *tx)
            .await?;

    let (farmer_name, category) = match farmer {
        Some((name, category)) => (name, category.unwrap_or_else(|| "Unknown".to_string())),
        None => ("Unknown".to_string(), "Unknown".to_string()),
    };

    sqlx::query(
        "INSERT INTO milk_records
         (rec_date, farmer_code, farmer_name, category, shift, litres, fat, snf, rate, amount)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&input.rec_date)
    .bind(&input.farmer_code)
    .bind(&farmer_name)
    .bind(&category)
    .bind(shift)
    .bind(input.litres)
    .bind(input.fat)
    .bind(input.snf)
    .bind(input.rate)
    .bind(input.amount)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn fetch_records_internal(
    pool: &DbPool,
    date: Option<String>,
    shift: Option<String>,
) -> DairyResult<Vec<MilkRecord>> {
    let date = date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
    let shift = shift.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let mut sql = r#"
        SELECT
            m.id,
            m.rec_date,
            m.farmer_code,
            COALESCE(m.farmer_name, f.name) AS farmer_name,
            COALESCE(m.category, f.category) AS category,
            m.shift,
            m.litres,
            m.fat,
            m.snf,
            m.rate,
            m.amount
        FROM milk_records m
        LEFT JOIN farmers f ON TRIM(m.farmer_code) = TRIM(f.code)
        WHERE 1=1
    "#
    .to_string();

    if date.is_some() {
        sql.push_str(" AND m.rec_date = ?");
    }
    if shift.is_some() {
        sql.push_str(" AND LOWER(m.shift) = LOWER(?)");
    }
    sql.push_str(" ORDER BY m.rec_date DESC, m.id DESC LIMIT 500");

    let mut query = sqlx::query_as::<_, MilkRecord>(&sql);
    if let Some(d) = &date {
        query = query.bind(d.clone());
    }
    if let Some(s) = &shift {
        query = query.bind(s.clone());
    }

    let records = query.fetch_all(pool).await?;
    tracing::debug!("fetch_records returned {} record(s)", records.len());
    Ok(records)
}

pub async fn get_summary_internal(
    pool: &DbPool,
    date: String,
    shift: Option<String>,
) -> DairyResult<SummaryResponse> {
    let shift = shift.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let mut tx = pool.begin().await?;

    let farmers_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM farmers")
        .fetch_one(&mut *tx)
        .await?;

    let mut sql = "SELECT CAST(COALESCE(SUM(litres), 0) AS REAL), \
                   CAST(COALESCE(SUM(amount), 0) AS REAL), \
                   COUNT(*) \
                   FROM milk_records WHERE rec_date = ?"
        .to_string();
    if shift.is_some() {
        sql.push_str(" AND LOWER(shift) = LOWER(?)");
    }

    let mut query = sqlx::query_as::<_, (f64, f64, i64)>(&sql).bind(&date);
    if let Some(s) = &shift {
        query = query.bind(s.clone());
    }
    let (total_litres, total_amount, total_records) = query.fetch_one(&mut *tx).await?;

    tx.commit().await?;

    Ok(SummaryResponse {
        success: true,
        farmers_count,
        total_litres,
        total_amount,
        total_records,
    })
}

// --- Axum handlers ---

pub async fn save_record(
    State(state): State<AppState>,
    Json(input): Json<SaveRecordInput>,
) -> DairyResult<Json<MessageResponse>> {
    save_record_internal(&state.pool, input).await?;
    Ok(Json(MessageResponse::ok("Record saved successfully")))
}

pub async fn fetch_records(
    State(state): State<AppState>,
    Json(filter): Json<RecordFilter>,
) -> DairyResult<Json<RecordsResponse>> {
    let records = fetch_records_internal(&state.pool, filter.date, filter.shift).await?;
    Ok(Json(RecordsResponse {
        success: true,
        records,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SummaryInput {
    pub date: String,
    pub shift: Option<String>,
}

pub async fn get_summary(
    State(state): State<AppState>,
    Json(input): Json<SummaryInput>,
) -> DairyResult<Json<SummaryResponse>> {
    let summary = get_summary_internal(&state.pool, input.date, input.shift).await?;
    Ok(Json(summary))
}
