use crate::commands::records::RecordsResponse;
use crate::commands::utils::require_date;
use crate::db::{DbPool, MilkRecord};
use crate::error::DairyResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ReportInput {
    pub from_date: String,
    pub to_date: String,
    pub shift: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportsSummaryInput {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReportsSummary {
    pub success: bool,
    pub milk_litres: f64,
    pub milk_amount: f64,
    pub sale_litres: f64,
    pub sale_amount: f64,
    pub total_advances: f64,
    pub net_income: f64,
}

pub async fn generate_report_internal(
    pool: &DbPool,
    from_date: String,
    to_date: String,
    shift: Option<String>,
) -> DairyResult<Vec<MilkRecord>> {
    require_date("from_date", &from_date)?;
    require_date("to_date", &to_date)?;

    // "all" is a sentinel for no shift filter.
    let shift = shift
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s.to_lowercase() != "all");

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
        WHERE m.rec_date BETWEEN ? AND ?
    "#
    .to_string();

    if shift.is_some() {
        sql.push_str(" AND LOWER(m.shift) = LOWER(?)");
    }
    sql.push_str(" ORDER BY m.rec_date ASC, m.id ASC");

    let mut query = sqlx::query_as::<_, MilkRecord>(&sql)
        .bind(&from_date)
        .bind(&to_date);
    if let Some(s) = &shift {
        query = query.bind(s.clone());
    }

    Ok(query.fetch_all(pool).await?)
}

/// Overall income for a period: milk intake plus independent sales,
/// net of farmer advances. One transaction, so the three aggregates are
/// a consistent snapshot.
pub async fn get_reports_summary_internal(
    pool: &DbPool,
    start_date: String,
    end_date: String,
) -> DairyResult<ReportsSummary> {
    require_date("start_date", &start_date)?;
    require_date("end_date", &end_date)?;

    let mut tx = pool.begin().await?;

    let (milk_litres, milk_amount): (f64, f64) = sqlx::query_as(
        "SELECT CAST(COALESCE(SUM(litres), 0) AS REAL), CAST(COALESCE(SUM(amount), 0) AS REAL)
         FROM milk_records WHERE rec_date BETWEEN ? AND ?",
    )
    .bind(&start_date)
    .bind(&end_date)
    .fetch_one(&mut *tx)
    .await?;

    let (sale_litres, sale_amount): (f64, f64) = sqlx::query_as(
        "SELECT CAST(COALESCE(SUM(litres), 0) AS REAL), CAST(COALESCE(SUM(amount), 0) AS REAL)
         FROM sales_records WHERE sale_date BETWEEN ? AND ?",
    )
    .bind(&start_date)
    .bind(&end_date)
    .fetch_one(&mut *tx)
    .await?;

    let total_advances: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(amount), 0) AS REAL)
         FROM farmer_advances WHERE date BETWEEN ? AND ?",
    )
    .bind(&start_date)
    .bind(&end_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ReportsSummary {
        success: true,
        milk_litres,
        milk_amount,
        sale_litres,
        sale_amount,
        total_advances,
        net_income: (milk_amount + sale_amount) - total_advances,
    })
}

// --- Axum handlers ---

pub async fn generate_report(
    State(state): State<AppState>,
    Json(input): Json<ReportInput>,
) -> DairyResult<Json<RecordsResponse>> {
    let records =
        generate_report_internal(&state.pool, input.from_date, input.to_date, input.shift).await?;
    Ok(Json(RecordsResponse {
        success: true,
        records,
    }))
}

pub async fn get_reports_summary(
    State(state): State<AppState>,
    Json(input): Json<ReportsSummaryInput>,
) -> DairyResult<Json<ReportsSummary>> {
    let summary =
        get_reports_summary_internal(&state.pool, input.start_date, input.end_date).await?;
    Ok(Json(summary))
}
