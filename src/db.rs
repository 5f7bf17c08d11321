use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{DairyError, DairyResult};

pub type DbPool = Pool<Sqlite>;

/// The store is a single SQLite file. One connection means every bridge
/// call runs as a short serialized transaction; there is no multi-writer
/// coordination to get wrong.
pub async fn init_pool_with_options(opts: SqliteConnectOptions) -> DairyResult<DbPool> {
    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(opts)
        .await?)
}

pub async fn init_pool(database_url: &str) -> DairyResult<DbPool> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DairyError::Internal(format!("Invalid DB URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(10));

    init_pool_with_options(opts).await
}

pub async fn init_database(pool: &DbPool) -> DairyResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    ensure_seeds(pool).await?;
    Ok(())
}

/// First-run seed data: one admin credential, sample farmers, the shift
/// singleton and the two default rate categories.
async fn ensure_seeds(pool: &DbPool) -> DairyResult<()> {
    let admin_exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind("admin")
        .fetch_one(pool)
        .await
        .unwrap_or((0,));
    if admin_exists.0 == 0 {
        let hash = bcrypt::hash("12345", bcrypt::DEFAULT_COST)?;
        sqlx::query("INSERT OR IGNORE INTO users (username, password_hash) VALUES (?, ?)")
            .bind("admin")
            .bind(hash)
            .execute(pool)
            .await?;
    }

    let sample_farmers = [
        ("F001", "Suresh Patil", "A"),
        ("F002", "Ramesh Gaikwad", "B"),
        ("F003", "Maya Chavan", "C"),
    ];
    for (code, name, category) in sample_farmers {
        sqlx::query("INSERT OR IGNORE INTO farmers (code, name, category) VALUES (?, ?, ?)")
            .bind(code)
            .bind(name)
            .bind(category)
            .execute(pool)
            .await?;
    }

    sqlx::query(
        "INSERT OR IGNORE INTO shift_tracker (id, current_shift, shift_date) VALUES (1, 'Morning', date('now'))",
    )
    .execute(pool)
    .await?;

    let default_rates = [("Cow", 20.0, 5.0, 3.0), ("Buffalo", 25.0, 6.5, 3.5)];
    for (category, base, fat_rate, snf_rate) in default_rates {
        sqlx::query(
            "INSERT OR IGNORE INTO rate_table (category, base, fat_rate, snf_rate) VALUES (?, ?, ?, ?)",
        )
        .bind(category)
        .bind(base)
        .bind(fat_rate)
        .bind(snf_rate)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Farmer {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: Option<String>,
}

/// A priced shift entry. `farmer_name`/`category` are a snapshot taken at
/// insert time; listings fall back to the live farmers table for rows
/// saved before the farmer was registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MilkRecord {
    pub id: i64,
    pub rec_date: String,
    pub farmer_code: Option<String>,
    pub farmer_name: Option<String>,
    pub category: Option<String>,
    pub shift: Option<String>,
    pub litres: f64,
    pub fat: f64,
    pub snf: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RateEntry {
    pub id: i64,
    pub category: String,
    pub base: f64,
    pub fat_rate: f64,
    pub snf_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Advance {
    pub id: i64,
    pub farmer_code: Option<String>,
    pub date: Option<String>,
    pub amount: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SaleRecord {
    pub id: i64,
    pub sale_date: Option<String>,
    pub customer: Option<String>,
    pub litres: f64,
    pub rate: f64,
    pub amount: f64,
}
