#![allow(dead_code)]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DairyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl DairyError {
    /// Stable machine-readable tag so the front end can branch on the
    /// failure class instead of parsing message text.
    pub fn kind(&self) -> &'static str {
        match self {
            DairyError::Database(_) | DairyError::Migration(_) => "persistence",
            DairyError::Auth(_) => "auth",
            DairyError::Validation(_) => "validation",
            DairyError::NotFound(_) => "not_found",
            DairyError::Io(_) => "io",
            _ => "internal",
        }
    }
}

pub type DairyResult<T> = Result<T, DairyError>;

impl IntoResponse for DairyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DairyError::Database(e) => {
                tracing::error!("Database Error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred.".to_string(),
                )
            }
            DairyError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            DairyError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DairyError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DairyError::Io(e) => {
                tracing::error!("IO Error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A file system error occurred.".to_string(),
                )
            }
            DairyError::Internal(msg) => {
                tracing::error!("Internal Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
            _ => {
                tracing::error!("Unhandled Error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unknown error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}
