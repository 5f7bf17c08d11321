use serde::Serialize;

pub mod advances;
pub mod auth;
pub mod billing;
pub mod farmers;
pub mod files;
pub mod rates;
pub mod records;
pub mod reports;
pub mod sales;
pub mod shift;
pub mod utils;

/// Success-or-message envelope used by write-style operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        MessageResponse {
            success: true,
            message: message.into(),
        }
    }
}
