use crate::commands::MessageResponse;
use crate::error::{DairyError, DairyResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct SaveFileInput {
    pub content: String,
    pub filename: String,
    pub filetype: String, // "csv" or "pdf"
}

fn export_dir() -> PathBuf {
    PathBuf::from(std::env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".to_string()))
}

/// Decodes the payload and writes it under the export directory. The GUI
/// shell owns the actual save dialog; this is the write half it calls
/// with the confirmed name.
pub fn save_file_internal(input: SaveFileInput) -> DairyResult<PathBuf> {
    if input.content.is_empty() {
        return Err(DairyError::Validation("No content provided".to_string()));
    }
    let filename = input.filename.trim();
    if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
        return Err(DairyError::Validation("Invalid filename".to_string()));
    }

    // Data URIs carry base64 after the first comma; anything else is
    // written as UTF-8 text.
    let bytes = if let Some(rest) = input.content.strip_prefix("data:") {
        let encoded = rest
            .split_once(',')
            .map(|(_, enc)| enc)
            .ok_or_else(|| DairyError::Validation("Malformed data URI".to_string()))?;
        STANDARD.decode(encoded)?
    } else {
        input.content.into_bytes()
    };

    let mut path = export_dir();
    std::fs::create_dir_all(&path)?;

    let default_ext = if input.filetype == "csv" { "csv" } else { "pdf" };
    path.push(filename);
    if path.extension().is_none() {
        path.set_extension(default_ext);
    }

    std::fs::write(&path, bytes)?;
    tracing::info!("Saved file: {}", path.display());
    Ok(path)
}

// --- Axum handler ---

pub async fn save_file(
    State(_state): State<AppState>,
    Json(input): Json<SaveFileInput>,
) -> DairyResult<Json<MessageResponse>> {
    let path = save_file_internal(input)?;
    Ok(Json(MessageResponse::ok(format!(
        "Saved to {}",
        path.display()
    ))))
}
