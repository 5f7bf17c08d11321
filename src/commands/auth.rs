use crate::commands::MessageResponse;
use crate::db::{DbPool, User};
use crate::error::DairyResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

/// Credential check. A failed login is a normal `{success:false}` reply,
/// not an error response, and does not say whether the user or the
/// password was wrong.
pub async fn login_internal(pool: &DbPool, username: &str, password: &str) -> DairyResult<Option<User>> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Ok(None);
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) if verify(password, &user.password_hash).unwrap_or(false) => Ok(Some(user)),
        _ => Ok(None),
    }
}

pub async fn change_password_internal(
    pool: &DbPool,
    username: &str,
    old_password: &str,
    new_password: &str,
) -> DairyResult<bool> {
    if new_password.trim().is_empty() {
        return Ok(false);
    }

    let user = match login_internal(pool, username, old_password).await? {
        Some(user) => user,
        None => return Ok(false),
    };

    let hashed = hash(new_password, DEFAULT_COST)?;
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(hashed)
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(true)
}

// --- Axum handlers ---

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> DairyResult<Json<LoginResponse>> {
    match login_internal(&state.pool, &payload.username, &payload.password).await? {
        Some(user) => {
            if let Ok(mut session) = state.session.lock() {
                session.user_id = Some(user.id);
                session.username = Some(user.username.clone());
            }
            Ok(Json(LoginResponse {
                success: true,
                message: "Login successful!".to_string(),
            }))
        }
        None => Ok(Json(LoginResponse {
            success: false,
            message: "Invalid username or password!".to_string(),
        })),
    }
}

pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    if let Ok(mut session) = state.session.lock() {
        session.user_id = None;
        session.username = None;
    }
    Json(MessageResponse::ok("Logged out"))
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> DairyResult<Json<MessageResponse>> {
    let changed = change_password_internal(
        &state.pool,
        &payload.username,
        &payload.old_password,
        &payload.new_password,
    )
    .await?;

    if changed {
        Ok(Json(MessageResponse::ok("Password changed")))
    } else {
        Ok(Json(MessageResponse {
            success: false,
            message: "Invalid username or password!".to_string(),
        }))
    }
}
