// handlers/public/auth/register.rs - POST /user/register handler

use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::auth::{hash_password, Role};
use crate::database::models::{NewUser, User};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(alias = "Nama")]
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub nama: String,
    #[serde(alias = "Email")]
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: String,
}

/// POST /user/register - Create a student or teacher account
///
/// Expected Input:
/// ```json
/// { "nama": "alice", "email": "alice@example.com", "password": "Secret123!", "role": "student" }
/// ```
///
/// Admin accounts cannot be self-registered. Duplicate name or email is a 409.
pub async fn register(State(state): State<AppState>, ApiJson(payload): ApiJson<RegisterRequest>) -> ApiResult<User> {
    payload.validate()?;

    let role: Role = payload
        .role
        .parse()
        .map_err(|e: crate::auth::UnknownRole| ApiError::bad_request(e.to_string()))?;
    if role == Role::Admin {
        return Err(ApiError::bad_request("Role must be student or teacher"));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to create account")
    })?;

    let user = state
        .store
        .create_user(NewUser {
            name: payload.nama,
            email: payload.email,
            password_hash,
            role,
        })
        .await?;

    tracing::info!("Registered user {} as {}", user.user_id, user.role);
    Ok(ApiResponse::created(user))
}
