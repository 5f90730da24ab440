// handlers/public/auth/login.rs - POST /user/sign-in handler

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse};
use crate::services::CredentialStore;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[serde(alias = "Nama")]
    #[validate(length(min = 1, message = "Username is required"))]
    pub nama: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub expires_in: i64,
}

/// POST /user/sign-in - Verify credentials and start a cookie session
///
/// Expected Input:
/// ```json
/// { "nama": "alice", "password": "Secret123!" }
/// ```
///
/// Expected Output (Success, plus `Set-Cookie: token=...; HttpOnly`):
/// ```json
/// {
///   "success": true,
///   "data": { "user_id": 1, "username": "alice", "role": "student", "expires_in": 900 }
/// }
/// ```
///
/// Unknown user and wrong password both answer 401 with the same message,
/// and no cookie is set.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<SignInRequest>,
) -> Result<(CookieJar, ApiResponse<SignInResponse>), ApiError> {
    payload.validate()?;

    let verified = match CredentialStore::new(state.store.as_ref())
        .verify(&payload.nama, &payload.password)
        .await
    {
        Ok(verified) => verified,
        Err(e) => {
            tracing::warn!("Sign-in failed");
            return Err(e.into());
        }
    };

    let claims = state
        .codec
        .claims_for(verified.user_id, &verified.username, verified.role, Utc::now());
    let token = state.codec.encode(&claims)?;
    let jar = state.carrier.attach(jar, token, state.codec.ttl());

    tracing::info!("User {} signed in as {}", verified.user_id, verified.role);

    Ok((
        jar,
        ApiResponse::success(SignInResponse {
            user_id: verified.user_id,
            username: verified.username,
            role: verified.role,
            expires_in: state.codec.ttl().num_seconds(),
        }),
    ))
}
