// handlers/protected/account.rs - caller's own account (any signed-in role)

use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::Role;
use crate::database::models::{ProfileUpdate, User};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, RequestIdentity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[serde(alias = "Nama")]
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub nama: String,
    #[serde(alias = "Email")]
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user_id: i32,
    pub role: Role,
}

/// GET /user/user-info - Caller's stored profile
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": {
///     "user_id": 1,
///     "nama": "alice",
///     "email": "alice@example.com",
///     "role": "student",
///     "photo": null,
///     "created_at": "2025-01-01T00:00:00Z"
///   }
/// }
/// ```
pub async fn user_info(State(state): State<AppState>, identity: RequestIdentity) -> ApiResult<User> {
    state
        .store
        .find_user_by_id(identity.user_id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// PUT /user/profile - Update the caller's name and email
///
/// The user id comes from the session, so a caller can only edit itself.
/// The session keeps the old username until the next sign-in.
pub async fn update_profile(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(payload): ApiJson<ProfileRequest>,
) -> ApiResult<User> {
    payload.validate()?;

    let user = state
        .store
        .update_profile(
            identity.user_id,
            ProfileUpdate {
                name: payload.nama,
                email: payload.email,
            },
        )
        .await?;
    Ok(ApiResponse::success(user))
}

/// GET /auth/get-user-info - Identity as carried by the session token
pub async fn get_user_info(identity: RequestIdentity) -> ApiResponse<SessionInfo> {
    ApiResponse::success(SessionInfo {
        user_id: identity.user_id,
        role: identity.role,
    })
}
