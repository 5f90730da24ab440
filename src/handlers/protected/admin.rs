// handlers/protected/admin.rs - /admin/* handlers (admins only)

use axum::extract::State;

use crate::auth::Role;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /admin/all-user
pub async fn all_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.store.list_users(None).await?))
}

/// GET /admin/list-teacher
pub async fn list_teachers(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.store.list_users(Some(Role::Teacher)).await?))
}

/// GET /admin/list-student
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.store.list_users(Some(Role::Student)).await?))
}
