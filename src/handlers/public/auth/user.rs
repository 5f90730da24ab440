// handlers/public/auth/user.rs - GET /user/list-teacher handler

use axum::extract::State;
use serde::Serialize;

use crate::auth::Role;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Public view of a teacher; no email.
#[derive(Debug, Serialize)]
pub struct TeacherSummary {
    pub user_id: i32,
    pub nama: String,
    pub photo: Option<String>,
}

impl From<User> for TeacherSummary {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            nama: user.name,
            photo: user.photo,
        }
    }
}

/// GET /user/list-teacher - Teachers visible on the public site
pub async fn list_teacher(State(state): State<AppState>) -> ApiResult<Vec<TeacherSummary>> {
    let teachers = state.store.list_users(Some(Role::Teacher)).await?;
    Ok(ApiResponse::success(teachers.into_iter().map(TeacherSummary::from).collect()))
}
