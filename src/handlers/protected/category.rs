// handlers/protected/category.rs - /category/* handlers (teachers and admins)

use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::database::models::{Category, CategoryInput};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, RequestIdentity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub category_name: String,
    #[serde(default)]
    pub icon: String,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            category_name: req.category_name,
            icon: req.icon,
        }
    }
}

/// POST /category/create-category
///
/// Expected Input:
/// ```json
/// { "category_name": "Programming", "icon": "code" }
/// ```
pub async fn create_category(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(payload): ApiJson<CategoryRequest>,
) -> ApiResult<Category> {
    payload.validate()?;
    let category = state.store.create_category(payload.into()).await?;
    tracing::info!("User {} created category {}", identity.user_id, category.category_id);
    Ok(ApiResponse::created(category))
}

/// PUT /category/update-category/:id
pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CategoryRequest>,
) -> ApiResult<Category> {
    payload.validate()?;
    Ok(ApiResponse::success(state.store.update_category(id, payload.into()).await?))
}

/// DELETE /category/delete-category/:id
pub async fn delete_category(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<&'static str> {
    state.store.delete_category(id).await?;
    tracing::info!("User {} deleted category {}", identity.user_id, id);
    Ok(ApiResponse::success("Category deleted"))
}
