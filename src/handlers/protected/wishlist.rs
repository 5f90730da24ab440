// handlers/protected/wishlist.rs - /wishlist/* handlers (students)

use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::database::models::WishlistItem;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, RequestIdentity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWishlistRequest {
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    pub course_id: i32,
}

/// POST /wishlist/create-wishlist
///
/// The course must exist in the catalog.
pub async fn create_wishlist(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(payload): ApiJson<CreateWishlistRequest>,
) -> ApiResult<WishlistItem> {
    payload.validate()?;
    if state.store.find_course(payload.course_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Course {} not found", payload.course_id)));
    }

    let item = state
        .store
        .add_to_wishlist(identity.user_id, payload.course_id)
        .await?;
    Ok(ApiResponse::created(item))
}

/// GET /wishlist/wishlist
pub async fn wishlist(State(state): State<AppState>, identity: RequestIdentity) -> ApiResult<Vec<WishlistItem>> {
    Ok(ApiResponse::success(state.store.wishlist_for_user(identity.user_id).await?))
}

/// DELETE /wishlist/delete-wishlist/:course_id
pub async fn delete_wishlist(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(course_id): ApiPath<i32>,
) -> ApiResult<&'static str> {
    state
        .store
        .remove_from_wishlist(identity.user_id, course_id)
        .await?;
    Ok(ApiResponse::success("Removed from wishlist"))
}
