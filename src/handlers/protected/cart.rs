// handlers/protected/cart.rs - /cart/* handlers (students)

use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::database::models::{CartItem, NewCartItem};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, RequestIdentity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCartRequest {
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    pub course_id: i32,
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    pub quantity: i32,
}

/// POST /cart/create-cart - Add a course to the caller's cart
///
/// Expected Input:
/// ```json
/// { "course_id": 3, "quantity": 1 }
/// ```
///
/// Name and price come from the stored course, never from the client.
/// `total_amount` is computed here; the cart owner is always the caller.
pub async fn create_cart(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(payload): ApiJson<CreateCartRequest>,
) -> ApiResult<CartItem> {
    payload.validate()?;

    let course = state
        .store
        .find_course(payload.course_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Course {} not found", payload.course_id)))?;

    let total_amount = course
        .price
        .checked_mul(payload.quantity)
        .ok_or_else(|| ApiError::bad_request("Total amount is too large"))?;

    let item = state
        .store
        .add_to_cart(
            identity.user_id,
            NewCartItem {
                course_id: course.course_id,
                course_name: course.course_name,
                price: course.price,
                quantity: payload.quantity,
                total_amount,
            },
        )
        .await?;
    Ok(ApiResponse::created(item))
}

/// GET /cart/cartpage - Caller's cart
pub async fn cart_page(State(state): State<AppState>, identity: RequestIdentity) -> ApiResult<Vec<CartItem>> {
    Ok(ApiResponse::success(state.store.cart_for_user(identity.user_id).await?))
}

/// DELETE /cart/delete-cart/:course_id
pub async fn delete_cart(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(course_id): ApiPath<i32>,
) -> ApiResult<&'static str> {
    state.store.remove_from_cart(identity.user_id, course_id).await?;
    Ok(ApiResponse::success("Removed from cart"))
}
