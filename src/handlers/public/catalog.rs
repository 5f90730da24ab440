// handlers/public/catalog.rs - Public catalog reads: categories and courses

use axum::extract::State;

use crate::database::models::{Category, Course};
use crate::error::ApiError;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /public/category - All course categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    Ok(ApiResponse::success(state.store.list_categories().await?))
}

/// GET /public/category/:id
pub async fn get_category(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<Category> {
    state
        .store
        .find_category(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("Category {} not found", id)))
}

/// GET /public/getall-course - Every course in the catalog
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Vec<Course>> {
    Ok(ApiResponse::success(state.store.list_courses(None).await?))
}

/// GET /public/get-course/:course_id
pub async fn get_course(State(state): State<AppState>, ApiPath(course_id): ApiPath<i32>) -> ApiResult<Course> {
    state
        .store
        .find_course(course_id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("Course {} not found", course_id)))
}

/// GET /public/get-category/:category_id - Courses of one category
///
/// An unknown category is a 404, an empty one is an empty list.
pub async fn courses_by_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i32>,
) -> ApiResult<Vec<Course>> {
    if state.store.find_category(category_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Category {} not found", category_id)));
    }
    Ok(ApiResponse::success(state.store.list_courses(Some(category_id)).await?))
}
