// handlers/protected/course.rs - /teacher/* course management (teachers and admins)

use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::database::models::{Course, CourseInput};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, RequestIdentity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CourseRequest {
    #[validate(length(min = 1, max = 200, message = "Course name is required"))]
    pub course_name: String,
    #[validate(length(min = 1, message = "Course description is required"))]
    pub course_description: String,
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    pub category_id: i32,
    #[validate(range(min = 0, message = "Must not be negative"))]
    pub price: i32,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl From<CourseRequest> for CourseInput {
    fn from(req: CourseRequest) -> Self {
        Self {
            course_name: req.course_name,
            course_description: req.course_description,
            category_id: req.category_id,
            price: req.price,
            thumbnail: req.thumbnail.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// POST /teacher/create-course
///
/// Expected Input:
/// ```json
/// {
///   "course_name": "Rust 101",
///   "course_description": "Ownership, borrowing and lifetimes",
///   "category_id": 1,
///   "price": 150000,
///   "thumbnail": "https://cdn.example.com/rust.png"
/// }
/// ```
///
/// An unknown `category_id` is a 404.
pub async fn create_course(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(payload): ApiJson<CourseRequest>,
) -> ApiResult<Course> {
    payload.validate()?;
    let course = state.store.create_course(payload.into()).await?;
    tracing::info!("User {} created course {}", identity.user_id, course.course_id);
    Ok(ApiResponse::created(course))
}

/// PUT /teacher/update-course/:id
pub async fn update_course(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CourseRequest>,
) -> ApiResult<Course> {
    payload.validate()?;
    let course = state.store.update_course(id, payload.into()).await?;
    tracing::info!("User {} updated course {}", identity.user_id, id);
    Ok(ApiResponse::success(course))
}

/// DELETE /teacher/delete-course/:id
///
/// The course also leaves every cart and wishlist it was in.
pub async fn delete_course(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<&'static str> {
    state.store.delete_course(id).await?;
    tracing::info!("User {} deleted course {}", identity.user_id, id);
    Ok(ApiResponse::success("Course deleted"))
}
