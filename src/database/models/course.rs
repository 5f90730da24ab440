use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub course_id: i32,
    pub course_name: String,
    pub course_description: String,
    pub category_id: i32,
    pub price: i32,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CourseInput {
    pub course_name: String,
    pub course_description: String,
    pub category_id: i32,
    pub price: i32,
    pub thumbnail: Option<String>,
}
