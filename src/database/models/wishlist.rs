use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WishlistItem {
    pub wishlist_id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub created_at: DateTime<Utc>,
}
