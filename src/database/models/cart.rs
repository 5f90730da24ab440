use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartItem {
    pub cart_id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub course_name: String,
    pub price: i32,
    pub quantity: i32,
    pub total_amount: i32,
}

#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub course_id: i32,
    pub course_name: String,
    pub price: i32,
    pub quantity: i32,
    pub total_amount: i32,
}
