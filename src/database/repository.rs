use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{
    CartItem, Category, CategoryInput, Course, CourseInput, NewCartItem, NewUser, ProfileUpdate, User, WishlistItem,
};
use crate::auth::Role;

pub type DbResult<T> = Result<T, DatabaseError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Login lookup; names are unique.
    async fn find_user_by_name(&self, name: &str) -> DbResult<Option<User>>;

    async fn find_user_by_id(&self, user_id: i32) -> DbResult<Option<User>>;

    /// Fails with `Conflict` when the name or email is taken.
    async fn create_user(&self, user: NewUser) -> DbResult<User>;

    async fn list_users(&self, role: Option<Role>) -> DbResult<Vec<User>>;

    async fn update_profile(&self, user_id: i32, update: ProfileUpdate) -> DbResult<User>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> DbResult<Vec<Category>>;

    async fn find_category(&self, category_id: i32) -> DbResult<Option<Category>>;

    async fn create_category(&self, input: CategoryInput) -> DbResult<Category>;

    async fn update_category(&self, category_id: i32, input: CategoryInput) -> DbResult<Category>;

    /// Fails with `Conflict` while courses still belong to the category.
    async fn delete_category(&self, category_id: i32) -> DbResult<()>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses, or only those of one category.
    async fn list_courses(&self, category_id: Option<i32>) -> DbResult<Vec<Course>>;

    async fn find_course(&self, course_id: i32) -> DbResult<Option<Course>>;

    async fn create_course(&self, input: CourseInput) -> DbResult<Course>;

    async fn update_course(&self, course_id: i32, input: CourseInput) -> DbResult<Course>;

    /// Also drops the course from every cart and wishlist.
    async fn delete_course(&self, course_id: i32) -> DbResult<()>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// One row per (user, course); a second add is a `Conflict`.
    async fn add_to_cart(&self, user_id: i32, item: NewCartItem) -> DbResult<CartItem>;

    async fn cart_for_user(&self, user_id: i32) -> DbResult<Vec<CartItem>>;

    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> DbResult<()>;
}

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn add_to_wishlist(&self, user_id: i32, course_id: i32) -> DbResult<WishlistItem>;

    async fn wishlist_for_user(&self, user_id: i32) -> DbResult<Vec<WishlistItem>>;

    async fn remove_from_wishlist(&self, user_id: i32, course_id: i32) -> DbResult<()>;
}

/// Everything the handlers need from persistence.
#[async_trait]
pub trait Store: UserRepository + CategoryRepository + CourseRepository + CartRepository + WishlistRepository {
    async fn health_check(&self) -> DbResult<()>;
}
