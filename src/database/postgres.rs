use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{
    CartItem, Category, CategoryInput, Course, CourseInput, NewCartItem, NewUser, ProfileUpdate, User, WishlistItem,
};
use super::repository::{
    CartRepository, CategoryRepository, CourseRepository, DbResult, Store, UserRepository, WishlistRepository,
};
use crate::auth::Role;

const USER_COLUMNS: &str = "user_id, name, email, password_hash, role, photo, created_at";
const COURSE_COLUMNS: &str =
    "course_id, course_name, course_description, category_id, price, thumbnail, created_at, updated_at";

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique-constraint violations to `Conflict`, everything else passes through.
fn conflict_or_sqlx(err: sqlx::Error, what: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Conflict(what.to_string()),
        _ => DatabaseError::Sqlx(err),
    }
}

/// Map foreign-key violations to `NotFound` for the referenced row.
fn missing_reference_or(err: DatabaseError, what: &str) -> DatabaseError {
    match &err {
        DatabaseError::Sqlx(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            DatabaseError::NotFound(what.to_string())
        }
        _ => err,
    }
}

fn expect_affected(rows: u64, what: &str) -> DbResult<()> {
    if rows == 0 {
        Err(DatabaseError::NotFound(what.to_string()))
    } else {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user_by_name(&self, name: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE name = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_id(&self, user_id: i32) -> DbResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE user_id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or_sqlx(e, "Username or email already exists"))
    }

    async fn list_users(&self, role: Option<Role>) -> DbResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE ($1::user_role IS NULL OR role = $1) ORDER BY user_id",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_profile(&self, user_id: i32, update: ProfileUpdate) -> DbResult<User> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3 WHERE user_id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(&update.name)
            .bind(&update.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_or_sqlx(e, "Username or email already exists"))?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user_id)))
    }
}

#[async_trait]
impl CategoryRepository for PgStore {
    async fn list_categories(&self) -> DbResult<Vec<Category>> {
        Ok(sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name, icon, created_at, updated_at FROM categories ORDER BY category_id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_category(&self, category_id: i32) -> DbResult<Option<Category>> {
        Ok(sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name, icon, created_at, updated_at FROM categories WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_category(&self, input: CategoryInput) -> DbResult<Category> {
        Ok(sqlx::query_as::<_, Category>(
            "INSERT INTO categories (category_name, icon) VALUES ($1, $2) \
             RETURNING category_id, category_name, icon, created_at, updated_at",
        )
        .bind(&input.category_name)
        .bind(&input.icon)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_category(&self, category_id: i32, input: CategoryInput) -> DbResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET category_name = $2, icon = $3, updated_at = now() WHERE category_id = $1 \
             RETURNING category_id, category_name, icon, created_at, updated_at",
        )
        .bind(category_id)
        .bind(&input.category_name)
        .bind(&input.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("category {}", category_id)))
    }

    async fn delete_category(&self, category_id: i32) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    DatabaseError::Conflict("Category still has courses".to_string())
                }
                _ => DatabaseError::Sqlx(e),
            })?;
        expect_affected(result.rows_affected(), &format!("category {}", category_id))
    }
}

#[async_trait]
impl CourseRepository for PgStore {
    async fn list_courses(&self, category_id: Option<i32>) -> DbResult<Vec<Course>> {
        let sql = format!(
            "SELECT {} FROM courses WHERE ($1::integer IS NULL OR category_id = $1) ORDER BY course_id",
            COURSE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_course(&self, course_id: i32) -> DbResult<Option<Course>> {
        let sql = format!("SELECT {} FROM courses WHERE course_id = $1", COURSE_COLUMNS);
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(course_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_course(&self, input: CourseInput) -> DbResult<Course> {
        let sql = format!(
            "INSERT INTO courses (course_name, course_description, category_id, price, thumbnail) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COURSE_COLUMNS
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(&input.course_name)
            .bind(&input.course_description)
            .bind(input.category_id)
            .bind(input.price)
            .bind(&input.thumbnail)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| missing_reference_or(e.into(), &format!("category {}", input.category_id)))
    }

    async fn update_course(&self, course_id: i32, input: CourseInput) -> DbResult<Course> {
        let sql = format!(
            "UPDATE courses SET course_name = $2, course_description = $3, category_id = $4, price = $5, \
             thumbnail = $6, updated_at = now() WHERE course_id = $1 RETURNING {}",
            COURSE_COLUMNS
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(course_id)
            .bind(&input.course_name)
            .bind(&input.course_description)
            .bind(input.category_id)
            .bind(input.price)
            .bind(&input.thumbnail)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| missing_reference_or(e.into(), &format!("category {}", input.category_id)))?
            .ok_or_else(|| DatabaseError::NotFound(format!("course {}", course_id)))
    }

    async fn delete_course(&self, course_id: i32) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(course_id)
            .execute(&self.pool)
            .await?;
        expect_affected(result.rows_affected(), &format!("course {}", course_id))
    }
}

#[async_trait]
impl CartRepository for PgStore {
    async fn add_to_cart(&self, user_id: i32, item: NewCartItem) -> DbResult<CartItem> {
        sqlx::query_as::<_, CartItem>(
            "INSERT INTO carts (user_id, course_id, course_name, price, quantity, total_amount) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING cart_id, user_id, course_id, course_name, price, quantity, total_amount",
        )
        .bind(user_id)
        .bind(item.course_id)
        .bind(&item.course_name)
        .bind(item.price)
        .bind(item.quantity)
        .bind(item.total_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_sqlx(e, "Course is already in the cart"))
        .map_err(|e| missing_reference_or(e, &format!("course {}", item.course_id)))
    }

    async fn cart_for_user(&self, user_id: i32) -> DbResult<Vec<CartItem>> {
        Ok(sqlx::query_as::<_, CartItem>(
            "SELECT cart_id, user_id, course_id, course_name, price, quantity, total_amount \
             FROM carts WHERE user_id = $1 ORDER BY cart_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;
        expect_affected(result.rows_affected(), "Cart item not found")
    }
}

#[async_trait]
impl WishlistRepository for PgStore {
    async fn add_to_wishlist(&self, user_id: i32, course_id: i32) -> DbResult<WishlistItem> {
        sqlx::query_as::<_, WishlistItem>(
            "INSERT INTO wishlists (user_id, course_id) VALUES ($1, $2) \
             RETURNING wishlist_id, user_id, course_id, created_at",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_sqlx(e, "Course is already in the wishlist"))
        .map_err(|e| missing_reference_or(e, &format!("course {}", course_id)))
    }

    async fn wishlist_for_user(&self, user_id: i32) -> DbResult<Vec<WishlistItem>> {
        Ok(sqlx::query_as::<_, WishlistItem>(
            "SELECT wishlist_id, user_id, course_id, created_at FROM wishlists WHERE user_id = $1 ORDER BY wishlist_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn remove_from_wishlist(&self, user_id: i32, course_id: i32) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;
        expect_affected(result.rows_affected(), "Wishlist item not found")
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> DbResult<()> {
        DatabaseManager::health_check(&self.pool).await
    }
}
