//! In-process store used by `serve --in-memory` and the test suite.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{
    CartItem, Category, CategoryInput, Course, CourseInput, NewCartItem, NewUser, ProfileUpdate, User, WishlistItem,
};
use super::repository::{
    CartRepository, CategoryRepository, CourseRepository, DbResult, Store, UserRepository, WishlistRepository,
};
use crate::auth::Role;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    categories: BTreeMap<i32, Category>,
    courses: BTreeMap<i32, Course>,
    carts: BTreeMap<i32, CartItem>,
    wishlists: BTreeMap<i32, WishlistItem>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn require_category(&self, category_id: i32) -> DbResult<()> {
        if self.categories.contains_key(&category_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("category {}", category_id)))
        }
    }

    fn require_course(&self, course_id: i32) -> DbResult<()> {
        if self.courses.contains_key(&course_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("course {}", course_id)))
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_name(&self, name: &str) -> DbResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.name == name).cloned())
    }

    async fn find_user_by_id(&self, user_id: i32) -> DbResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.name == user.name || u.email == user.email)
        {
            return Err(DatabaseError::Conflict("Username or email already exists".to_string()));
        }

        let user_id = tables.next_id();
        let created = User {
            user_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            photo: None,
            created_at: Utc::now(),
        };
        tables.users.insert(user_id, created.clone());
        Ok(created)
    }

    async fn list_users(&self, role: Option<Role>) -> DbResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect())
    }

    async fn update_profile(&self, user_id: i32, update: ProfileUpdate) -> DbResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.user_id != user_id && (u.name == update.name || u.email == update.email))
        {
            return Err(DatabaseError::Conflict("Username or email already exists".to_string()));
        }

        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user_id)))?;
        user.name = update.name;
        user.email = update.email;
        Ok(user.clone())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> DbResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, category_id: i32) -> DbResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&category_id).cloned())
    }

    async fn create_category(&self, input: CategoryInput) -> DbResult<Category> {
        let mut tables = self.tables.write().await;
        let category_id = tables.next_id();
        let now = Utc::now();
        let category = Category {
            category_id,
            category_name: input.category_name,
            icon: input.icon,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(category_id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, category_id: i32, input: CategoryInput) -> DbResult<Category> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&category_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("category {}", category_id)))?;
        category.category_name = input.category_name;
        category.icon = input.icon;
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete_category(&self, category_id: i32) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_category(category_id)?;
        if tables.courses.values().any(|c| c.category_id == category_id) {
            return Err(DatabaseError::Conflict("Category still has courses".to_string()));
        }
        tables.categories.remove(&category_id);
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn list_courses(&self, category_id: Option<i32>) -> DbResult<Vec<Course>> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .values()
            .filter(|c| category_id.map_or(true, |id| c.category_id == id))
            .cloned()
            .collect())
    }

    async fn find_course(&self, course_id: i32) -> DbResult<Option<Course>> {
        Ok(self.tables.read().await.courses.get(&course_id).cloned())
    }

    async fn create_course(&self, input: CourseInput) -> DbResult<Course> {
        let mut tables = self.tables.write().await;
        tables.require_category(input.category_id)?;

        let course_id = tables.next_id();
        let now = Utc::now();
        let course = Course {
            course_id,
            course_name: input.course_name,
            course_description: input.course_description,
            category_id: input.category_id,
            price: input.price,
            thumbnail: input.thumbnail,
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(course_id, course.clone());
        Ok(course)
    }

    async fn update_course(&self, course_id: i32, input: CourseInput) -> DbResult<Course> {
        let mut tables = self.tables.write().await;
        tables.require_course(course_id)?;
        tables.require_category(input.category_id)?;

        let course = tables
            .courses
            .get_mut(&course_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("course {}", course_id)))?;
        course.course_name = input.course_name;
        course.course_description = input.course_description;
        course.category_id = input.category_id;
        course.price = input.price;
        course.thumbnail = input.thumbnail;
        course.updated_at = Utc::now();
        Ok(course.clone())
    }

    async fn delete_course(&self, course_id: i32) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_course(course_id)?;
        tables.courses.remove(&course_id);
        tables.carts.retain(|_, c| c.course_id != course_id);
        tables.wishlists.retain(|_, w| w.course_id != course_id);
        Ok(())
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn add_to_cart(&self, user_id: i32, item: NewCartItem) -> DbResult<CartItem> {
        let mut tables = self.tables.write().await;
        tables.require_course(item.course_id)?;
        if tables
            .carts
            .values()
            .any(|c| c.user_id == user_id && c.course_id == item.course_id)
        {
            return Err(DatabaseError::Conflict("Course is already in the cart".to_string()));
        }

        let cart_id = tables.next_id();
        let row = CartItem {
            cart_id,
            user_id,
            course_id: item.course_id,
            course_name: item.course_name,
            price: item.price,
            quantity: item.quantity,
            total_amount: item.total_amount,
        };
        tables.carts.insert(cart_id, row.clone());
        Ok(row)
    }

    async fn cart_for_user(&self, user_id: i32) -> DbResult<Vec<CartItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .carts
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.carts.len();
        tables
            .carts
            .retain(|_, c| !(c.user_id == user_id && c.course_id == course_id));
        if tables.carts.len() == before {
            return Err(DatabaseError::NotFound("Cart item not found".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WishlistRepository for MemoryStore {
    async fn add_to_wishlist(&self, user_id: i32, course_id: i32) -> DbResult<WishlistItem> {
        let mut tables = self.tables.write().await;
        tables.require_course(course_id)?;
        if tables
            .wishlists
            .values()
            .any(|w| w.user_id == user_id && w.course_id == course_id)
        {
            return Err(DatabaseError::Conflict("Course is already in the wishlist".to_string()));
        }

        let wishlist_id = tables.next_id();
        let row = WishlistItem {
            wishlist_id,
            user_id,
            course_id,
            created_at: Utc::now(),
        };
        tables.wishlists.insert(wishlist_id, row.clone());
        Ok(row)
    }

    async fn wishlist_for_user(&self, user_id: i32) -> DbResult<Vec<WishlistItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wishlists
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove_from_wishlist(&self, user_id: i32, course_id: i32) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.wishlists.len();
        tables
            .wishlists
            .retain(|_, w| !(w.user_id == user_id && w.course_id == course_id));
        if tables.wishlists.len() == before {
            return Err(DatabaseError::NotFound("Wishlist item not found".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }
}
