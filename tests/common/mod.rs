#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use elearning_api::auth::{hash_password, Role};
use elearning_api::config::AppConfig;
use elearning_api::database::models::{CategoryInput, Course, CourseInput, NewUser};
use elearning_api::database::{MemoryStore, UserRepository};
use elearning_api::{app, AppState};

pub const STUDENT: (&str, &str) = ("alice", "Secret123!");
pub const TEACHER: (&str, &str) = ("bob", "Teach123!");
pub const ADMIN: (&str, &str) = ("root", "Admin123!");

/// The real router over a seeded in-memory store, driven in-process.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// `token=...` pair from the Set-Cookie header, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .map(|pair| pair.trim().to_string())
    }
}

pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| match key {
        "APP_ENV" => Some("development".to_string()),
        "JWT_SECRET" => Some("integration-test-secret-integration-test-secret".to_string()),
        _ => None,
    })?;
    Ok(config)
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let store = MemoryStore::new();
        for ((name, password), role) in [
            (STUDENT, Role::Student),
            (TEACHER, Role::Teacher),
            (ADMIN, Role::Admin),
        ] {
            store
                .create_user(NewUser {
                    name: name.to_string(),
                    email: format!("{}@example.com", name),
                    password_hash: hash_password(password).map_err(|e| anyhow::anyhow!("{}", e))?,
                    role,
                })
                .await?;
        }

        let state = AppState::new(test_config()?, Arc::new(store));
        Ok(Self {
            router: app(state.clone()),
            state,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router call failed")?;

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(TestResponse {
            status,
            set_cookie,
            body,
        })
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, path, cookie, None).await
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, path, cookie, Some(body)).await
    }

    /// Sign in through the real endpoint and return the cookie to send back.
    pub async fn sign_in(&self, (name, password): (&str, &str)) -> Result<String> {
        let res = self
            .post(
                "/user/sign-in",
                None,
                serde_json::json!({ "nama": name, "password": password }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "sign-in failed: {}", res.body);
        res.session_cookie().context("sign-in set no cookie")
    }

    /// Put a course, in a category of its own, straight into the store.
    pub async fn seed_course(&self, name: &str, price: i32) -> Result<Course> {
        let category = self
            .state
            .store
            .create_category(CategoryInput {
                category_name: format!("{} category", name),
                icon: "book".to_string(),
            })
            .await?;
        let course = self
            .state
            .store
            .create_course(CourseInput {
                course_name: name.to_string(),
                course_description: format!("All about {}", name),
                category_id: category.category_id,
                price,
                thumbnail: None,
            })
            .await?;
        Ok(course)
    }

    /// Mint a session cookie directly with the app's codec.
    pub fn cookie_for(&self, user_id: i32, name: &str, role: Role, now: chrono::DateTime<chrono::Utc>) -> Result<String> {
        let claims = self.state.codec.claims_for(user_id, name, role, now);
        let token = self.state.codec.encode(&claims)?;
        Ok(format!("token={}", token))
    }
}
