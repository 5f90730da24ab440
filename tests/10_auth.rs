mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{TestApp, STUDENT, TEACHER};
use elearning_api::auth::Role;
use elearning_api::error::INVALID_SESSION;

#[tokio::test]
async fn sign_in_sets_http_only_cookie() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .post("/user/sign-in", None, json!({ "nama": "alice", "password": "Secret123!" }))
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["username"], "alice");
    assert_eq!(res.body["data"]["role"], "student");
    assert_eq!(res.body["data"]["expires_in"], 15 * 60);

    let cookie = res.set_cookie.expect("cookie set");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    Ok(())
}

#[tokio::test]
async fn wrong_password_sets_no_cookie() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .post("/user/sign-in", None, json!({ "nama": "alice", "password": "wrong" }))
        .await?;

    assert_ne!(res.status, StatusCode::OK);
    assert!(res.set_cookie.is_none());
    Ok(())
}

#[tokio::test]
async fn unknown_user_and_wrong_password_are_indistinguishable() -> Result<()> {
    let app = TestApp::spawn().await?;

    let wrong = app
        .post("/user/sign-in", None, json!({ "nama": "alice", "password": "wrong" }))
        .await?;
    let unknown = app
        .post("/user/sign-in", None, json!({ "nama": "mallory", "password": "Secret123!" }))
        .await?;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, unknown.status);
    assert_eq!(wrong.body, unknown.body);
    Ok(())
}

#[tokio::test]
async fn session_cookie_identifies_the_caller() -> Result<()> {
    let app = TestApp::spawn().await?;
    let cookie = app.sign_in(STUDENT).await?;

    let res = app.get("/auth/get-user-info", Some(&cookie)).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["role"], "student");
    assert!(res.body["data"]["user_id"].as_i64().is_some());
    Ok(())
}

#[tokio::test]
async fn protected_route_without_cookie_is_401() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/user/user-info", None).await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "No token provided");
    Ok(())
}

#[tokio::test]
async fn expired_and_forged_tokens_get_the_same_401() -> Result<()> {
    let app = TestApp::spawn().await?;

    let expired = app.cookie_for(1, "alice", Role::Student, Utc::now() - Duration::hours(1))?;
    let valid = app.cookie_for(1, "alice", Role::Student, Utc::now())?;
    let other = app.cookie_for(2, "bob", Role::Admin, Utc::now())?;
    let (signed_part, _) = valid.rsplit_once('.').expect("jwt");
    let (_, other_signature) = other.rsplit_once('.').expect("jwt");
    let forged = format!("{}.{}", signed_part, other_signature);

    for cookie in [expired, forged, "token=not-a-jwt".to_string()] {
        let res = app.get("/auth/get-user-info", Some(&cookie)).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "cookie {}", cookie);
        assert_eq!(res.body["error"], INVALID_SESSION);
    }
    Ok(())
}

#[tokio::test]
async fn student_on_teacher_route_is_403() -> Result<()> {
    let app = TestApp::spawn().await?;
    let cookie = app.sign_in(STUDENT).await?;

    let res = app
        .post(
            "/category/create-category",
            Some(&cookie),
            json!({ "category_name": "Design", "icon": "pen" }),
        )
        .await?;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["success"], false);
    Ok(())
}

#[tokio::test]
async fn role_gated_route_without_cookie_is_401_not_403() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/admin/all-user", None).await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn stale_cookie_does_not_break_public_routes() -> Result<()> {
    let app = TestApp::spawn().await?;
    let expired = app.cookie_for(1, "alice", Role::Student, Utc::now() - Duration::days(1))?;

    let res = app.get("/public/category", Some(&expired)).await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/ping", Some("token=garbage")).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"], "pong");
    Ok(())
}

#[tokio::test]
async fn sign_out_expires_cookie_with_or_without_session() -> Result<()> {
    let app = TestApp::spawn().await?;
    let cookie = app.sign_in(TEACHER).await?;

    for session in [Some(cookie.as_str()), None] {
        let res = app.request(Method::POST, "/user/sign-out", session, None).await?;
        assert_eq!(res.status, StatusCode::OK);

        let set = res.set_cookie.expect("expired cookie sent");
        assert!(set.starts_with("token="));
        assert!(set.contains("Max-Age=0"));
        assert!(set.contains("1970"));
    }
    Ok(())
}

#[tokio::test]
async fn sign_out_with_expired_session_still_succeeds() -> Result<()> {
    let app = TestApp::spawn().await?;
    let expired = app.cookie_for(1, "alice", Role::Student, Utc::now() - Duration::hours(2))?;

    let res = app
        .request(Method::POST, "/user/sign-out", Some(&expired), None)
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn copied_token_outlives_sign_out_until_exp() -> Result<()> {
    // No revocation list: signing out only clears the browser's copy.
    let app = TestApp::spawn().await?;
    let cookie = app.sign_in(STUDENT).await?;

    app.request(Method::POST, "/user/sign-out", Some(&cookie), None).await?;
    let res = app.get("/auth/get-user-info", Some(&cookie)).await?;

    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}
