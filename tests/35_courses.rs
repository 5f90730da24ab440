mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{TestApp, ADMIN, STUDENT, TEACHER};

fn course_body(category_id: &Value, name: &str, price: i32) -> Value {
    json!({
        "course_name": name,
        "course_description": format!("Learn {}", name),
        "category_id": category_id,
        "price": price,
        "thumbnail": "https://cdn.example.com/cover.png"
    })
}

#[tokio::test]
async fn teacher_publishes_course_visible_in_catalog() -> Result<()> {
    let app = TestApp::spawn().await?;
    let teacher = app.sign_in(TEACHER).await?;

    let category = app
        .post(
            "/category/create-category",
            Some(&teacher),
            json!({ "category_name": "Programming", "icon": "code" }),
        )
        .await?;
    let category_id = category.body["data"]["category_id"].clone();

    let created = app
        .post("/teacher/create-course", Some(&teacher), course_body(&category_id, "Rust 101", 150000))
        .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["course_name"], "Rust 101");
    assert_eq!(created.body["data"]["category_id"], category_id);
    let course_id = created.body["data"]["course_id"].as_i64().expect("course id");

    let all = app.get("/public/getall-course", None).await?;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"].as_array().map(Vec::len), Some(1));

    let one = app.get(&format!("/public/get-course/{}", course_id), None).await?;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["data"]["price"], 150000);

    let by_category = app.get(&format!("/public/get-category/{}", category_id), None).await?;
    assert_eq!(by_category.status, StatusCode::OK);
    assert_eq!(by_category.body["data"][0]["course_id"], course_id);
    Ok(())
}

#[tokio::test]
async fn course_updates_and_deletes() -> Result<()> {
    let app = TestApp::spawn().await?;
    let course = app.seed_course("Go", 100).await?;
    let admin = app.sign_in(ADMIN).await?;
    let category_id = json!(course.category_id);

    let updated = app
        .request(
            Method::PUT,
            &format!("/teacher/update-course/{}", course.course_id),
            Some(&admin),
            Some(course_body(&category_id, "Go in Practice", 250)),
        )
        .await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["course_name"], "Go in Practice");
    assert_eq!(updated.body["data"]["price"], 250);

    let missing = app
        .request(
            Method::PUT,
            "/teacher/update-course/424242",
            Some(&admin),
            Some(course_body(&category_id, "Ghost", 1)),
        )
        .await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let path = format!("/teacher/delete-course/{}", course.course_id);
    let deleted = app.request(Method::DELETE, &path, Some(&admin), None).await?;
    assert_eq!(deleted.status, StatusCode::OK);
    let again = app.request(Method::DELETE, &path, Some(&admin), None).await?;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let gone = app.get(&format!("/public/get-course/{}", course.course_id), None).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn course_needs_an_existing_category_and_valid_fields() -> Result<()> {
    let app = TestApp::spawn().await?;
    let teacher = app.sign_in(TEACHER).await?;

    let orphan = app
        .post("/teacher/create-course", Some(&teacher), course_body(&json!(999), "Lost", 10))
        .await?;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);

    let invalid = app
        .post(
            "/teacher/create-course",
            Some(&teacher),
            json!({ "course_name": "", "course_description": "x", "category_id": 1, "price": -5 }),
        )
        .await?;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["code"], "VALIDATION_ERROR");
    assert!(invalid.body["field_errors"]["course_name"].is_string());
    assert!(invalid.body["field_errors"]["price"].is_string());
    Ok(())
}

#[tokio::test]
async fn students_cannot_manage_courses() -> Result<()> {
    let app = TestApp::spawn().await?;
    let course = app.seed_course("Go", 100).await?;
    let student = app.sign_in(STUDENT).await?;

    let res = app
        .post(
            "/teacher/create-course",
            Some(&student),
            course_body(&json!(course.category_id), "Sneaky", 0),
        )
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .request(
            Method::DELETE,
            &format!("/teacher/delete-course/{}", course.course_id),
            Some(&student),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn category_listing_and_removal_respect_courses() -> Result<()> {
    let app = TestApp::spawn().await?;
    let course = app.seed_course("Go", 100).await?;
    let teacher = app.sign_in(TEACHER).await?;

    let unknown = app.get("/public/get-category/424242", None).await?;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let blocked = app
        .request(
            Method::DELETE,
            &format!("/category/delete-category/{}", course.category_id),
            Some(&teacher),
            None,
        )
        .await?;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    Ok(())
}
