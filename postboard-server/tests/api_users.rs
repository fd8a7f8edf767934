//! /api/users behaviour through the full router

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, create_post, create_user, get, send};

#[tokio::test]
async fn create_user_returns_201_then_conflicts_on_repeat() {
    let app = app().await;
    let body = json!({ "username": "alice", "email": "a@x.com" });

    let first = send(&app, "POST", "/api/users", Some(body.clone())).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let user = first.json();
    assert!(user["id"].as_i64().unwrap() > 0);
    assert_eq!(user["username"], "alice");
    assert_eq!(user["image_file"], serde_json::Value::Null);
    assert_eq!(user["image_path"], "/static/profile_pics/default.svg");

    let second = send(&app, "POST", "/api/users", Some(body)).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.json()["detail"], "Username already exists");
}

#[tokio::test]
async fn duplicate_email_conflicts_regardless_of_username() {
    let app = app().await;
    create_user(&app, "alice", "a@x.com").await;

    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "username": "someone-else", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "Email already exists");
}

#[tokio::test]
async fn invalid_user_body_is_422_list() {
    let app = app().await;

    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "username": "", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let detail = response.json()["detail"].as_array().unwrap().clone();
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0]["loc"], json!(["body", "username"]));
    assert_eq!(detail[1]["loc"], json!(["body", "email"]));
}

#[tokio::test]
async fn missing_field_is_422() {
    let app = app().await;

    let response = send(&app, "POST", "/api/users", Some(json!({ "username": "alice" }))).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["detail"][0]["loc"], json!(["body"]));
}

#[tokio::test]
async fn get_user_and_missing_user() {
    let app = app().await;
    let id = create_user(&app, "alice", "a@x.com").await;

    let found = get(&app, &format!("/api/users/{id}")).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.json()["email"], "a@x.com");

    let missing = get(&app, "/api/users/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.json()["detail"].is_string());
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = app().await;

    let response = get(&app, "/api/users/abc").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["detail"][0]["loc"], json!(["path"]));
}

#[tokio::test]
async fn patch_user_changes_only_supplied_fields() {
    let app = app().await;
    let id = create_user(&app, "alice", "a@x.com").await;

    let response = send(
        &app,
        "PATCH",
        &format!("/api/users/{id}"),
        Some(json!({ "image_file": "alice.png" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let user = response.json();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["image_file"], "alice.png");
    assert_eq!(user["image_path"], "/media/profile_pics/alice.png");
}

#[tokio::test]
async fn patch_user_with_own_email_succeeds() {
    let app = app().await;
    let id = create_user(&app, "alice", "a@x.com").await;

    let response = send(
        &app,
        "PATCH",
        &format!("/api/users/{id}"),
        Some(json!({ "email": "a@x.com", "username": "alicia" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "alicia");
}

#[tokio::test]
async fn patch_user_to_taken_identity_conflicts() {
    let app = app().await;
    let alice = create_user(&app, "alice", "a@x.com").await;
    create_user(&app, "bob", "b@x.com").await;

    let response = send(
        &app,
        "PATCH",
        &format!("/api/users/{alice}"),
        Some(json!({ "username": "bob" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "PATCH",
        &format!("/api/users/{alice}"),
        Some(json!({ "email": "b@x.com" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let missing = send(&app, "PATCH", "/api/users/999", Some(json!({}))).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_then_missing() {
    let app = app().await;
    let id = create_user(&app, "alice", "a@x.com").await;
    create_post(&app, "t", "c", id).await;

    let deleted = send(&app, "DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let again = send(&app, "DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let posts = get(&app, "/api/posts").await;
    assert_eq!(posts.json(), json!([]));
}

#[tokio::test]
async fn list_user_posts() {
    let app = app().await;
    let alice = create_user(&app, "alice", "a@x.com").await;
    let bob = create_user(&app, "bob", "b@x.com").await;
    create_post(&app, "by alice", "c", alice).await;
    create_post(&app, "by bob", "c", bob).await;

    let response = get(&app, &format!("/api/users/{bob}/posts")).await;
    assert_eq!(response.status, StatusCode::OK);
    let posts = response.json();
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["title"], "by bob");
    assert_eq!(posts[0]["author"]["username"], "bob");

    let missing = get(&app, "/api/users/999/posts").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let app = app().await;

    let response = get(&app, "/api/nothing-here").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn wrong_method_on_api_path_is_json_405() {
    let app = app().await;

    // /api/users only accepts POST
    let response = get(&app, "/api/users").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json(), json!({ "detail": "Method Not Allowed" }));

    let response = send(&app, "POST", "/api/users/1", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json(), json!({ "detail": "Method Not Allowed" }));
}
