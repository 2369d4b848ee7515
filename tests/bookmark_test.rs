mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_add_and_list_bookmarks() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    let response = app
        .server
        .post("/api/v1/bookmarks")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": project.id }))
        .await;

    response.assert_status(StatusCode::OK);

    let list = app
        .server
        .get("/api/v1/bookmarks")
        .add_header("Authorization", auth.auth_header())
        .await;

    list.assert_status(StatusCode::OK);

    let body: serde_json::Value = list.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_str().unwrap(), project.id.to_string());
}

#[tokio::test]
async fn test_add_bookmark_is_idempotent() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    for _ in 0..3 {
        app.server
            .post("/api/v1/bookmarks")
            .add_header("Authorization", auth.auth_header())
            .json(&json!({ "project_id": project.id }))
            .await
            .assert_status(StatusCode::OK);
    }

    let list = app
        .server
        .get("/api/v1/bookmarks")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_bookmark() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    app.server
        .post("/api/v1/bookmarks")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": project.id }))
        .await
        .assert_status(StatusCode::OK);

    app.server
        .delete(&format!("/api/v1/bookmarks/{}", project.id))
        .add_header("Authorization", auth.auth_header())
        .await
        .assert_status(StatusCode::OK);

    let list = app
        .server
        .get("/api/v1/bookmarks")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_remove_bookmark_is_idempotent() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    // Removing something that was never bookmarked still succeeds
    for _ in 0..2 {
        app.server
            .delete(&format!("/api/v1/bookmarks/{}", project.id))
            .add_header("Authorization", auth.auth_header())
            .await
            .assert_status(StatusCode::OK);
    }
}

#[tokio::test]
async fn test_bookmark_unknown_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user_with_profile(&["Rust"]).await;

    let response = app
        .server
        .post("/api/v1/bookmarks")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookmarks_are_scoped_per_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user_with_profile(&["Rust"]).await;
    let auth2 = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    app.server
        .post("/api/v1/bookmarks")
        .add_header("Authorization", auth1.auth_header())
        .json(&json!({ "project_id": project.id }))
        .await
        .assert_status(StatusCode::OK);

    let list = app
        .server
        .get("/api/v1/bookmarks")
        .add_header("Authorization", auth2.auth_header())
        .await;

    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
