mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_feed_excludes_own_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["React"]).await;
    factory.create_project(&auth, &["React"]).await;

    let other = factory.create_user_with_profile(&["Go"]).await;
    let theirs = factory.create_project(&other, &["React"]).await;

    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"].as_bool().unwrap(), true);

    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"].as_str().unwrap(), theirs.id.to_string());
    assert_eq!(body["project_count"].as_u64().unwrap(), 1);
}

#[tokio::test]
async fn test_feed_excludes_disliked_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["React"]).await;

    let other = factory.create_user_with_profile(&["Go"]).await;
    let disliked = factory.create_project(&other, &["React"]).await;
    let kept = factory.create_project(&other, &["React"]).await;

    let swipe = app
        .server
        .post("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": disliked.id, "action": "dislike" }))
        .await;
    swipe.assert_status(StatusCode::OK);

    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"].as_str().unwrap(), kept.id.to_string());
}

#[tokio::test]
async fn test_feed_keeps_liked_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["React"]).await;
    let other = factory.create_user_with_profile(&["Go"]).await;
    let liked = factory.create_project(&other, &["React"]).await;

    let swipe = app
        .server
        .post("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": liked.id, "action": "like" }))
        .await;
    swipe.assert_status(StatusCode::OK);

    // Only dislikes drop a project from the feed
    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_feed_filters_by_skill_overlap() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    // Project needs Go or React; a React user sees it
    let owner = factory.create_user_with_profile(&["Go"]).await;
    factory.create_project(&owner, &["Go", "React"]).await;

    let react_user = factory.create_user_with_profile(&["React"]).await;
    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", react_user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"].as_bool().unwrap(), true);
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);

    // A Rust-only user gets the no-skill-match outcome instead
    let rust_user = factory.create_user_with_profile(&["Rust"]).await;
    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", rust_user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"].as_bool().unwrap(), false);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "No projects match your skills."
    );
    assert!(!body["recommendations"].as_array().unwrap().is_empty());
    assert!(body.get("projects").is_none());
}

#[tokio::test]
async fn test_feed_with_no_candidates() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user_with_profile(&["React"]).await;

    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"].as_bool().unwrap(), false);
    assert_eq!(body["message"].as_str().unwrap(), "No projects available.");
    assert!(!body["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_feed_attaches_owner_details() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let owner = factory.create_user_with_profile(&["Go"]).await;
    factory.create_project(&owner, &["React"]).await;

    let auth = factory.create_user_with_profile(&["React"]).await;
    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    let details = &body["projects"][0]["owner_details"];
    assert_eq!(details["college_name"].as_str().unwrap(), "Test College");
    assert_eq!(details["skills"][0].as_str().unwrap(), "Go");
    // The subset never exposes the owner's name fields
    assert!(details.get("firstname").is_none());
}

#[tokio::test]
async fn test_feed_requires_profile() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/api/v1/feed")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
