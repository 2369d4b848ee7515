mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};
use devmatch::repositories::SwipeRepository;

#[tokio::test]
async fn test_like_then_listed_as_liked() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    let response = app
        .server
        .post("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": project.id, "action": "like" }))
        .await;

    response.assert_status(StatusCode::OK);

    let list = app
        .server
        .get("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .await;

    list.assert_status(StatusCode::OK);

    let body: serde_json::Value = list.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_str().unwrap(), project.id.to_string());
}

#[tokio::test]
async fn test_dislikes_are_not_listed_as_liked() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    app.server
        .post("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "project_id": project.id, "action": "dislike" }))
        .await
        .assert_status(StatusCode::OK);

    let list = app
        .server
        .get("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_repeated_swipes_are_accepted() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    // The server records duplicates; de-duplication is the client's job
    for _ in 0..2 {
        app.server
            .post("/api/v1/swipe")
            .add_header("Authorization", auth.auth_header())
            .json(&json!({ "project_id": project.id, "action": "like" }))
            .await
            .assert_status(StatusCode::OK);
    }

    let swipes = app.state.swipes.list_by_user(auth.user_id).await.unwrap();
    assert_eq!(swipes.len(), 2);

    // The liked view still resolves to the one project
    let list = app
        .server
        .get("/api/v1/swipe")
        .add_header("Authorization", auth.auth_header())
        .await;
    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_swipes_are_scoped_per_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user_with_profile(&["Rust"]).await;
    let auth2 = factory.create_user_with_profile(&["Rust"]).await;
    let owner = factory.create_user_with_profile(&["Go"]).await;
    let project = factory.create_project(&owner, &["Rust"]).await;

    app.server
        .post("/api/v1/swipe")
        .add_header("Authorization", auth1.auth_header())
        .json(&json!({ "project_id": project.id, "action": "like" }))
        .await
        .assert_status(StatusCode::OK);

    let list = app
        .server
        .get("/api/v1/swipe")
        .add_header("Authorization", auth2.auth_header())
        .await;

    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
