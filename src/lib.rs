// Library crate for devmatch
// Exports modules for use by the server binary and tests

pub mod chat;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    add_bookmark, create_profile, create_project, get_feed, get_profile, get_project, google_auth,
    liked_projects, list_bookmarks, list_projects, list_requests, my_projects, record_swipe,
    remove_bookmark, respond_to_request, search_projects, send_request, update_profile,
    update_project,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Profile routes
        .route("/api/v1/user/user-profile", get(get_profile))
        .route("/api/v1/user/user-profile", post(create_profile))
        .route("/api/v1/user/user-profile", put(update_profile))
        // Project routes
        .route("/api/v1/projects/search", get(search_projects))
        .route("/api/v1/projects/myprojects", get(my_projects))
        .route("/api/v1/projects", get(list_projects))
        .route("/api/v1/projects", post(create_project))
        .route("/api/v1/projects/{id}", get(get_project))
        .route("/api/v1/projects/{id}", put(update_project))
        // Feed route
        .route("/api/v1/feed", get(get_feed))
        // Bookmark routes
        .route("/api/v1/bookmarks", get(list_bookmarks))
        .route("/api/v1/bookmarks", post(add_bookmark))
        .route("/api/v1/bookmarks/{project_id}", delete(remove_bookmark))
        // Swipe routes
        .route("/api/v1/swipe", get(liked_projects))
        .route("/api/v1/swipe", post(record_swipe))
        // Collaboration routes
        .route(
            "/api/v1/project/{project_id}/collaboration-requests",
            post(send_request),
        )
        .route(
            "/api/v1/project/{project_id}/collaboration-requests",
            put(respond_to_request),
        )
        .route("/api/v1/collaboration-requests", get(list_requests))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, devmatch!" }))
        // Public auth routes
        .route("/api/v1/user/google-auth", post(google_auth))
        // Protected routes
        .merge(protected_routes)
        .with_state(state)
}
