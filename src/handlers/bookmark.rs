use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ProjectResponse;
use crate::handlers::StatusMessage;
use crate::middlewares::AuthUser;
use crate::models::Bookmark;
use crate::repositories::{BookmarkRepository, ProjectRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookmarkRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookmarkedProjectsEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Vec<ProjectResponse>,
}

// ============ Handlers ============

/// List the authenticated user's bookmarked projects
#[utoipa::path(
    get,
    path = "/api/v1/bookmarks",
    responses(
        (status = 200, description = "Bookmarks fetched successfully", body = BookmarkedProjectsEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Bookmarks"
)]
pub async fn list_bookmarks(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<BookmarkedProjectsEnvelope>> {
    let project_ids: Vec<Uuid> = state
        .bookmarks
        .list_by_user(user.id)
        .await?
        .into_iter()
        .map(|b| b.project_id)
        .collect();

    let projects = state.projects.list_by_ids(&project_ids).await?;

    Ok(Json(BookmarkedProjectsEnvelope {
        success: true,
        message: "Bookmarks fetched successfully.".to_string(),
        data: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}

/// Bookmark a project (no-op when already bookmarked)
#[utoipa::path(
    post,
    path = "/api/v1/bookmarks",
    request_body = BookmarkRequest,
    responses(
        (status = 200, description = "Project bookmarked", body = StatusMessage),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Bookmarks"
)]
pub async fn add_bookmark(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<BookmarkRequest>,
) -> AppResult<Json<StatusMessage>> {
    state
        .projects
        .find_by_id(payload.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    let inserted = state
        .bookmarks
        .insert_if_absent(Bookmark {
            id: Uuid::new_v4(),
            user_id: user.id,
            project_id: payload.project_id,
            created_at: OffsetDateTime::now_utc(),
        })
        .await?;

    let message = if inserted {
        "Project bookmarked."
    } else {
        "Project already bookmarked."
    };

    Ok(Json(StatusMessage::ok(message)))
}

/// Remove a bookmark (no-op when absent)
#[utoipa::path(
    delete,
    path = "/api/v1/bookmarks/{project_id}",
    params(
        ("project_id" = Uuid, Path, description = "Bookmarked project ID")
    ),
    responses(
        (status = 200, description = "Bookmark removed", body = StatusMessage),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Bookmarks"
)]
pub async fn remove_bookmark(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<StatusMessage>> {
    let removed = state.bookmarks.remove(user.id, project_id).await?;

    let message = if removed {
        "Bookmark removed."
    } else {
        "Project was not bookmarked."
    };

    Ok(Json(StatusMessage::ok(message)))
}
