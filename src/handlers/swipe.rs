use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::project::ProjectResponse;
use crate::handlers::StatusMessage;
use crate::middlewares::AuthUser;
use crate::models::{Swipe, SwipeAction};
use crate::repositories::{ProjectRepository, SwipeRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct SwipeRequest {
    pub project_id: Uuid,
    pub action: SwipeAction,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikedProjectsEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Vec<ProjectResponse>,
}

// ============ Handlers ============

/// Record a like/dislike action. Duplicate swipes on the same project are
/// gated client-side, not here.
#[utoipa::path(
    post,
    path = "/api/v1/swipe",
    request_body = SwipeRequest,
    responses(
        (status = 200, description = "Swipe recorded successfully", body = StatusMessage),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Swipes"
)]
pub async fn record_swipe(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SwipeRequest>,
) -> AppResult<Json<StatusMessage>> {
    state
        .swipes
        .insert(Swipe {
            id: Uuid::new_v4(),
            user_id: user.id,
            project_id: payload.project_id,
            action: payload.action,
            created_at: OffsetDateTime::now_utc(),
        })
        .await?;

    Ok(Json(StatusMessage::ok("Swipe recorded successfully.")))
}

/// List the projects the authenticated user has liked
#[utoipa::path(
    get,
    path = "/api/v1/swipe",
    responses(
        (status = 200, description = "Liked projects fetched successfully", body = LikedProjectsEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Swipes"
)]
pub async fn liked_projects(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<LikedProjectsEnvelope>> {
    let liked_ids: Vec<Uuid> = state
        .swipes
        .list_by_user(user.id)
        .await?
        .into_iter()
        .filter(|s| s.action == SwipeAction::Like)
        .map(|s| s.project_id)
        .collect();

    let projects = state.projects.list_by_ids(&liked_ids).await?;

    Ok(Json(LikedProjectsEnvelope {
        success: true,
        message: "Liked projects fetched successfully.".to_string(),
        data: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}
