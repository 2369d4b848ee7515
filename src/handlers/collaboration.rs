use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::StatusMessage;
use crate::middlewares::AuthUser;
use crate::models::{
    CollaborationRequest, ProfileResponse, RequestDecision, RequestStatus,
};
use crate::repositories::{ProfileRepository, ProjectRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondToRequestBody {
    pub requesting_user_id: Uuid,
    pub response: RequestDecision,
}

/// One incoming request, joined with the requester's profile
#[derive(Debug, Serialize, ToSchema)]
pub struct CollaborationRequestEntry {
    pub project_id: Uuid,
    pub project_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<ProfileResponse>,
    pub request_status: RequestStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollaborationRequestsEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Vec<CollaborationRequestEntry>,
}

// ============ Handlers ============

/// Send a collaboration request to a project
#[utoipa::path(
    post,
    path = "/api/v1/project/{project_id}/collaboration-requests",
    params(
        ("project_id" = Uuid, Path, description = "Target project ID")
    ),
    responses(
        (status = 200, description = "Collaboration request sent successfully", body = StatusMessage),
        (status = 400, description = "Request already sent"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collaboration"
)]
pub async fn send_request(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<StatusMessage>> {
    state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    let project = state
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    // Duplicate check is by requester id only, regardless of status
    if project.request_from(user.id).is_some() {
        return Err(AppError::Conflict(
            "Collaboration request already sent.".to_string(),
        ));
    }

    state
        .projects
        .push_request(
            project_id,
            CollaborationRequest {
                user_id: user.id,
                status: RequestStatus::Pending,
            },
        )
        .await?;

    Ok(Json(StatusMessage::ok(
        "Collaboration request sent successfully.",
    )))
}

/// Accept or reject a pending request (project owner only)
#[utoipa::path(
    put,
    path = "/api/v1/project/{project_id}/collaboration-requests",
    params(
        ("project_id" = Uuid, Path, description = "Target project ID")
    ),
    request_body = RespondToRequestBody,
    responses(
        (status = 200, description = "Request resolved", body = StatusMessage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the project owner"),
        (status = 404, description = "Project or pending request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collaboration"
)]
pub async fn respond_to_request(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<RespondToRequestBody>,
) -> AppResult<Json<StatusMessage>> {
    state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    let project = state
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    if project.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to respond to this request.".to_string(),
        ));
    }

    // Only a pending request can be resolved; a second accept finds none
    let is_pending = project
        .collaboration_requests
        .iter()
        .any(|r| r.user_id == payload.requesting_user_id && r.status == RequestStatus::Pending);
    if !is_pending {
        return Err(AppError::NotFound("Collaboration request".to_string()));
    }

    // Two independent writes; no cross-document atomicity
    match payload.response {
        RequestDecision::Accept => {
            state
                .projects
                .set_request_status(
                    project_id,
                    payload.requesting_user_id,
                    RequestStatus::Accepted,
                )
                .await?;
            state
                .projects
                .push_collaborator(project_id, payload.requesting_user_id)
                .await?;

            Ok(Json(StatusMessage::ok("Request accepted successfully.")))
        }
        RequestDecision::Reject => {
            state
                .projects
                .set_request_status(
                    project_id,
                    payload.requesting_user_id,
                    RequestStatus::Rejected,
                )
                .await?;

            Ok(Json(StatusMessage::ok("Request rejected successfully.")))
        }
    }
}

/// List incoming requests across the caller's projects
#[utoipa::path(
    get,
    path = "/api/v1/collaboration-requests",
    responses(
        (status = 200, description = "Collaboration requests fetched successfully", body = CollaborationRequestsEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No collaboration requests")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collaboration"
)]
pub async fn list_requests(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CollaborationRequestsEnvelope>> {
    let projects = state.projects.list_with_requests(user.id).await?;

    if projects.is_empty() {
        return Err(AppError::NotFound("Collaboration requests".to_string()));
    }

    let mut entries = Vec::new();
    for project in projects {
        for request in &project.collaboration_requests {
            let user_profile = state
                .profiles
                .find_by_user(request.user_id)
                .await?
                .map(ProfileResponse::from);

            entries.push(CollaborationRequestEntry {
                project_id: project.id,
                project_title: project.title.clone(),
                user_profile,
                request_status: request.status,
            });
        }
    }

    Ok(Json(CollaborationRequestsEnvelope {
        success: true,
        message: "Collaboration requests fetched successfully.".to_string(),
        data: entries,
    }))
}
