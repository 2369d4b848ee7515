use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::project::ProjectResponse;
use crate::middlewares::AuthUser;
use crate::models::OwnerDetails;
use crate::services::{FeedOutcome, FeedService};
use crate::state::AppState;

// ============ Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedProjectResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_details: Option<OwnerDetails>,
}

/// Feed payload. The two no-content outcomes carry advisory lists instead
/// of projects and are not errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<FeedProjectResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

fn advisory(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ============ Handlers ============

/// Get the swipe feed for the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    responses(
        (status = 200, description = "Feed assembled", body = FeedResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Feed"
)]
pub async fn get_feed(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<FeedResponse>> {
    let response = match FeedService::assemble(&state, user.id).await? {
        FeedOutcome::NoCandidates => FeedResponse {
            success: false,
            message: "No projects available.".to_string(),
            project_count: None,
            projects: None,
            suggestions: Some(advisory(&[
                "Try broadening your tech stack",
                "Check back later for new projects",
                "Consider creating your own project",
            ])),
            recommendations: None,
        },
        FeedOutcome::NoSkillMatch => FeedResponse {
            success: false,
            message: "No projects match your skills.".to_string(),
            project_count: None,
            projects: None,
            suggestions: None,
            recommendations: Some(advisory(&[
                "Expand your skill set",
                "Adjust your profile skills",
                "Create a project with your current skills",
            ])),
        },
        FeedOutcome::Matches(matches) => {
            let projects: Vec<FeedProjectResponse> = matches
                .into_iter()
                .map(|m| FeedProjectResponse {
                    project: m.project.into(),
                    owner_details: m.owner_details,
                })
                .collect();

            FeedResponse {
                success: true,
                message: "Projects fetched successfully!".to_string(),
                project_count: Some(projects.len()),
                projects: Some(projects),
                suggestions: None,
                recommendations: None,
            }
        }
    };

    Ok(Json(response))
}
