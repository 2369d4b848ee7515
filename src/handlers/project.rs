use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::validate_required;
use crate::middlewares::AuthUser;
use crate::models::{
    CollaborationRequest, CreateProject, Project, ProjectStatus, UpdateProject,
};
use crate::repositories::{ProfileRepository, ProjectRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub skills_needed: Vec<String>,
    pub status: ProjectStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub skills_needed: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring matched against title, description,
    /// tech stack and status
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub skills_needed: Vec<String>,
    pub status: ProjectStatus,
    pub collaborators: Vec<Uuid>,
    pub collaboration_requests: Vec<CollaborationRequest>,
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            owner_name: p.owner_name,
            title: p.title,
            description: p.description,
            tech_stack: p.tech_stack,
            skills_needed: p.skills_needed,
            status: p.status,
            collaborators: p.collaborators,
            collaboration_requests: p.collaboration_requests,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectEnvelope {
    pub success: bool,
    pub message: String,
    pub data: ProjectResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Vec<ProjectResponse>,
}

fn list_envelope(message: &str, projects: Vec<Project>) -> ProjectListEnvelope {
    ProjectListEnvelope {
        success: true,
        message: message.to_string(),
        data: projects.into_iter().map(ProjectResponse::from).collect(),
    }
}

// ============ Handlers ============

/// Create a new project owned by the authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created successfully", body = ProjectEnvelope),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<Json<ProjectEnvelope>> {
    let profile = state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    validate_required(&payload.title, "Title")?;
    validate_required(&payload.description, "Description")?;

    let input = CreateProject {
        title: payload.title,
        description: payload.description,
        tech_stack: payload.tech_stack,
        skills_needed: payload.skills_needed,
        status: payload.status,
    };

    let now = OffsetDateTime::now_utc();
    let project = state
        .projects
        .insert(Project {
            id: Uuid::new_v4(),
            owner_id: user.id,
            // The feed shows the owner by first name
            owner_name: profile.firstname,
            title: input.title,
            description: input.description,
            tech_stack: input.tech_stack,
            skills_needed: input.skills_needed,
            status: input.status,
            collaborators: Vec::new(),
            collaboration_requests: Vec::new(),
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(Json(ProjectEnvelope {
        success: true,
        message: "Project created successfully.".to_string(),
        data: project.into(),
    }))
}

/// List every project except the caller's own
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Projects fetched successfully", body = ProjectListEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProjectListEnvelope>> {
    state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    let projects = state.projects.list_excluding_owner(user.id).await?;
    Ok(Json(list_envelope("Projects fetched successfully.", projects)))
}

/// Search projects by title, description, tech stack or status
#[utoipa::path(
    get,
    path = "/api/v1/projects/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Projects found successfully", body = ProjectListEnvelope),
        (status = 400, description = "Missing search query"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn search_projects(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ProjectListEnvelope>> {
    state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Search query parameter is required.".to_string())
        })?;

    let projects = state.projects.search_excluding_owner(user.id, query).await?;
    Ok(Json(list_envelope("Projects found successfully.", projects)))
}

/// List the caller's own projects
#[utoipa::path(
    get,
    path = "/api/v1/projects/myprojects",
    responses(
        (status = 200, description = "User's projects fetched successfully", body = ProjectListEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No projects for this user")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn my_projects(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProjectListEnvelope>> {
    let projects = state.projects.list_by_owner(user.id).await?;

    if projects.is_empty() {
        return Err(AppError::NotFound("Projects for this user".to_string()));
    }

    Ok(Json(list_envelope(
        "User's projects fetched successfully.",
        projects,
    )))
}

/// Get one of the caller's projects by id
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project fetched successfully", body = ProjectEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the project owner"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn get_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectEnvelope>> {
    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    if project.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to view this project.".to_string(),
        ));
    }

    Ok(Json(ProjectEnvelope {
        success: true,
        message: "Project fetched successfully.".to_string(),
        data: project.into(),
    }))
}

/// Update one of the caller's projects
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectEnvelope),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the project owner"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectEnvelope>> {
    state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    if let Some(title) = &payload.title {
        validate_required(title, "Title")?;
    }
    if let Some(description) = &payload.description {
        validate_required(description, "Description")?;
    }

    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    if project.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to update this project.".to_string(),
        ));
    }

    let input = UpdateProject {
        title: payload.title,
        description: payload.description,
        tech_stack: payload.tech_stack,
        skills_needed: payload.skills_needed,
        status: payload.status,
    };

    let project = state.projects.update(id, &input).await?;

    Ok(Json(ProjectEnvelope {
        success: true,
        message: "Project updated successfully.".to_string(),
        data: project.into(),
    }))
}
