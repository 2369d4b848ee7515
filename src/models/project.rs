use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Open,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Wire representation, used for substring search over status
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Embedded collaboration request on a project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollaborationRequest {
    pub user_id: Uuid,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Denormalized from the owner's profile at creation time
    pub owner_name: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub skills_needed: Vec<String>,
    pub status: ProjectStatus,
    pub collaborators: Vec<Uuid>,
    pub collaboration_requests: Vec<CollaborationRequest>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Project {
    pub fn request_from(&self, user_id: Uuid) -> Option<&CollaborationRequest> {
        self.collaboration_requests
            .iter()
            .find(|r| r.user_id == user_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub skills_needed: Vec<String>,
    pub status: ProjectStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub skills_needed: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
}

/// Owner's decision on a pending collaboration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accept,
    Reject,
}
