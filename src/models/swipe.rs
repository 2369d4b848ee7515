use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

/// Recorded like/dislike action. Append-only; the server does not enforce
/// uniqueness per (user, project).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub action: SwipeAction,
    pub created_at: OffsetDateTime,
}
