pub mod bookmark;
pub mod memory;
pub mod profile;
pub mod project;
pub mod swipe;
pub mod user;

pub use bookmark::MongoBookmarkRepository;
pub use memory::{
    InMemoryBookmarkRepository, InMemoryProfileRepository, InMemoryProjectRepository,
    InMemorySwipeRepository, InMemoryUserRepository,
};
pub use profile::MongoProfileRepository;
pub use project::MongoProjectRepository;
pub use swipe::MongoSwipeRepository;
pub use user::MongoUserRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Bookmark, CollaborationRequest, Project, RequestStatus, Swipe, UpdateProfile, UpdateProject,
    User, UserProfile,
};

/// Identity store. Users are created on first sign-in and never mutated.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_google_sub(&self, google_sub: &str) -> AppResult<Option<User>>;
}

/// Extended profile store, one document per user.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile; a second profile for the same user is a conflict.
    async fn insert(&self, profile: UserProfile) -> AppResult<UserProfile>;
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;
    async fn update(&self, user_id: Uuid, input: &UpdateProfile) -> AppResult<UserProfile>;
}

/// Project store, including the embedded collaboration-request list.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, project: Project) -> AppResult<Project>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>>;
    async fn update(&self, id: Uuid, input: &UpdateProject) -> AppResult<Project>;

    /// Every project not owned by `owner_id`
    async fn list_excluding_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>>;
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>>;
    async fn list_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Project>>;

    /// Case-insensitive substring match over title, description, tech stack
    /// and status, excluding the caller's own projects
    async fn search_excluding_owner(&self, owner_id: Uuid, query: &str)
        -> AppResult<Vec<Project>>;

    /// Feed candidates: not owned by `owner_id` and not in `exclude_ids`
    async fn list_candidates(&self, owner_id: Uuid, exclude_ids: &[Uuid])
        -> AppResult<Vec<Project>>;

    /// Owner's projects that carry at least one collaboration request
    async fn list_with_requests(&self, owner_id: Uuid) -> AppResult<Vec<Project>>;

    async fn push_request(&self, project_id: Uuid, request: CollaborationRequest)
        -> AppResult<()>;
    async fn set_request_status(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
        status: RequestStatus,
    ) -> AppResult<()>;
    async fn push_collaborator(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()>;
}

/// Append-only swipe history.
#[async_trait]
pub trait SwipeRepository: Send + Sync {
    async fn insert(&self, swipe: Swipe) -> AppResult<Swipe>;
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Swipe>>;
}

/// Per-user set of saved projects.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Returns false when the (user, project) pair was already bookmarked
    async fn insert_if_absent(&self, bookmark: Bookmark) -> AppResult<bool>;
    /// Returns false when there was nothing to remove
    async fn remove(&self, user_id: Uuid, project_id: Uuid) -> AppResult<bool>;
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Bookmark>>;
}

pub(crate) fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::Database(format!("Malformed id {}: {}", raw, e)))
}
