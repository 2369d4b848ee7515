//! In-memory repository implementations, used by the test suite in place of
//! MongoDB-backed ones.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Bookmark, CollaborationRequest, Project, RequestStatus, Swipe, UpdateProfile, UpdateProject,
    User, UserProfile,
};
use crate::repositories::{
    BookmarkRepository, ProfileRepository, ProjectRepository, SwipeRepository, UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepository(Mutex<Vec<User>>);

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        let mut guard = self.0.lock().await;
        if guard.iter().any(|u| u.google_sub == user.google_sub) {
            return Err(AppError::Conflict("User already exists.".to_string()));
        }
        guard.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.0.lock().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_google_sub(&self, google_sub: &str) -> AppResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .find(|u| u.google_sub == google_sub)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository(Mutex<Vec<UserProfile>>);

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: UserProfile) -> AppResult<UserProfile> {
        let mut guard = self.0.lock().await;
        if guard.iter().any(|p| p.user_id == profile.user_id) {
            return Err(AppError::Conflict(
                "User profile already exists.".to_string(),
            ));
        }
        guard.push(profile.clone());
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn update(&self, user_id: Uuid, input: &UpdateProfile) -> AppResult<UserProfile> {
        let mut guard = self.0.lock().await;
        let profile = guard
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        if let Some(firstname) = &input.firstname {
            profile.firstname = firstname.clone();
        }
        if let Some(lastname) = &input.lastname {
            profile.lastname = lastname.clone();
        }
        if let Some(bio) = &input.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(skills) = &input.skills {
            profile.skills = skills.clone();
        }
        if let Some(college_name) = &input.college_name {
            profile.college_name = college_name.clone();
        }
        if let Some(is_graduated) = input.is_graduated {
            profile.is_graduated = is_graduated;
        }
        if let Some(social_links) = &input.social_links {
            profile.social_links = social_links.clone();
        }
        if let Some(experience) = &input.experience {
            profile.experience = experience.clone();
        }
        profile.updated_at = time::OffsetDateTime::now_utc();

        Ok(profile.clone())
    }
}

#[derive(Default)]
pub struct InMemoryProjectRepository(Mutex<Vec<Project>>);

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_query(project: &Project, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    project.title.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
        || project
            .tech_stack
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
        || project.status.as_str().contains(&needle)
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, project: Project) -> AppResult<Project> {
        self.0.lock().await.push(project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        Ok(self.0.lock().await.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: Uuid, input: &UpdateProject) -> AppResult<Project> {
        let mut guard = self.0.lock().await;
        let project = guard
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        if let Some(title) = &input.title {
            project.title = title.clone();
        }
        if let Some(description) = &input.description {
            project.description = description.clone();
        }
        if let Some(tech_stack) = &input.tech_stack {
            project.tech_stack = tech_stack.clone();
        }
        if let Some(skills_needed) = &input.skills_needed {
            project.skills_needed = skills_needed.clone();
        }
        if let Some(status) = input.status {
            project.status = status;
        }
        project.updated_at = time::OffsetDateTime::now_utc();

        Ok(project.clone())
    }

    async fn list_excluding_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| p.owner_id != owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Project>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn search_excluding_owner(
        &self,
        owner_id: Uuid,
        query: &str,
    ) -> AppResult<Vec<Project>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| p.owner_id != owner_id && matches_query(p, query))
            .cloned()
            .collect())
    }

    async fn list_candidates(
        &self,
        owner_id: Uuid,
        exclude_ids: &[Uuid],
    ) -> AppResult<Vec<Project>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| p.owner_id != owner_id && !exclude_ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_with_requests(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| p.owner_id == owner_id && !p.collaboration_requests.is_empty())
            .cloned()
            .collect())
    }

    async fn push_request(
        &self,
        project_id: Uuid,
        request: CollaborationRequest,
    ) -> AppResult<()> {
        let mut guard = self.0.lock().await;
        let project = guard
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        project.collaboration_requests.push(request);
        project.updated_at = time::OffsetDateTime::now_utc();
        Ok(())
    }

    async fn set_request_status(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
        status: RequestStatus,
    ) -> AppResult<()> {
        let mut guard = self.0.lock().await;
        let project = guard
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let request = project
            .collaboration_requests
            .iter_mut()
            .find(|r| r.user_id == requester_id)
            .ok_or_else(|| AppError::NotFound("Collaboration request".to_string()))?;

        request.status = status;
        project.updated_at = time::OffsetDateTime::now_utc();
        Ok(())
    }

    async fn push_collaborator(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut guard = self.0.lock().await;
        let project = guard
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        project.collaborators.push(user_id);
        project.updated_at = time::OffsetDateTime::now_utc();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySwipeRepository(Mutex<Vec<Swipe>>);

impl InMemorySwipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SwipeRepository for InMemorySwipeRepository {
    async fn insert(&self, swipe: Swipe) -> AppResult<Swipe> {
        self.0.lock().await.push(swipe.clone());
        Ok(swipe)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Swipe>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryBookmarkRepository(Mutex<Vec<Bookmark>>);

impl InMemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    async fn insert_if_absent(&self, bookmark: Bookmark) -> AppResult<bool> {
        let mut guard = self.0.lock().await;
        if guard
            .iter()
            .any(|b| b.user_id == bookmark.user_id && b.project_id == bookmark.project_id)
        {
            return Ok(false);
        }
        guard.push(bookmark);
        Ok(true)
    }

    async fn remove(&self, user_id: Uuid, project_id: Uuid) -> AppResult<bool> {
        let mut guard = self.0.lock().await;
        let before = guard.len();
        guard.retain(|b| !(b.user_id == user_id && b.project_id == project_id));
        Ok(guard.len() < before)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Bookmark>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}
