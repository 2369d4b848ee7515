use time::OffsetDateTime;
use uuid::Uuid;

use devmatch::models::{
    Project, ProjectStatus, SocialLinks, User, UserProfile,
};
use devmatch::repositories::{ProfileRepository, ProjectRepository, UserRepository};
use devmatch::services::AuthService;
use devmatch::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user (no profile yet) and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);

        let user = self
            .state
            .users
            .insert(User {
                id: Uuid::new_v4(),
                email: email.clone(),
                google_sub: format!("sub-{}", unique_id),
                created_at: OffsetDateTime::now_utc(),
            })
            .await
            .unwrap();

        let token = AuthService::generate_token(user.id, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Create a profile for an existing user with the given skills
    pub async fn create_profile(&self, auth: &TestAuth, skills: &[&str]) -> UserProfile {
        let now = OffsetDateTime::now_utc();

        self.state
            .profiles
            .insert(UserProfile {
                id: Uuid::new_v4(),
                user_id: auth.user_id,
                email: auth.email.clone(),
                firstname: "Test".to_string(),
                lastname: "User".to_string(),
                bio: Some("Builds things for tests".to_string()),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                college_name: "Test College".to_string(),
                is_graduated: false,
                social_links: SocialLinks::default(),
                experience: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap()
    }

    /// Create a user with a profile in one step
    pub async fn create_user_with_profile(&self, skills: &[&str]) -> TestAuth {
        let auth = self.create_user().await;
        self.create_profile(&auth, skills).await;
        auth
    }

    /// Create a test project
    pub async fn create_project(&self, owner: &TestAuth, skills_needed: &[&str]) -> Project {
        self.create_project_with_title(
            owner,
            &format!("Test Project {}", Uuid::new_v4()),
            skills_needed,
        )
        .await
    }

    /// Create a test project with a specific title
    pub async fn create_project_with_title(
        &self,
        owner: &TestAuth,
        title: &str,
        skills_needed: &[&str],
    ) -> Project {
        let now = OffsetDateTime::now_utc();

        self.state
            .projects
            .insert(Project {
                id: Uuid::new_v4(),
                owner_id: owner.user_id,
                owner_name: "Test".to_string(),
                title: title.to_string(),
                description: "Test project description".to_string(),
                tech_stack: vec!["Rust".to_string(), "MongoDB".to_string()],
                skills_needed: skills_needed.iter().map(|s| s.to_string()).collect(),
                status: ProjectStatus::Open,
                collaborators: Vec::new(),
                collaboration_requests: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap()
    }
}
