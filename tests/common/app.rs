use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;

use devmatch::build_router;
use devmatch::config::Config;
use devmatch::error::{AppError, AppResult};
use devmatch::repositories::{
    InMemoryBookmarkRepository, InMemoryProfileRepository, InMemoryProjectRepository,
    InMemorySwipeRepository, InMemoryUserRepository,
};
use devmatch::services::{ExternalIdentity, IdentityProvider};
use devmatch::state::AppState;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        mongodb_url: "mongodb://localhost:27017".to_string(),
        mongodb_database: "devmatch_test".to_string(),
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_expiration_hours: 24,
        google_client_id: "test-client.apps.googleusercontent.com".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Identity provider stub accepting credentials of the form "subject:email"
pub struct StubIdentityProvider;

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn verify_credential(&self, credential: &str) -> AppResult<ExternalIdentity> {
        let (subject, email) = credential
            .split_once(':')
            .ok_or(AppError::InvalidCredentials)?;

        Ok(ExternalIdentity {
            subject: subject.to_string(),
            email: email.to_string(),
        })
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over in-memory repositories
    pub async fn new() -> Self {
        let config = test_config();

        let state = AppState::with_repositories(
            config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(InMemorySwipeRepository::new()),
            Arc::new(InMemoryBookmarkRepository::new()),
            Arc::new(StubIdentityProvider),
        );

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
