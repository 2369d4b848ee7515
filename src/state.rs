use std::sync::Arc;

use mongodb::Client as MongoClient;

use crate::config::Config;
use crate::repositories::{
    BookmarkRepository, MongoBookmarkRepository, MongoProfileRepository, MongoProjectRepository,
    MongoSwipeRepository, MongoUserRepository, ProfileRepository, ProjectRepository,
    SwipeRepository, UserRepository,
};
use crate::services::{GoogleIdentityProvider, IdentityProvider};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub swipes: Arc<dyn SwipeRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState backed by MongoDB
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let client = MongoClient::with_uri_str(&config.mongodb_url)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;
        let db = client.database(&config.mongodb_database);

        let users = MongoUserRepository::new(&db)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;
        let profiles = MongoProfileRepository::new(&db)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;
        let projects = MongoProjectRepository::new(&db)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;
        let swipes = MongoSwipeRepository::new(&db)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;
        let bookmarks = MongoBookmarkRepository::new(&db)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;

        let identity: Arc<dyn IdentityProvider> = Arc::new(GoogleIdentityProvider::new(
            config.google_client_id.clone(),
        ));

        Ok(Self {
            users: Arc::new(users),
            profiles: Arc::new(profiles),
            projects: Arc::new(projects),
            swipes: Arc::new(swipes),
            bookmarks: Arc::new(bookmarks),
            identity,
            config,
        })
    }

    /// Create AppState with injected repositories and identity provider
    /// (for testing)
    #[allow(clippy::too_many_arguments)]
    pub fn with_repositories(
        config: Config,
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        projects: Arc<dyn ProjectRepository>,
        swipes: Arc<dyn SwipeRepository>,
        bookmarks: Arc<dyn BookmarkRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            users,
            profiles,
            projects,
            swipes,
            bookmarks,
            identity,
            config,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("MongoDB connection error: {0}")]
    Mongo(String),
}
