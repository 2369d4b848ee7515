pub mod auth;
pub mod bookmark;
pub mod collaboration;
pub mod common;
pub mod feed;
pub mod profile;
pub mod project;
pub mod swipe;

pub use auth::{google_auth, AuthData, AuthResponse, GoogleAuthRequest};
pub use bookmark::{
    add_bookmark, list_bookmarks, remove_bookmark, BookmarkRequest, BookmarkedProjectsEnvelope,
};
pub use collaboration::{
    list_requests, respond_to_request, send_request, CollaborationRequestEntry,
    CollaborationRequestsEnvelope, RespondToRequestBody,
};
pub use common::{validate_required, StatusMessage};
pub use feed::{get_feed, FeedProjectResponse, FeedResponse};
pub use profile::{
    create_profile, get_profile, update_profile, CreateProfileRequest, ProfileEnvelope,
    UpdateProfileRequest,
};
pub use project::{
    create_project, get_project, list_projects, my_projects, search_projects, update_project,
    CreateProjectRequest, ProjectEnvelope, ProjectListEnvelope, ProjectResponse,
    UpdateProjectRequest,
};
pub use swipe::{liked_projects, record_swipe, LikedProjectsEnvelope, SwipeRequest};
