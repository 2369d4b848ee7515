use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use devmatch::config::Config;
use devmatch::handlers::{
    AuthData, AuthResponse, BookmarkRequest, BookmarkedProjectsEnvelope,
    CollaborationRequestEntry, CollaborationRequestsEnvelope, CreateProfileRequest,
    CreateProjectRequest, FeedProjectResponse, FeedResponse, GoogleAuthRequest,
    LikedProjectsEnvelope, ProfileEnvelope, ProjectEnvelope, ProjectListEnvelope, ProjectResponse,
    RespondToRequestBody, StatusMessage, SwipeRequest, UpdateProfileRequest, UpdateProjectRequest,
};
use devmatch::models::{
    CollaborationRequest, ExperienceEntry, OwnerDetails, ProfileResponse, ProjectStatus,
    RequestDecision, RequestStatus, SocialLinks, SwipeAction, UserResponse,
};
use devmatch::state::AppState;
use devmatch::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::google_auth,
        handlers::profile::create_profile,
        handlers::profile::get_profile,
        handlers::profile::update_profile,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::search_projects,
        handlers::project::my_projects,
        handlers::project::get_project,
        handlers::project::update_project,
        handlers::feed::get_feed,
        handlers::bookmark::list_bookmarks,
        handlers::bookmark::add_bookmark,
        handlers::bookmark::remove_bookmark,
        handlers::swipe::record_swipe,
        handlers::swipe::liked_projects,
        handlers::collaboration::send_request,
        handlers::collaboration::respond_to_request,
        handlers::collaboration::list_requests,
    ),
    components(schemas(
        GoogleAuthRequest,
        AuthResponse,
        AuthData,
        UserResponse,
        CreateProfileRequest,
        UpdateProfileRequest,
        ProfileEnvelope,
        ProfileResponse,
        SocialLinks,
        ExperienceEntry,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectEnvelope,
        ProjectListEnvelope,
        ProjectResponse,
        ProjectStatus,
        CollaborationRequest,
        RequestStatus,
        RequestDecision,
        FeedResponse,
        FeedProjectResponse,
        OwnerDetails,
        BookmarkRequest,
        BookmarkedProjectsEnvelope,
        SwipeRequest,
        SwipeAction,
        LikedProjectsEnvelope,
        RespondToRequestBody,
        CollaborationRequestEntry,
        CollaborationRequestsEnvelope,
        StatusMessage,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Google sign-in and session tokens"),
        (name = "Profiles", description = "User profile management"),
        (name = "Projects", description = "Project management and search"),
        (name = "Feed", description = "Swipe feed"),
        (name = "Bookmarks", description = "Saved projects"),
        (name = "Swipes", description = "Like/dislike actions"),
        (name = "Collaboration", description = "Collaboration request workflow")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to MongoDB)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();
}
