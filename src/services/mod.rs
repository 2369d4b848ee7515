pub mod auth;
pub mod feed;

pub use auth::{AuthService, Claims, ExternalIdentity, GoogleIdentityProvider, IdentityProvider};
pub use feed::{FeedOutcome, FeedProject, FeedService};
