use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::validate_required;
use crate::models::{User, UserResponse};
use crate::repositories::UserRepository;
use crate::services::{AuthService, IdentityProvider};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct GoogleAuthRequest {
    /// Credential issued by Google sign-in
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthData {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub data: AuthData,
}

// ============ Handlers ============

/// Exchange a Google credential for a session token
#[utoipa::path(
    post,
    path = "/api/v1/user/google-auth",
    request_body = GoogleAuthRequest,
    responses(
        (status = 200, description = "Signed in successfully", body = AuthResponse),
        (status = 401, description = "Credential rejected by the identity provider"),
        (status = 400, description = "Validation error")
    ),
    tag = "Auth"
)]
pub async fn google_auth(
    State(state): State<AppState>,
    Json(payload): Json<GoogleAuthRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_required(&payload.token, "Credential token")?;

    let identity = state.identity.verify_credential(&payload.token).await?;

    // Find-or-create: the account is created on first sign-in
    let user = match state.users.find_by_google_sub(&identity.subject).await? {
        Some(user) => user,
        None => {
            if identity.email.is_empty() {
                return Err(AppError::Validation(
                    "Credential carries no email address.".to_string(),
                ));
            }

            state
                .users
                .insert(User {
                    id: Uuid::new_v4(),
                    email: identity.email.clone(),
                    google_sub: identity.subject.clone(),
                    created_at: OffsetDateTime::now_utc(),
                })
                .await?
        }
    };

    let token = AuthService::generate_token(user.id, &user.email, &state.config)?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Signed in successfully.".to_string(),
        data: AuthData {
            token,
            user: user.into(),
        },
    }))
}
