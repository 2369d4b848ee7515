use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::validate_required;
use crate::middlewares::AuthUser;
use crate::models::{
    CreateProfile, ExperienceEntry, ProfileResponse, SocialLinks, UpdateProfile, UserProfile,
};
use crate::repositories::{ProfileRepository, UserRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    pub firstname: String,
    pub lastname: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub college_name: String,
    #[serde(default)]
    pub is_graduated: bool,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub college_name: Option<String>,
    pub is_graduated: Option<bool>,
    pub social_links: Option<SocialLinks>,
    pub experience: Option<Vec<ExperienceEntry>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileEnvelope {
    pub success: bool,
    pub message: String,
    pub data: ProfileResponse,
}

// ============ Handlers ============

/// Create the profile for the authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/user/user-profile",
    request_body = CreateProfileRequest,
    responses(
        (status = 200, description = "Profile created successfully", body = ProfileEnvelope),
        (status = 400, description = "Validation error or profile already exists"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profiles"
)]
pub async fn create_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProfileRequest>,
) -> AppResult<Json<ProfileEnvelope>> {
    let account = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    validate_required(&payload.firstname, "First name")?;
    validate_required(&payload.lastname, "Last name")?;
    validate_required(&payload.college_name, "College name")?;

    let input = CreateProfile {
        firstname: payload.firstname,
        lastname: payload.lastname,
        bio: payload.bio,
        skills: payload.skills,
        college_name: payload.college_name,
        is_graduated: payload.is_graduated,
        social_links: payload.social_links,
        experience: payload.experience,
    };

    let now = OffsetDateTime::now_utc();
    let profile = state
        .profiles
        .insert(UserProfile {
            id: Uuid::new_v4(),
            user_id: account.id,
            email: account.email,
            firstname: input.firstname,
            lastname: input.lastname,
            bio: input.bio,
            skills: input.skills,
            college_name: input.college_name,
            is_graduated: input.is_graduated,
            social_links: input.social_links,
            experience: input.experience,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: "User profile created successfully.".to_string(),
        data: profile.into(),
    }))
}

/// Fetch the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/v1/user/user-profile",
    responses(
        (status = 200, description = "Profile fetched successfully", body = ProfileEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profiles"
)]
pub async fn get_profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileEnvelope>> {
    let profile = state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile".to_string()))?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: "User profile fetched successfully.".to_string(),
        data: profile.into(),
    }))
}

/// Update the authenticated user's profile; absent fields keep their value
#[utoipa::path(
    put,
    path = "/api/v1/user/user-profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = ProfileEnvelope),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profiles"
)]
pub async fn update_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileEnvelope>> {
    if let Some(firstname) = &payload.firstname {
        validate_required(firstname, "First name")?;
    }
    if let Some(lastname) = &payload.lastname {
        validate_required(lastname, "Last name")?;
    }
    if let Some(college_name) = &payload.college_name {
        validate_required(college_name, "College name")?;
    }

    let input = UpdateProfile {
        firstname: payload.firstname,
        lastname: payload.lastname,
        bio: payload.bio,
        skills: payload.skills,
        college_name: payload.college_name,
        is_graduated: payload.is_graduated,
        social_links: payload.social_links,
        experience: payload.experience,
    };

    let profile = state.profiles.update(user.id, &input).await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: "User profile updated successfully.".to_string(),
        data: profile.into(),
    }))
}
