use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// One internship or employment entry on a profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExperienceEntry {
    pub company_name: String,
    pub title: String,
    pub description: String,
}

/// Extended profile document, 1:1 with a User
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Copied from the User at creation time
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub college_name: String,
    pub is_graduated: bool,
    pub social_links: SocialLinks,
    pub experience: Vec<ExperienceEntry>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Profile creation DTO
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub firstname: String,
    pub lastname: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub college_name: String,
    pub is_graduated: bool,
    pub social_links: SocialLinks,
    pub experience: Vec<ExperienceEntry>,
}

/// Profile update DTO; absent fields keep their current value
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub college_name: Option<String>,
    pub is_graduated: Option<bool>,
    pub social_links: Option<SocialLinks>,
    pub experience: Option<Vec<ExperienceEntry>>,
}

/// Public profile view
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub college_name: String,
    pub is_graduated: bool,
    pub social_links: SocialLinks,
    pub experience: Vec<ExperienceEntry>,
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

impl From<UserProfile> for ProfileResponse {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            email: p.email,
            firstname: p.firstname,
            lastname: p.lastname,
            bio: p.bio,
            skills: p.skills,
            college_name: p.college_name,
            is_graduated: p.is_graduated,
            social_links: p.social_links,
            experience: p.experience,
            created_at: p.created_at,
        }
    }
}

/// Profile subset attached to each feed candidate
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub social_links: SocialLinks,
    pub skills: Vec<String>,
    pub college_name: String,
    pub is_graduated: bool,
    pub experience: Vec<ExperienceEntry>,
}

impl From<UserProfile> for OwnerDetails {
    fn from(p: UserProfile) -> Self {
        Self {
            bio: p.bio,
            social_links: p.social_links,
            skills: p.skills,
            college_name: p.college_name,
            is_graduated: p.is_graduated,
            experience: p.experience,
        }
    }
}
