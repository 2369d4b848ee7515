use async_trait::async_trait;
use bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ExperienceEntry, SocialLinks, UpdateProfile, UserProfile};
use crate::repositories::{parse_uuid, ProfileRepository};

#[derive(Debug, Serialize, Deserialize)]
struct ProfileDocument {
    id: String,
    user_id: String,
    email: String,
    firstname: String,
    lastname: String,
    bio: Option<String>,
    skills: Vec<String>,
    college_name: String,
    is_graduated: bool,
    social_links: SocialLinks,
    experience: Vec<ExperienceEntry>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<&UserProfile> for ProfileDocument {
    fn from(p: &UserProfile) -> Self {
        Self {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            email: p.email.clone(),
            firstname: p.firstname.clone(),
            lastname: p.lastname.clone(),
            bio: p.bio.clone(),
            skills: p.skills.clone(),
            college_name: p.college_name.clone(),
            is_graduated: p.is_graduated,
            social_links: p.social_links.clone(),
            experience: p.experience.clone(),
            created_at: bson::DateTime::from_time_0_3(p.created_at),
            updated_at: bson::DateTime::from_time_0_3(p.updated_at),
        }
    }
}

impl TryFrom<ProfileDocument> for UserProfile {
    type Error = AppError;

    fn try_from(d: ProfileDocument) -> AppResult<Self> {
        Ok(Self {
            id: parse_uuid(&d.id)?,
            user_id: parse_uuid(&d.user_id)?,
            email: d.email,
            firstname: d.firstname,
            lastname: d.lastname,
            bio: d.bio,
            skills: d.skills,
            college_name: d.college_name,
            is_graduated: d.is_graduated,
            social_links: d.social_links,
            experience: d.experience,
            created_at: d.created_at.to_time_0_3(),
            updated_at: d.updated_at.to_time_0_3(),
        })
    }
}

pub struct MongoProfileRepository {
    coll: Collection<ProfileDocument>,
}

impl MongoProfileRepository {
    pub async fn new(db: &Database) -> AppResult<Self> {
        let coll = db.collection::<ProfileDocument>("user_profiles");

        // One profile per user
        coll.create_index(
            IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

        Ok(Self { coll })
    }
}

#[async_trait]
impl ProfileRepository for MongoProfileRepository {
    async fn insert(&self, profile: UserProfile) -> AppResult<UserProfile> {
        let existing = self
            .coll
            .count_documents(doc! { "user_id": profile.user_id.to_string() })
            .await?;
        if existing > 0 {
            return Err(AppError::Conflict(
                "User profile already exists.".to_string(),
            ));
        }

        self.coll.insert_one(ProfileDocument::from(&profile)).await?;
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.coll
            .find_one(doc! { "user_id": user_id.to_string() })
            .await?
            .map(UserProfile::try_from)
            .transpose()
    }

    async fn update(&self, user_id: Uuid, input: &UpdateProfile) -> AppResult<UserProfile> {
        let mut set = doc! { "updated_at": bson::DateTime::now() };

        if let Some(firstname) = &input.firstname {
            set.insert("firstname", firstname.as_str());
        }
        if let Some(lastname) = &input.lastname {
            set.insert("lastname", lastname.as_str());
        }
        if let Some(bio) = &input.bio {
            set.insert("bio", bio.as_str());
        }
        if let Some(skills) = &input.skills {
            set.insert("skills", skills.clone());
        }
        if let Some(college_name) = &input.college_name {
            set.insert("college_name", college_name.as_str());
        }
        if let Some(is_graduated) = input.is_graduated {
            set.insert("is_graduated", is_graduated);
        }
        if let Some(social_links) = &input.social_links {
            let value = bson::to_bson(social_links)
                .map_err(|e| AppError::Database(format!("BSON encode error: {}", e)))?;
            set.insert("social_links", value);
        }
        if let Some(experience) = &input.experience {
            let value = bson::to_bson(experience)
                .map_err(|e| AppError::Database(format!("BSON encode error: {}", e)))?;
            set.insert("experience", value);
        }

        let updated = self
            .coll
            .find_one_and_update(doc! { "user_id": user_id.to_string() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        updated.try_into()
    }
}
