use async_trait::async_trait;
use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::{parse_uuid, UserRepository};

/// User document as stored in MongoDB (string ids, BSON timestamps)
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    id: String,
    email: String,
    google_sub: String,
    created_at: bson::DateTime,
}

impl From<&User> for UserDocument {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            google_sub: u.google_sub.clone(),
            created_at: bson::DateTime::from_time_0_3(u.created_at),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = AppError;

    fn try_from(d: UserDocument) -> AppResult<Self> {
        Ok(Self {
            id: parse_uuid(&d.id)?,
            email: d.email,
            google_sub: d.google_sub,
            created_at: d.created_at.to_time_0_3(),
        })
    }
}

pub struct MongoUserRepository {
    coll: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub async fn new(db: &Database) -> AppResult<Self> {
        let coll = db.collection::<UserDocument>("users");

        coll.create_index(
            IndexModel::builder()
                .keys(doc! { "google_sub": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

        Ok(Self { coll })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        self.coll.insert_one(UserDocument::from(&user)).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.coll
            .find_one(doc! { "id": id.to_string() })
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_google_sub(&self, google_sub: &str) -> AppResult<Option<User>> {
        self.coll
            .find_one(doc! { "google_sub": google_sub })
            .await?
            .map(User::try_from)
            .transpose()
    }
}
