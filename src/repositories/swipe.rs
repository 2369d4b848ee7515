use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Swipe, SwipeAction};
use crate::repositories::{parse_uuid, SwipeRepository};

#[derive(Debug, Serialize, Deserialize)]
struct SwipeDocument {
    id: String,
    user_id: String,
    project_id: String,
    action: SwipeAction,
    created_at: bson::DateTime,
}

impl From<&Swipe> for SwipeDocument {
    fn from(s: &Swipe) -> Self {
        Self {
            id: s.id.to_string(),
            user_id: s.user_id.to_string(),
            project_id: s.project_id.to_string(),
            action: s.action,
            created_at: bson::DateTime::from_time_0_3(s.created_at),
        }
    }
}

impl TryFrom<SwipeDocument> for Swipe {
    type Error = AppError;

    fn try_from(d: SwipeDocument) -> AppResult<Self> {
        Ok(Self {
            id: parse_uuid(&d.id)?,
            user_id: parse_uuid(&d.user_id)?,
            project_id: parse_uuid(&d.project_id)?,
            action: d.action,
            created_at: d.created_at.to_time_0_3(),
        })
    }
}

pub struct MongoSwipeRepository {
    coll: Collection<SwipeDocument>,
}

impl MongoSwipeRepository {
    pub async fn new(db: &Database) -> AppResult<Self> {
        let coll = db.collection::<SwipeDocument>("swipes");

        // Lookup index only; (user, project) uniqueness is intentionally
        // not enforced here
        coll.create_index(IndexModel::builder().keys(doc! { "user_id": 1 }).build())
            .await?;

        Ok(Self { coll })
    }
}

#[async_trait]
impl SwipeRepository for MongoSwipeRepository {
    async fn insert(&self, swipe: Swipe) -> AppResult<Swipe> {
        self.coll.insert_one(SwipeDocument::from(&swipe)).await?;
        Ok(swipe)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Swipe>> {
        let docs: Vec<SwipeDocument> = self
            .coll
            .find(doc! { "user_id": user_id.to_string() })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(Swipe::try_from).collect()
    }
}
