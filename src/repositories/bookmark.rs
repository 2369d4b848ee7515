use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Bookmark;
use crate::repositories::{parse_uuid, BookmarkRepository};

#[derive(Debug, Serialize, Deserialize)]
struct BookmarkDocument {
    id: String,
    user_id: String,
    project_id: String,
    created_at: bson::DateTime,
}

impl From<&Bookmark> for BookmarkDocument {
    fn from(b: &Bookmark) -> Self {
        Self {
            id: b.id.to_string(),
            user_id: b.user_id.to_string(),
            project_id: b.project_id.to_string(),
            created_at: bson::DateTime::from_time_0_3(b.created_at),
        }
    }
}

impl TryFrom<BookmarkDocument> for Bookmark {
    type Error = AppError;

    fn try_from(d: BookmarkDocument) -> AppResult<Self> {
        Ok(Self {
            id: parse_uuid(&d.id)?,
            user_id: parse_uuid(&d.user_id)?,
            project_id: parse_uuid(&d.project_id)?,
            created_at: d.created_at.to_time_0_3(),
        })
    }
}

pub struct MongoBookmarkRepository {
    coll: Collection<BookmarkDocument>,
}

impl MongoBookmarkRepository {
    pub async fn new(db: &Database) -> AppResult<Self> {
        let coll = db.collection::<BookmarkDocument>("bookmarks");

        coll.create_index(
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "project_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

        Ok(Self { coll })
    }
}

#[async_trait]
impl BookmarkRepository for MongoBookmarkRepository {
    async fn insert_if_absent(&self, bookmark: Bookmark) -> AppResult<bool> {
        let filter = doc! {
            "user_id": bookmark.user_id.to_string(),
            "project_id": bookmark.project_id.to_string(),
        };

        if self.coll.count_documents(filter).await? > 0 {
            return Ok(false);
        }

        self.coll.insert_one(BookmarkDocument::from(&bookmark)).await?;
        Ok(true)
    }

    async fn remove(&self, user_id: Uuid, project_id: Uuid) -> AppResult<bool> {
        let result = self
            .coll
            .delete_one(doc! {
                "user_id": user_id.to_string(),
                "project_id": project_id.to_string(),
            })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Bookmark>> {
        let docs: Vec<BookmarkDocument> = self
            .coll
            .find(doc! { "user_id": user_id.to_string() })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(Bookmark::try_from).collect()
    }
}
