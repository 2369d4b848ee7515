use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CollaborationRequest, Project, ProjectStatus, RequestStatus, UpdateProject,
};
use crate::repositories::{parse_uuid, ProjectRepository};

#[derive(Debug, Serialize, Deserialize)]
struct RequestDocument {
    user_id: String,
    status: RequestStatus,
}

impl From<&CollaborationRequest> for RequestDocument {
    fn from(r: &CollaborationRequest) -> Self {
        Self {
            user_id: r.user_id.to_string(),
            status: r.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectDocument {
    id: String,
    owner_id: String,
    owner_name: String,
    title: String,
    description: String,
    tech_stack: Vec<String>,
    skills_needed: Vec<String>,
    status: ProjectStatus,
    collaborators: Vec<String>,
    collaboration_requests: Vec<RequestDocument>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<&Project> for ProjectDocument {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.to_string(),
            owner_id: p.owner_id.to_string(),
            owner_name: p.owner_name.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            tech_stack: p.tech_stack.clone(),
            skills_needed: p.skills_needed.clone(),
            status: p.status,
            collaborators: p.collaborators.iter().map(Uuid::to_string).collect(),
            collaboration_requests: p
                .collaboration_requests
                .iter()
                .map(RequestDocument::from)
                .collect(),
            created_at: bson::DateTime::from_time_0_3(p.created_at),
            updated_at: bson::DateTime::from_time_0_3(p.updated_at),
        }
    }
}

impl TryFrom<ProjectDocument> for Project {
    type Error = AppError;

    fn try_from(d: ProjectDocument) -> AppResult<Self> {
        Ok(Self {
            id: parse_uuid(&d.id)?,
            owner_id: parse_uuid(&d.owner_id)?,
            owner_name: d.owner_name,
            title: d.title,
            description: d.description,
            tech_stack: d.tech_stack,
            skills_needed: d.skills_needed,
            status: d.status,
            collaborators: d
                .collaborators
                .iter()
                .map(|c| parse_uuid(c))
                .collect::<AppResult<Vec<_>>>()?,
            collaboration_requests: d
                .collaboration_requests
                .iter()
                .map(|r| {
                    Ok(CollaborationRequest {
                        user_id: parse_uuid(&r.user_id)?,
                        status: r.status,
                    })
                })
                .collect::<AppResult<Vec<_>>>()?,
            created_at: d.created_at.to_time_0_3(),
            updated_at: d.updated_at.to_time_0_3(),
        })
    }
}

pub struct MongoProjectRepository {
    coll: Collection<ProjectDocument>,
}

impl MongoProjectRepository {
    pub async fn new(db: &Database) -> AppResult<Self> {
        Ok(Self {
            coll: db.collection::<ProjectDocument>("projects"),
        })
    }

    async fn collect(
        &self,
        filter: bson::Document,
    ) -> AppResult<Vec<Project>> {
        let docs: Vec<ProjectDocument> = self.coll.find(filter).await?.try_collect().await?;
        docs.into_iter().map(Project::try_from).collect()
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn insert(&self, project: Project) -> AppResult<Project> {
        self.coll.insert_one(ProjectDocument::from(&project)).await?;
        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        self.coll
            .find_one(doc! { "id": id.to_string() })
            .await?
            .map(Project::try_from)
            .transpose()
    }

    async fn update(&self, id: Uuid, input: &UpdateProject) -> AppResult<Project> {
        let mut set = doc! { "updated_at": bson::DateTime::now() };

        if let Some(title) = &input.title {
            set.insert("title", title.as_str());
        }
        if let Some(description) = &input.description {
            set.insert("description", description.as_str());
        }
        if let Some(tech_stack) = &input.tech_stack {
            set.insert("tech_stack", tech_stack.clone());
        }
        if let Some(skills_needed) = &input.skills_needed {
            set.insert("skills_needed", skills_needed.clone());
        }
        if let Some(status) = input.status {
            set.insert("status", status.as_str());
        }

        let updated = self
            .coll
            .find_one_and_update(doc! { "id": id.to_string() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        updated.try_into()
    }

    async fn list_excluding_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        self.collect(doc! { "owner_id": { "$ne": owner_id.to_string() } })
            .await
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        self.collect(doc! { "owner_id": owner_id.to_string() }).await
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Project>> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        self.collect(doc! { "id": { "$in": ids } }).await
    }

    async fn search_excluding_owner(
        &self,
        owner_id: Uuid,
        query: &str,
    ) -> AppResult<Vec<Project>> {
        self.collect(doc! {
            "owner_id": { "$ne": owner_id.to_string() },
            "$or": [
                { "title": { "$regex": query, "$options": "i" } },
                { "description": { "$regex": query, "$options": "i" } },
                { "tech_stack": { "$regex": query, "$options": "i" } },
                { "status": { "$regex": query, "$options": "i" } },
            ],
        })
        .await
    }

    async fn list_candidates(
        &self,
        owner_id: Uuid,
        exclude_ids: &[Uuid],
    ) -> AppResult<Vec<Project>> {
        let excluded: Vec<String> = exclude_ids.iter().map(Uuid::to_string).collect();
        self.collect(doc! {
            "owner_id": { "$ne": owner_id.to_string() },
            "id": { "$nin": excluded },
        })
        .await
    }

    async fn list_with_requests(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        self.collect(doc! {
            "owner_id": owner_id.to_string(),
            "collaboration_requests.0": { "$exists": true },
        })
        .await
    }

    async fn push_request(
        &self,
        project_id: Uuid,
        request: CollaborationRequest,
    ) -> AppResult<()> {
        let value = bson::to_bson(&RequestDocument::from(&request))
            .map_err(|e| AppError::Database(format!("BSON encode error: {}", e)))?;

        let result = self
            .coll
            .update_one(
                doc! { "id": project_id.to_string() },
                doc! {
                    "$push": { "collaboration_requests": value },
                    "$set": { "updated_at": bson::DateTime::now() },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }
        Ok(())
    }

    async fn set_request_status(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
        status: RequestStatus,
    ) -> AppResult<()> {
        let value = bson::to_bson(&status)
            .map_err(|e| AppError::Database(format!("BSON encode error: {}", e)))?;

        let result = self
            .coll
            .update_one(
                doc! {
                    "id": project_id.to_string(),
                    "collaboration_requests.user_id": requester_id.to_string(),
                },
                doc! {
                    "$set": {
                        "collaboration_requests.$.status": value,
                        "updated_at": bson::DateTime::now(),
                    },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Collaboration request".to_string()));
        }
        Ok(())
    }

    async fn push_collaborator(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = self
            .coll
            .update_one(
                doc! { "id": project_id.to_string() },
                doc! {
                    "$push": { "collaborators": user_id.to_string() },
                    "$set": { "updated_at": bson::DateTime::now() },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }
        Ok(())
    }
}
