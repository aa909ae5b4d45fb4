//! Axum route handlers for the data API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::data::models::{DataCommand, ResourceItem, ResourceKind, ResourceList};
use crate::errors::AppError;
use crate::ingest::handlers::UserIdQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DataQuery {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DataRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Serialize)]
pub struct DataListResponse {
    pub data: ResourceList,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DataResponse {
    Item { data: ResourceItem },
    Deleted { success: bool },
}

/// GET /api/v1/data?user_id=&type=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<DataQuery>,
) -> Result<Json<DataListResponse>, AppError> {
    let kind: ResourceKind = params
        .kind
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::Validation("Invalid type".to_string()))?;

    let data = state.content.list(params.user_id, kind).await?;
    Ok(Json(DataListResponse { data }))
}

/// POST /api/v1/data?user_id=
///
/// Body `{ type, action, data }`. Creates and updates return the stored row;
/// deletes return `{ success: true }` whether or not the row existed.
pub async fn handle_mutate(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<DataRequest>,
) -> Result<Json<DataResponse>, AppError> {
    let command = DataCommand::parse(&request.kind, &request.action, request.data)?;
    let owner = params.user_id;

    state.store.ensure_owner(owner).await?;
    let content = state.content.as_ref();

    let item = match command {
        DataCommand::CreateIdea(input) => {
            ResourceItem::Idea(content.create_idea(owner, &input).await?)
        }
        DataCommand::CreateHook(input) => {
            ResourceItem::Hook(content.create_hook(owner, &input).await?)
        }
        DataCommand::CreateTopic(input) => {
            ResourceItem::Topic(content.create_topic(owner, &input).await?)
        }
        DataCommand::CreateDraft(input) => {
            ResourceItem::Post(content.create_draft(owner, &input).await?)
        }
        DataCommand::UpdateDraft(update) => {
            let post = content
                .update_draft(owner, &update)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Draft {} not found", update.id)))?;
            ResourceItem::Post(post)
        }
        DataCommand::Schedule(input) => {
            ResourceItem::Scheduled(content.schedule_post(owner, &input).await?)
        }
        DataCommand::Delete { kind, id } => {
            let removed = content.delete(owner, kind, id).await?;
            if !removed {
                debug!("Delete of {kind} {id} for user {owner} matched nothing");
            }
            return Ok(Json(DataResponse::Deleted { success: true }));
        }
    };

    Ok(Json(DataResponse::Item { data: item }))
}
