use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct IdeaRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub topics: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct HookRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hook_text: String,
    pub hook_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct TopicRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub frequency: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub source: String,
    pub status: String,
    pub algorithm_score: Option<f64>,
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ScheduleEntryRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub scheduled_for: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
