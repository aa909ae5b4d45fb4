use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VoiceProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub common_words: Option<Vec<String>>,
    pub sentence_starts: Option<Vec<String>>,
    pub tone_keywords: Option<Vec<String>>,
    pub cta_patterns: Option<Vec<String>>,
    pub formality_score: Option<i32>,
    pub avg_post_length: Option<i32>,
    pub sample_posts: Option<Vec<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}
