use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::ingest::models::{DailyMetricRecord, ImportRecord, PostRecord};
use crate::store::{RecordStore, StoreError};

/// Source tag written on every imported post.
const IMPORTED_SOURCE: &str = "imported";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_post(&self, owner: Uuid, post: &PostRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO posts
                (id, user_id, content, source, status, posted_at,
                 impressions, likes, replies, retweets, word_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&post.content)
        .bind(IMPORTED_SOURCE)
        .bind(post.status.as_str())
        .bind(post.posted_at)
        .bind(post.impressions)
        .bind(post.likes)
        .bind(post.replies)
        .bind(post.retweets)
        .bind(post.word_count)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_daily_metric(
        &self,
        owner: Uuid,
        day: &DailyMetricRecord,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO daily_metrics
                (id, user_id, date, posts_count, followers, impressions, engagements)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(day.date)
        .bind(day.posts_count)
        .bind(day.followers)
        .bind(day.impressions)
        .bind(day.engagements)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn ensure_owner(&self, owner: Uuid) -> Result<(), StoreError> {
        let simple = owner.simple().to_string();
        let username = format!("user_{}", &simple[..8]);
        sqlx::query("INSERT INTO users (id, username) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(owner)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, owner: Uuid, record: &ImportRecord) -> Result<Uuid, StoreError> {
        match record {
            ImportRecord::Post(post) => self.insert_post(owner, post).await,
            ImportRecord::DailyMetric(day) => self.insert_daily_metric(owner, day).await,
        }
    }
}
