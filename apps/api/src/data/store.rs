//! Content persistence behind `ContentStore`.
//!
//! Every query is scoped by `user_id`; an id owned by another user behaves
//! exactly like a missing one.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::models::{
    DraftInput, DraftUpdate, HookInput, IdeaInput, ResourceKind, ResourceList, ScheduleInput,
    ScheduledPost, TopicInput,
};
use crate::ingest::models::PostStatus;
use crate::models::content::{HookRow, IdeaRow, PostRow, ScheduleEntryRow, TopicRow};
use crate::store::StoreError;

/// Source tag for posts written from the app itself.
pub const MANUAL_SOURCE: &str = "manual";
pub const RAW_IDEA_STATUS: &str = "raw";
pub const PENDING_SCHEDULE_STATUS: &str = "pending";

const POST_COLUMNS: &str =
    "id, user_id, content, source, status, algorithm_score, posted_at, created_at";

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Newest first, except the schedule which is soonest first.
    async fn list(&self, owner: Uuid, kind: ResourceKind) -> Result<ResourceList, StoreError>;

    async fn create_idea(&self, owner: Uuid, input: &IdeaInput) -> Result<IdeaRow, StoreError>;

    async fn create_hook(&self, owner: Uuid, input: &HookInput) -> Result<HookRow, StoreError>;

    async fn create_topic(&self, owner: Uuid, input: &TopicInput)
        -> Result<TopicRow, StoreError>;

    async fn create_draft(&self, owner: Uuid, input: &DraftInput) -> Result<PostRow, StoreError>;

    /// `None` when the user has no post with that id.
    async fn update_draft(
        &self,
        owner: Uuid,
        update: &DraftUpdate,
    ) -> Result<Option<PostRow>, StoreError>;

    /// Creates a `scheduled` post and its pending queue entry together.
    async fn schedule_post(
        &self,
        owner: Uuid,
        input: &ScheduleInput,
    ) -> Result<ScheduledPost, StoreError>;

    /// Deleting a schedule entry also deletes its post. Returns whether
    /// anything was removed.
    async fn delete(&self, owner: Uuid, kind: ResourceKind, id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_schedule(&self, owner: Uuid) -> Result<Vec<ScheduledPost>, StoreError> {
        let entries = sqlx::query_as::<_, ScheduleEntryRow>(
            r#"
            SELECT id, post_id, user_id, scheduled_for, status, created_at
            FROM schedule_queue
            WHERE user_id = $1 AND status = $2
            ORDER BY scheduled_for ASC
            "#,
        )
        .bind(owner)
        .bind(PENDING_SCHEDULE_STATUS)
        .fetch_all(&self.pool)
        .await?;

        let post_ids: Vec<Uuid> = entries.iter().map(|e| e.post_id).collect();
        let posts: HashMap<Uuid, PostRow> = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 AND id = ANY($2)"
        ))
        .bind(owner)
        .bind(&post_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

        Ok(entries
            .into_iter()
            .map(|entry| ScheduledPost {
                posts: posts.get(&entry.post_id).cloned(),
                entry,
            })
            .collect())
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn list(&self, owner: Uuid, kind: ResourceKind) -> Result<ResourceList, StoreError> {
        let list = match kind {
            ResourceKind::Ideas => ResourceList::Ideas(
                sqlx::query_as::<_, IdeaRow>(
                    "SELECT * FROM ideas WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?,
            ),
            ResourceKind::Hooks => ResourceList::Hooks(
                sqlx::query_as::<_, HookRow>(
                    "SELECT * FROM hooks WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?,
            ),
            ResourceKind::Topics => ResourceList::Topics(
                sqlx::query_as::<_, TopicRow>(
                    "SELECT * FROM topics WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?,
            ),
            ResourceKind::Drafts => ResourceList::Drafts(
                sqlx::query_as::<_, PostRow>(&format!(
                    "SELECT {POST_COLUMNS} FROM posts \
                     WHERE user_id = $1 AND status = $2 ORDER BY created_at DESC"
                ))
                .bind(owner)
                .bind(PostStatus::Draft.as_str())
                .fetch_all(&self.pool)
                .await?,
            ),
            ResourceKind::Schedule => ResourceList::Schedule(self.list_schedule(owner).await?),
        };
        Ok(list)
    }

    async fn create_idea(&self, owner: Uuid, input: &IdeaInput) -> Result<IdeaRow, StoreError> {
        let row = sqlx::query_as::<_, IdeaRow>(
            r#"
            INSERT INTO ideas (id, user_id, content, topics, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(input.content.trim())
        .bind(&input.topics)
        .bind(RAW_IDEA_STATUS)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_hook(&self, owner: Uuid, input: &HookInput) -> Result<HookRow, StoreError> {
        let row = sqlx::query_as::<_, HookRow>(
            r#"
            INSERT INTO hooks (id, user_id, hook_text, hook_type)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(input.text.trim())
        .bind(input.hook_type.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_topic(
        &self,
        owner: Uuid,
        input: &TopicInput,
    ) -> Result<TopicRow, StoreError> {
        let row = sqlx::query_as::<_, TopicRow>(
            r#"
            INSERT INTO topics (id, user_id, topic, frequency)
            VALUES ($1, $2, $3, 1)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(input.name.trim())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_draft(&self, owner: Uuid, input: &DraftInput) -> Result<PostRow, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (id, user_id, content, source, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(input.content.trim())
        .bind(MANUAL_SOURCE)
        .bind(PostStatus::Draft.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_draft(
        &self,
        owner: Uuid,
        update: &DraftUpdate,
    ) -> Result<Option<PostRow>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET content = $1, algorithm_score = $2, status = $3
            WHERE id = $4 AND user_id = $5
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(update.content.trim())
        .bind(update.score)
        .bind(update.status.as_str())
        .bind(update.id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn schedule_post(
        &self,
        owner: Uuid,
        input: &ScheduleInput,
    ) -> Result<ScheduledPost, StoreError> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (id, user_id, content, source, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(input.content.trim())
        .bind(MANUAL_SOURCE)
        .bind(PostStatus::Scheduled.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let entry = sqlx::query_as::<_, ScheduleEntryRow>(
            r#"
            INSERT INTO schedule_queue (id, post_id, user_id, scheduled_for, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, user_id, scheduled_for, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post.id)
        .bind(owner)
        .bind(input.scheduled_for)
        .bind(PENDING_SCHEDULE_STATUS)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ScheduledPost {
            entry,
            posts: Some(post),
        })
    }

    async fn delete(&self, owner: Uuid, kind: ResourceKind, id: Uuid) -> Result<bool, StoreError> {
        let table = match kind {
            ResourceKind::Ideas => "ideas",
            ResourceKind::Hooks => "hooks",
            ResourceKind::Topics => "topics",
            ResourceKind::Drafts => "posts",
            ResourceKind::Schedule => {
                let mut tx = self.pool.begin().await?;
                let removed: Option<(Uuid,)> = sqlx::query_as(
                    "DELETE FROM schedule_queue WHERE id = $1 AND user_id = $2 RETURNING post_id",
                )
                .bind(id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;

                if let Some((post_id,)) = removed {
                    sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
                        .bind(post_id)
                        .bind(owner)
                        .execute(&mut *tx)
                        .await?;
                }
                tx.commit().await?;
                return Ok(removed.is_some());
            }
        };

        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
