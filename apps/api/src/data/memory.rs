use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::data::models::{
    DraftInput, DraftUpdate, HookInput, IdeaInput, ResourceKind, ResourceList, ScheduleInput,
    ScheduledPost, TopicInput,
};
use crate::data::store::{ContentStore, MANUAL_SOURCE, PENDING_SCHEDULE_STATUS, RAW_IDEA_STATUS};
use crate::ingest::models::PostStatus;
use crate::models::content::{HookRow, IdeaRow, PostRow, ScheduleEntryRow, TopicRow};
use crate::store::StoreError;

/// In-process content store for tests. Lists are kept newest first.
#[derive(Default)]
pub struct MemoryContentStore {
    ideas: Mutex<Vec<IdeaRow>>,
    hooks: Mutex<Vec<HookRow>>,
    topics: Mutex<Vec<TopicRow>>,
    posts: Mutex<Vec<PostRow>>,
    schedule: Mutex<Vec<ScheduleEntryRow>>,
}

impl MemoryContentStore {
    pub fn posts(&self) -> Vec<PostRow> {
        self.posts.lock().unwrap().clone()
    }

    fn new_post(&self, owner: Uuid, content: &str, status: PostStatus) -> PostRow {
        let post = PostRow {
            id: Uuid::new_v4(),
            user_id: owner,
            content: content.trim().to_string(),
            source: MANUAL_SOURCE.to_string(),
            status: status.as_str().to_string(),
            algorithm_score: None,
            posted_at: None,
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().insert(0, post.clone());
        post
    }
}

fn remove_owned<T>(rows: &Mutex<Vec<T>>, matches: impl Fn(&T) -> bool) -> Option<T> {
    let mut rows = rows.lock().unwrap();
    let index = rows.iter().position(matches)?;
    Some(rows.remove(index))
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list(&self, owner: Uuid, kind: ResourceKind) -> Result<ResourceList, StoreError> {
        let list = match kind {
            ResourceKind::Ideas => ResourceList::Ideas(
                self.ideas.lock().unwrap().iter().filter(|r| r.user_id == owner).cloned().collect(),
            ),
            ResourceKind::Hooks => ResourceList::Hooks(
                self.hooks.lock().unwrap().iter().filter(|r| r.user_id == owner).cloned().collect(),
            ),
            ResourceKind::Topics => ResourceList::Topics(
                self.topics.lock().unwrap().iter().filter(|r| r.user_id == owner).cloned().collect(),
            ),
            ResourceKind::Drafts => ResourceList::Drafts(
                self.posts
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|p| p.user_id == owner && p.status == PostStatus::Draft.as_str())
                    .cloned()
                    .collect(),
            ),
            ResourceKind::Schedule => {
                let posts = self.posts.lock().unwrap().clone();
                let mut entries: Vec<ScheduleEntryRow> = self
                    .schedule
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|e| e.user_id == owner && e.status == PENDING_SCHEDULE_STATUS)
                    .cloned()
                    .collect();
                entries.sort_by_key(|e| e.scheduled_for);
                ResourceList::Schedule(
                    entries
                        .into_iter()
                        .map(|entry| ScheduledPost {
                            posts: posts.iter().find(|p| p.id == entry.post_id).cloned(),
                            entry,
                        })
                        .collect(),
                )
            }
        };
        Ok(list)
    }

    async fn create_idea(&self, owner: Uuid, input: &IdeaInput) -> Result<IdeaRow, StoreError> {
        let row = IdeaRow {
            id: Uuid::new_v4(),
            user_id: owner,
            content: input.content.trim().to_string(),
            topics: input.topics.clone(),
            status: RAW_IDEA_STATUS.to_string(),
            created_at: Utc::now(),
        };
        self.ideas.lock().unwrap().insert(0, row.clone());
        Ok(row)
    }

    async fn create_hook(&self, owner: Uuid, input: &HookInput) -> Result<HookRow, StoreError> {
        let row = HookRow {
            id: Uuid::new_v4(),
            user_id: owner,
            hook_text: input.text.trim().to_string(),
            hook_type: input.hook_type.clone(),
            created_at: Utc::now(),
        };
        self.hooks.lock().unwrap().insert(0, row.clone());
        Ok(row)
    }

    async fn create_topic(
        &self,
        owner: Uuid,
        input: &TopicInput,
    ) -> Result<TopicRow, StoreError> {
        let row = TopicRow {
            id: Uuid::new_v4(),
            user_id: owner,
            topic: input.name.trim().to_string(),
            frequency: 1,
            created_at: Utc::now(),
        };
        self.topics.lock().unwrap().insert(0, row.clone());
        Ok(row)
    }

    async fn create_draft(&self, owner: Uuid, input: &DraftInput) -> Result<PostRow, StoreError> {
        Ok(self.new_post(owner, &input.content, PostStatus::Draft))
    }

    async fn update_draft(
        &self,
        owner: Uuid,
        update: &DraftUpdate,
    ) -> Result<Option<PostRow>, StoreError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts
            .iter_mut()
            .find(|p| p.id == update.id && p.user_id == owner)
        else {
            return Ok(None);
        };
        post.content = update.content.trim().to_string();
        post.algorithm_score = update.score;
        post.status = update.status.as_str().to_string();
        Ok(Some(post.clone()))
    }

    async fn schedule_post(
        &self,
        owner: Uuid,
        input: &ScheduleInput,
    ) -> Result<ScheduledPost, StoreError> {
        let post = self.new_post(owner, &input.content, PostStatus::Scheduled);
        let entry = ScheduleEntryRow {
            id: Uuid::new_v4(),
            post_id: post.id,
            user_id: owner,
            scheduled_for: input.scheduled_for,
            status: PENDING_SCHEDULE_STATUS.to_string(),
            created_at: Utc::now(),
        };
        self.schedule.lock().unwrap().push(entry.clone());
        Ok(ScheduledPost {
            entry,
            posts: Some(post),
        })
    }

    async fn delete(&self, owner: Uuid, kind: ResourceKind, id: Uuid) -> Result<bool, StoreError> {
        let removed = match kind {
            ResourceKind::Ideas => {
                remove_owned(&self.ideas, |r| r.id == id && r.user_id == owner).is_some()
            }
            ResourceKind::Hooks => {
                remove_owned(&self.hooks, |r| r.id == id && r.user_id == owner).is_some()
            }
            ResourceKind::Topics => {
                remove_owned(&self.topics, |r| r.id == id && r.user_id == owner).is_some()
            }
            ResourceKind::Drafts => {
                remove_owned(&self.posts, |p| p.id == id && p.user_id == owner).is_some()
            }
            ResourceKind::Schedule => {
                match remove_owned(&self.schedule, |e| e.id == id && e.user_id == owner) {
                    Some(entry) => {
                        remove_owned(&self.posts, |p| p.id == entry.post_id && p.user_id == owner);
                        true
                    }
                    None => false,
                }
            }
        };
        Ok(removed)
    }
}
