use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::ingest::models::ImportRecord;
use crate::store::{RecordStore, StoreError};

/// In-process store for tests. Posts whose content contains `reject_marker`
/// are refused the way a constraint violation would be.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<(Uuid, ImportRecord)>>,
    owners: Mutex<Vec<Uuid>>,
    reject_marker: Option<String>,
}

impl MemoryStore {
    pub fn rejecting(marker: &str) -> Self {
        Self {
            reject_marker: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<(Uuid, ImportRecord)> {
        self.records.lock().unwrap().clone()
    }

    pub fn owners(&self) -> Vec<Uuid> {
        self.owners.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_owner(&self, owner: Uuid) -> Result<(), StoreError> {
        let mut owners = self.owners.lock().unwrap();
        if !owners.contains(&owner) {
            owners.push(owner);
        }
        Ok(())
    }

    async fn insert(&self, owner: Uuid, record: &ImportRecord) -> Result<Uuid, StoreError> {
        if let (Some(marker), ImportRecord::Post(post)) = (&self.reject_marker, record) {
            if post.content.contains(marker.as_str()) {
                return Err(StoreError::Rejected(
                    "duplicate key value violates unique constraint \"posts_content_key\""
                        .to_string(),
                ));
            }
        }
        self.records.lock().unwrap().push((owner, record.clone()));
        Ok(Uuid::new_v4())
    }
}
