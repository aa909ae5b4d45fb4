//! Record persistence: "insert one record of kind K for an owner".
//!
//! The importer only sees `RecordStore`; `AppState` carries it as
//! `Arc<dyn RecordStore>` so the storage backend can be swapped without
//! touching ingestion.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::ingest::models::ImportRecord;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Makes sure the owning user row exists before records reference it.
    async fn ensure_owner(&self, owner: Uuid) -> Result<(), StoreError>;

    /// Inserts one record and returns its new id.
    async fn insert(&self, owner: Uuid, record: &ImportRecord) -> Result<Uuid, StoreError>;
}
