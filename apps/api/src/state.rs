use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::data::store::ContentStore;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Present when the server has its own Gemini key.
    pub llm: Option<LlmClient>,
    pub config: Config,
    /// Import persistence. Default: `PgRecordStore` over `db`.
    pub store: Arc<dyn RecordStore>,
    /// Ideas, hooks, topics, drafts and schedule. Default: `PgContentStore`.
    pub content: Arc<dyn ContentStore>,
}

impl AppState {
    /// A key supplied with the request wins over the server key.
    pub fn llm_for(&self, request_key: Option<&str>) -> Result<LlmClient, AppError> {
        match request_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Ok(LlmClient::new(key.to_string())),
            None => self.llm.clone().ok_or_else(|| {
                AppError::Validation("No Gemini API key. Add it in Settings.".to_string())
            }),
        }
    }
}
