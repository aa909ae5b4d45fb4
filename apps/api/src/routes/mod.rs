pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::compose::handlers as compose;
use crate::data::handlers as data;
use crate::ingest::handlers as ingest;
use crate::state::AppState;
use crate::voice::handlers as voice;

pub fn build_router(state: AppState) -> Router {
    // CSV uploads get their own body limit; JSON routes keep axum's default.
    let uploads = Router::new()
        .route("/api/v1/import", post(ingest::handle_import))
        .route("/api/v1/voice/samples", post(voice::handle_voice_samples))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(uploads)
        // Data API
        .route(
            "/api/v1/data",
            get(data::handle_list).post(data::handle_mutate),
        )
        // AI API
        .route("/api/v1/ai/voice-extract", post(voice::handle_voice_extract))
        .route("/api/v1/ai/generate", post(compose::handle_generate))
        .route("/api/v1/ai/score", post(compose::handle_score))
        .with_state(state)
}
