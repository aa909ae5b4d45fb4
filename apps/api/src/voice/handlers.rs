//! Axum route handlers for voice samples and voice profiles.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::handlers::read_upload;
use crate::ingest::ranking::select_voice_samples_from_bytes;
use crate::state::AppState;
use crate::voice::extract::{extract_voice_profile, prepare_sample_posts, save_voice_profile};
use crate::voice::profile::VoiceProfile;

#[derive(Debug, Serialize)]
pub struct VoiceSamplesResponse {
    pub posts: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct VoiceExtractRequest {
    pub user_id: Uuid,
    pub posts: Vec<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoiceExtractResponse {
    pub profile: VoiceProfile,
}

/// POST /api/v1/voice/samples
///
/// Multipart `file` (a post-history export). Returns the top-engagement posts
/// ready for voice extraction, or 422 when fewer than five usable posts exist.
pub async fn handle_voice_samples(
    mut multipart: Multipart,
) -> Result<Json<VoiceSamplesResponse>, AppError> {
    let form = read_upload(&mut multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let posts = select_voice_samples_from_bytes(&file)?;
    Ok(Json(VoiceSamplesResponse {
        count: posts.len(),
        posts,
    }))
}

/// POST /api/v1/ai/voice-extract
///
/// Extracts a voice profile from at least five posts and stores it for the user.
pub async fn handle_voice_extract(
    State(state): State<AppState>,
    Json(request): Json<VoiceExtractRequest>,
) -> Result<Json<VoiceExtractResponse>, AppError> {
    let samples = prepare_sample_posts(&request.posts)?;
    let llm = state.llm_for(request.api_key.as_deref())?;

    let profile = extract_voice_profile(&llm, &samples).await?;

    state.store.ensure_owner(request.user_id).await?;
    save_voice_profile(&state.db, request.user_id, &profile, &samples).await?;

    Ok(Json(VoiceExtractResponse { profile }))
}
