//! Axum route handlers for the Compose API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compose::drafts::{
    generate_drafts, Draft, DraftParams, DEFAULT_DRAFT_COUNT, MAX_DRAFT_COUNT,
};
use crate::compose::score::{score_post, PostScore};
use crate::errors::AppError;
use crate::state::AppState;
use crate::voice::extract::load_voice_profile;
use crate::voice::profile::VoiceProfile;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub topic: String,
    pub count: Option<u32>,
    pub username: Option<String>,
    pub voice_profile: Option<VoiceProfile>,
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateMeta {
    pub used_fallback_voice_profile: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub drafts: Vec<Draft>,
    pub meta: GenerateMeta,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub content: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: PostScore,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/generate
///
/// Voice profile precedence: request body → stored profile → fallback profile.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("Topic required".to_string()));
    }
    let llm = state.llm_for(request.api_key.as_deref())?;

    let (voice_profile, used_fallback) = match request.voice_profile {
        Some(profile) => (profile, false),
        None => match load_voice_profile(&state.db, request.user_id).await? {
            Some(profile) => (profile, false),
            None => (VoiceProfile::fallback(), true),
        },
    };

    let count = request
        .count
        .unwrap_or(DEFAULT_DRAFT_COUNT)
        .clamp(1, MAX_DRAFT_COUNT);
    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or("User");

    let drafts = generate_drafts(
        &llm,
        DraftParams {
            topic,
            username,
            count,
            voice_profile: &voice_profile,
        },
    )
    .await?;

    Ok(Json(GenerateResponse {
        drafts,
        meta: GenerateMeta {
            used_fallback_voice_profile: used_fallback,
        },
    }))
}

/// POST /api/v1/ai/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Content required".to_string()));
    }
    let llm = state.llm_for(request.api_key.as_deref())?;

    let score = score_post(&llm, content).await?;
    Ok(Json(ScoreResponse { score }))
}
