//! Draft generation in a creator's voice.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::compose::prompts::{DRAFT_GENERATION_PROMPT, DRAFT_GENERATION_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::voice::profile::VoiceProfile;

pub const DEFAULT_DRAFT_COUNT: u32 = 3;
pub const MAX_DRAFT_COUNT: u32 = 10;
/// Platform post length limit.
pub const MAX_POST_CHARS: usize = 280;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Draft {
    pub content: String,
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub angle: String,
}

pub struct DraftParams<'a> {
    pub topic: &'a str,
    pub username: &'a str,
    pub count: u32,
    pub voice_profile: &'a VoiceProfile,
}

pub fn build_draft_prompt(params: &DraftParams<'_>) -> Result<String, AppError> {
    let voice_profile = serde_json::to_string(params.voice_profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode voice profile: {e}")))?;
    Ok(DRAFT_GENERATION_PROMPT
        .replace("{username}", params.username)
        .replace("{voice_profile}", &voice_profile)
        .replace("{count}", &params.count.to_string())
        .replace("{max_chars}", &MAX_POST_CHARS.to_string())
        .replace("{topic}", params.topic))
}

/// Keeps non-empty drafts, at most `count` of them.
pub fn clean_drafts(drafts: Vec<Draft>, count: u32) -> Vec<Draft> {
    drafts
        .into_iter()
        .map(|d| Draft {
            content: d.content.trim().to_string(),
            ..d
        })
        .filter(|d| !d.content.is_empty())
        .take(count as usize)
        .collect()
}

pub async fn generate_drafts(
    llm: &LlmClient,
    params: DraftParams<'_>,
) -> Result<Vec<Draft>, AppError> {
    let prompt = build_draft_prompt(&params)?;
    let raw: Vec<Draft> = llm
        .call_json(&prompt, DRAFT_GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to parse drafts: {e}")))?;

    let drafts = clean_drafts(raw, params.count);
    let too_long = drafts
        .iter()
        .filter(|d| d.content.chars().count() > MAX_POST_CHARS)
        .count();
    if too_long > 0 {
        warn!("{too_long} generated drafts exceed {MAX_POST_CHARS} characters");
    }
    info!("Generated {} drafts about '{}'", drafts.len(), params.topic);
    Ok(drafts)
}
