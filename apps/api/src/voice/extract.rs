//! Voice profile extraction and storage.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::ranking::{MAX_SAMPLES, MIN_SAMPLES};
use crate::llm_client::prompts::{NO_INVENTION_INSTRUCTION, POST_SEPARATOR};
use crate::llm_client::LlmClient;
use crate::models::voice::VoiceProfileRow;
use crate::voice::profile::VoiceProfile;
use crate::voice::prompts::{VOICE_EXTRACTION_PROMPT, VOICE_EXTRACTION_SYSTEM};

/// Drops blank posts, enforces the minimum sample size and keeps the first 50.
pub fn prepare_sample_posts(posts: &[String]) -> Result<Vec<String>, AppError> {
    let usable: Vec<String> = posts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .take(MAX_SAMPLES)
        .map(String::from)
        .collect();

    if usable.len() < MIN_SAMPLES {
        return Err(AppError::Validation(format!(
            "Need at least {MIN_SAMPLES} posts (got {})",
            usable.len()
        )));
    }
    Ok(usable)
}

pub fn build_extraction_prompt(posts: &[String]) -> String {
    VOICE_EXTRACTION_PROMPT
        .replace("{no_invention}", NO_INVENTION_INSTRUCTION)
        .replace("{posts}", &posts.join(POST_SEPARATOR))
}

pub async fn extract_voice_profile(
    llm: &LlmClient,
    posts: &[String],
) -> Result<VoiceProfile, AppError> {
    let prompt = build_extraction_prompt(posts);
    let profile: VoiceProfile = llm
        .call_json(&prompt, VOICE_EXTRACTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to parse voice profile: {e}")))?;
    Ok(profile.sanitized())
}

/// One profile per user: replaces any existing row.
pub async fn save_voice_profile(
    pool: &PgPool,
    user_id: Uuid,
    profile: &VoiceProfile,
    samples: &[String],
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO voice_profiles
            (id, user_id, common_words, sentence_starts, tone_keywords, cta_patterns,
             formality_score, avg_post_length, sample_posts, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            common_words = EXCLUDED.common_words,
            sentence_starts = EXCLUDED.sentence_starts,
            tone_keywords = EXCLUDED.tone_keywords,
            cta_patterns = EXCLUDED.cta_patterns,
            formality_score = EXCLUDED.formality_score,
            avg_post_length = EXCLUDED.avg_post_length,
            sample_posts = EXCLUDED.sample_posts,
            updated_at = NOW()
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&profile.common_words)
    .bind(&profile.sentence_starts)
    .bind(&profile.tone_keywords)
    .bind(&profile.cta_patterns)
    .bind(profile.formality_score.round() as i32)
    .bind(profile.avg_post_length.round() as i32)
    .bind(samples)
    .execute(pool)
    .await?;

    info!("Saved voice profile for user {user_id} from {} samples", samples.len());
    Ok(())
}

pub async fn load_voice_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<VoiceProfile>, AppError> {
    let row = sqlx::query_as::<_, VoiceProfileRow>(
        "SELECT * FROM voice_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(VoiceProfile::from))
}
