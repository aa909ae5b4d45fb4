use serde::{Deserialize, Serialize};

use crate::models::voice::VoiceProfileRow;

/// Stylistic signals for one author. Serialized camelCase for API clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceProfile {
    pub common_words: Vec<String>,
    pub sentence_starts: Vec<String>,
    pub tone_keywords: Vec<String>,
    pub cta_patterns: Vec<String>,
    /// 1 (casual) – 10 (formal).
    pub formality_score: f64,
    pub avg_post_length: f64,
}

const DEFAULT_FORMALITY: f64 = 5.0;
const DEFAULT_POST_LENGTH: f64 = 120.0;

impl VoiceProfile {
    /// Neutral profile used when a user has none stored.
    pub fn fallback() -> Self {
        let words = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            common_words: words(&["the", "and", "to", "a", "of", "in", "is", "it", "for", "you"]),
            sentence_starts: words(&["I", "The", "If", "When", "This"]),
            tone_keywords: words(&["direct", "practical", "honest"]),
            cta_patterns: words(&["check out", "let me know", "what do you think"]),
            formality_score: DEFAULT_FORMALITY,
            avg_post_length: DEFAULT_POST_LENGTH,
        }
    }

    /// Clamps model output into storable ranges.
    pub fn sanitized(mut self) -> Self {
        self.formality_score = if self.formality_score.is_finite() {
            self.formality_score.clamp(1.0, 10.0)
        } else {
            DEFAULT_FORMALITY
        };
        self.avg_post_length = if self.avg_post_length.is_finite() && self.avg_post_length > 0.0 {
            self.avg_post_length
        } else {
            0.0
        };
        self
    }
}

impl From<VoiceProfileRow> for VoiceProfile {
    fn from(row: VoiceProfileRow) -> Self {
        Self {
            common_words: row.common_words.unwrap_or_default(),
            sentence_starts: row.sentence_starts.unwrap_or_default(),
            tone_keywords: row.tone_keywords.unwrap_or_default(),
            cta_patterns: row.cta_patterns.unwrap_or_default(),
            formality_score: row
                .formality_score
                .filter(|v| *v > 0)
                .map(f64::from)
                .unwrap_or(DEFAULT_FORMALITY),
            avg_post_length: row
                .avg_post_length
                .filter(|v| *v > 0)
                .map(f64::from)
                .unwrap_or(DEFAULT_POST_LENGTH),
        }
    }
}
