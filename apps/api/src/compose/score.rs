//! Draft scoring against engagement heuristics.

use serde::{Deserialize, Serialize};

use crate::compose::prompts::SCORING_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

const MIN_METRIC: f64 = 1.0;
const MAX_METRIC: f64 = 10.0;

/// Per-metric scores on a 1–10 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PostScore {
    pub hook: f64,
    pub clarity: f64,
    pub novelty: f64,
    pub value: f64,
    pub emotion: f64,
    pub cta: f64,
    pub readability: f64,
    pub authenticity: f64,
    pub overall: f64,
    pub suggestions: Vec<String>,
}

impl PostScore {
    fn metrics_mut(&mut self) -> [&mut f64; 8] {
        [
            &mut self.hook,
            &mut self.clarity,
            &mut self.novelty,
            &mut self.value,
            &mut self.emotion,
            &mut self.cta,
            &mut self.readability,
            &mut self.authenticity,
        ]
    }

    /// Clamps each metric to 1–10 and recomputes `overall` as their mean.
    pub fn normalized(mut self) -> Self {
        let mut total = 0.0;
        for metric in self.metrics_mut() {
            *metric = if metric.is_finite() {
                metric.clamp(MIN_METRIC, MAX_METRIC)
            } else {
                MIN_METRIC
            };
            total += *metric;
        }
        self.overall = (total / 8.0 * 10.0).round() / 10.0;
        self
    }
}

pub async fn score_post(llm: &LlmClient, content: &str) -> Result<PostScore, AppError> {
    let prompt = SCORING_PROMPT.replace("{content}", content);
    let score: PostScore = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to parse score: {e}")))?;
    Ok(score.normalized())
}
