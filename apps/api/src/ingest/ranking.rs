//! Engagement ranker: picks voice samples from an exported post history.
//!
//! score = impressions + 2 × likes + engagements, each term 0 when its column
//! is missing or unparsable. Negative values keep their sign. Rows are stable-sorted by descending score, so
//! equal scores keep file order and the top-N cut is deterministic.

use tracing::debug;

use crate::ingest::columns::{column_value, resolve_voice_columns, VoiceColumns};
use crate::ingest::error::IngestError;
use crate::ingest::normalize::parse_int_prefix;
use crate::ingest::parser::{parse_csv_bytes, ParsedCsv, RawRow};

/// Rows considered for sampling.
pub const MAX_SAMPLES: usize = 50;
/// Minimum usable samples for style extraction.
pub const MIN_SAMPLES: usize = 5;
/// Samples must be strictly longer than this many characters.
pub const MIN_SAMPLE_CHARS: usize = 10;

const IMPRESSIONS_WEIGHT: i64 = 1;
const LIKES_WEIGHT: i64 = 2;
const ENGAGEMENTS_WEIGHT: i64 = 1;

#[derive(Debug, Clone)]
pub struct ScoredRow<'a> {
    pub row: &'a RawRow,
    pub score: i64,
}

pub fn engagement_score(row: &RawRow, cols: &VoiceColumns) -> i64 {
    let metric = |col: Option<&String>| parse_int_prefix(column_value(row, col)).unwrap_or(0);
    metric(cols.impressions.as_ref()) * IMPRESSIONS_WEIGHT
        + metric(cols.likes.as_ref()) * LIKES_WEIGHT
        + metric(cols.engagements.as_ref()) * ENGAGEMENTS_WEIGHT
}

/// Orders rows for sampling. Without any metric column the file order is kept.
pub fn rank_rows<'a>(rows: &'a [RawRow], cols: &VoiceColumns) -> Vec<ScoredRow<'a>> {
    let mut scored: Vec<ScoredRow<'a>> = rows
        .iter()
        .map(|row| ScoredRow {
            row,
            score: if cols.has_metrics() {
                engagement_score(row, cols)
            } else {
                0
            },
        })
        .collect();

    if cols.has_metrics() {
        // `sort_by` is stable.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
    }
    scored
}

/// Top rows' trimmed content, with too-short entries dropped.
pub fn top_samples(rows: &[RawRow], cols: &VoiceColumns) -> Vec<String> {
    rank_rows(rows, cols)
        .into_iter()
        .take(MAX_SAMPLES)
        .filter_map(|s| s.row.get(&cols.content).map(str::trim))
        .filter(|text| text.chars().count() > MIN_SAMPLE_CHARS)
        .map(String::from)
        .collect()
}

/// Resolves columns, ranks and enforces the minimum sample floor.
pub fn select_voice_samples(parsed: &ParsedCsv) -> Result<Vec<String>, IngestError> {
    let cols = resolve_voice_columns(&parsed.headers)?;
    let samples = top_samples(&parsed.rows, &cols);

    debug!(
        "Voice samples: content column '{}', metrics: {}, kept {} of {} rows",
        cols.content,
        cols.has_metrics(),
        samples.len(),
        parsed.rows.len()
    );

    if samples.len() < MIN_SAMPLES {
        return Err(IngestError::InsufficientSamples {
            found: samples.len(),
            needed: MIN_SAMPLES,
            headers: parsed.headers.clone(),
        });
    }
    Ok(samples)
}

pub fn select_voice_samples_from_bytes(bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    let parsed = parse_csv_bytes(bytes)?;
    select_voice_samples(&parsed)
}
