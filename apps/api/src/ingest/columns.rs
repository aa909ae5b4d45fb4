//! Column resolver: header-name heuristics, computed once per import.
//!
//! Resolution depends only on the header set, never on row values. When a
//! field lists several candidate headers, the row value is taken from the
//! first candidate holding a non-empty value.
//!
//! The posts importer and the voice-sample importer deliberately use
//! different content-column rules: exact names for posts, substring
//! keywords for voice samples. The keyword lists below are exact; downstream
//! selection depends on them.

use crate::ingest::error::IngestError;
use crate::ingest::models::ImportType;
use crate::ingest::parser::RawRow;

/// Substrings that mark a voice-sample content column.
pub const VOICE_CONTENT_KEYWORDS: &[&str] = &["text", "content", "body", "full_text", "description"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostColumns {
    /// `content` header, then `text` header.
    pub content: Vec<String>,
    /// `posted_at` header, then `date` header.
    pub posted_at: Vec<String>,
    pub impressions: Option<String>,
    pub likes: Option<String>,
    pub replies: Option<String>,
    /// `retweets` header, then `reposts` header.
    pub retweets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsColumns {
    pub date: String,
    pub followers: Option<String>,
    pub impressions: Option<String>,
    pub engagements: Option<String>,
    /// `posts_count` header, then `posts` header.
    pub posts_count: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnResolution {
    Posts(PostColumns),
    Analytics(AnalyticsColumns),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceColumns {
    pub content: String,
    pub impressions: Option<String>,
    pub likes: Option<String>,
    pub engagements: Option<String>,
}

impl VoiceColumns {
    pub fn has_metrics(&self) -> bool {
        self.impressions.is_some() || self.likes.is_some() || self.engagements.is_some()
    }
}

pub fn resolve_columns(
    import_type: ImportType,
    headers: &[String],
) -> Result<ColumnResolution, IngestError> {
    match import_type {
        ImportType::Posts => resolve_post_columns(headers).map(ColumnResolution::Posts),
        ImportType::Analytics => {
            resolve_analytics_columns(headers).map(ColumnResolution::Analytics)
        }
    }
}

pub fn resolve_post_columns(headers: &[String]) -> Result<PostColumns, IngestError> {
    let content = candidates([exact(headers, "content"), exact(headers, "text")]);
    if content.is_empty() {
        return Err(IngestError::MissingColumn {
            import_type: ImportType::Posts,
            expected: "content or text",
            headers: headers.to_vec(),
        });
    }

    Ok(PostColumns {
        content,
        posted_at: candidates([exact(headers, "posted_at"), exact(headers, "date")]),
        impressions: find(headers, |h| h.contains("impressions")),
        likes: find(headers, |h| h.contains("likes") && !h.contains("unlike")),
        replies: find(headers, |h| h.contains("replies")),
        retweets: candidates([
            find(headers, |h| h.contains("retweets")),
            find(headers, |h| h.contains("reposts")),
        ]),
    })
}

pub fn resolve_analytics_columns(headers: &[String]) -> Result<AnalyticsColumns, IngestError> {
    let date = exact(headers, "date").ok_or_else(|| IngestError::MissingColumn {
        import_type: ImportType::Analytics,
        expected: "date",
        headers: headers.to_vec(),
    })?;

    Ok(AnalyticsColumns {
        date,
        followers: exact(headers, "followers"),
        impressions: exact(headers, "impressions"),
        engagements: exact(headers, "engagements"),
        posts_count: candidates([exact(headers, "posts_count"), exact(headers, "posts")]),
    })
}

pub fn resolve_voice_columns(headers: &[String]) -> Result<VoiceColumns, IngestError> {
    let content = headers
        .iter()
        .find(|h| {
            let cleaned = h.to_lowercase().replace(['\'', '"'], "");
            let cleaned = cleaned.trim();
            VOICE_CONTENT_KEYWORDS.iter().any(|k| cleaned.contains(k))
        })
        .cloned()
        .ok_or_else(|| IngestError::NoContentColumn {
            headers: headers.to_vec(),
        })?;

    Ok(VoiceColumns {
        content,
        impressions: find(headers, |h| h.contains("impression")),
        likes: find(headers, |h| h.contains("like") && !h.contains("unlike")),
        engagements: find(headers, |h| h.contains("engagement")),
    })
}

/// Trimmed value of the first candidate column holding a non-empty value.
pub fn first_value<'a>(row: &'a RawRow, candidates: &[String]) -> &'a str {
    candidates
        .iter()
        .filter_map(|h| row.get(h))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or("")
}

pub fn column_value<'a>(row: &'a RawRow, column: Option<&String>) -> &'a str {
    column.and_then(|h| row.get(h)).unwrap_or("")
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// First header whose lowercased, trimmed form equals `name`.
fn exact(headers: &[String], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| normalize_header(h) == name)
        .cloned()
}

/// First header whose lowercased form satisfies `pred`.
fn find(headers: &[String], pred: impl Fn(&str) -> bool) -> Option<String> {
    headers
        .iter()
        .find(|h| pred(&h.to_lowercase()))
        .cloned()
}

fn candidates<const N: usize>(found: [Option<String>; N]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(N);
    for header in found.into_iter().flatten() {
        if !out.contains(&header) {
            out.push(header);
        }
    }
    out
}
