use thiserror::Error;

use crate::ingest::models::ImportType;
use crate::ingest::parser::ParseError;

/// Whole-file ingestion failures. Raised before any row is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error(
        "Invalid {import_type} CSV format: no {expected} column (headers: {})",
        .headers.join(", ")
    )]
    MissingColumn {
        import_type: ImportType,
        expected: &'static str,
        headers: Vec<String>,
    },

    #[error("No content column found. Headers: {}", .headers.join(", "))]
    NoContentColumn { headers: Vec<String> },

    #[error(
        "Only {found} valid posts found. Need at least {needed}. Headers: {}",
        .headers.join(", ")
    )]
    InsufficientSamples {
        found: usize,
        needed: usize,
        headers: Vec<String>,
    },
}

impl IngestError {
    /// Diagnostic lines for callers: parser detail or the headers that were found.
    pub fn details(&self) -> Vec<String> {
        match self {
            IngestError::Parse(e) => vec![e.to_string()],
            IngestError::MissingColumn { headers, .. }
            | IngestError::NoContentColumn { headers }
            | IngestError::InsufficientSamples { headers, .. } => headers.clone(),
        }
    }
}
