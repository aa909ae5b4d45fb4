// CSV ingestion: parsing, column heuristics, normalization, ranking, reporting.
// Shared by the analytics/posts importer and the voice-sample importer.

pub mod columns;
pub mod error;
pub mod handlers;
pub mod importer;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod ranking;
pub mod report;
