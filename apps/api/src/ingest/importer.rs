//! Import pipeline: parse → resolve columns → normalize + persist per row → report.
//!
//! Rows are processed sequentially in file order. Structural failures abort
//! before any row is touched; per-row failures (normalization or storage)
//! become report entries and processing continues. There is no rollback:
//! rows written before a later failure stay written.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ingest::columns::resolve_columns;
use crate::ingest::error::IngestError;
use crate::ingest::models::ImportType;
use crate::ingest::normalize::normalize_row;
use crate::ingest::parser::{parse_csv_bytes, ParsedCsv};
use crate::ingest::report::{ImportReport, ImportReporter};
use crate::store::RecordStore;

pub async fn run_import(
    store: &dyn RecordStore,
    owner: Uuid,
    import_type: ImportType,
    bytes: &[u8],
) -> Result<ImportReport, IngestError> {
    let parsed = parse_csv_bytes(bytes)?;
    import_parsed(store, owner, import_type, &parsed).await
}

pub async fn import_parsed(
    store: &dyn RecordStore,
    owner: Uuid,
    import_type: ImportType,
    parsed: &ParsedCsv,
) -> Result<ImportReport, IngestError> {
    let resolution = resolve_columns(import_type, &parsed.headers)?;
    debug!("Resolved {import_type} columns: {resolution:?}");

    let mut reporter = ImportReporter::new(import_type);

    for (index, row) in parsed.rows.iter().enumerate() {
        let record = match normalize_row(row, &resolution) {
            Ok(record) => record,
            Err(reason) => {
                reporter.record_skipped(index, reason);
                continue;
            }
        };

        match store.insert(owner, &record).await {
            Ok(_) => reporter.record_imported(),
            Err(e) => {
                warn!(
                    "Failed to store {} from row {} for user {owner}: {e}",
                    record.kind_str(),
                    index + 2
                );
                reporter.record_skipped(index, e);
            }
        }
    }

    debug_assert_eq!(reporter.rows_seen(), parsed.rows.len());
    let report = reporter.finish();
    info!(
        "Imported {} CSV for user {owner}: {} imported, {} skipped",
        import_type, report.imported, report.skipped
    );
    Ok(report)
}
