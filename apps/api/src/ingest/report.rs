use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::ingest::models::ImportType;

/// Final outcome of one import, returned to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub success: bool,
    #[serde(rename = "type")]
    pub import_type: ImportType,
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Accumulates per-row outcomes in file order.
///
/// Every row lands in exactly one of `imported` / `skipped`, and every skip
/// adds exactly one `Row {n}: {reason}` line.
#[derive(Debug)]
pub struct ImportReporter {
    report: ImportReport,
}

impl ImportReporter {
    pub fn new(import_type: ImportType) -> Self {
        Self {
            report: ImportReport {
                success: true,
                import_type,
                imported: 0,
                skipped: 0,
                errors: Vec::new(),
            },
        }
    }

    pub fn record_imported(&mut self) {
        self.report.imported += 1;
    }

    /// `index` is the 0-based data row index.
    pub fn record_skipped(&mut self, index: usize, reason: impl Display) {
        self.report.skipped += 1;
        self.report
            .errors
            .push(format!("Row {}: {reason}", report_row_number(index)));
    }

    pub fn rows_seen(&self) -> usize {
        self.report.imported + self.report.skipped
    }

    pub fn finish(self) -> ImportReport {
        self.report
    }
}

/// File line number of a data row: the header is line 1.
pub fn report_row_number(index: usize) -> usize {
    index + 2
}
