//! Ingestion parser: raw CSV text into header-keyed rows.
//!
//! The first non-empty line is the header row. Blank lines are skipped and
//! never counted as data rows. Quoted fields may contain commas, escaped
//! quotes (`""`) and embedded newlines.

use std::collections::HashMap;

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use thiserror::Error;

/// Structural parse failure. Aborts the whole import.
///
/// Messages are prefixed with the failure kind so they can be surfaced
/// verbatim as diagnostic details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Encoding: file is not valid UTF-8 (invalid byte at offset {offset})")]
    Encoding { offset: usize },

    #[error("MissingQuotes: quoted field opened on line {line} is never closed")]
    UnterminatedQuote { line: u64 },

    #[error("InvalidQuotes: unexpected character after closing quote on line {line}")]
    TrailingAfterQuote { line: u64 },

    #[error("FieldMismatch: row on line {line} has {found} fields, expected {expected}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Reader: {message} (line {line})")]
    Reader { line: u64, message: String },
}

/// One data row: header (exactly as written) → untyped value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, String> = HashMap::new();
        // A repeated header keeps the value of its first column.
        for (k, v) in pairs {
            fields.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { fields }
    }

    fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        Self::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| (header, record.get(idx).unwrap_or(""))),
        )
    }
}

/// Parsed file: header row in file order plus data rows in file order.
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Decodes uploaded bytes as UTF-8 and parses them.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<ParsedCsv, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding {
        offset: e.valid_up_to(),
    })?;
    parse_csv(text)
}

/// Parses CSV text into rows keyed by the header row.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // The csv reader is lenient about stray quotes; reject those up front
    // so a broken file never yields a silently shifted row shape.
    check_quoting(text)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(map_csv_error)?.clone();
    if headers.is_empty() {
        return Ok(ParsedCsv::default());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(map_csv_error)?;
        rows.push(RawRow::from_record(&headers, &record));
    }

    Ok(ParsedCsv {
        headers: headers.iter().map(String::from).collect(),
        rows,
    })
}

fn map_csv_error(err: csv::Error) -> ParseError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.kind() {
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => ParseError::FieldCount {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(line),
            expected: *expected_len as usize,
            found: *len as usize,
        },
        _ => ParseError::Reader {
            line,
            message: err.to_string(),
        },
    }
}

/// Walks the text with RFC 4180 quoting rules and reports the first
/// quote that cannot be parsed unambiguously. A quote only opens a quoted
/// field when it is the first character of the field.
fn check_quoting(text: &str) -> Result<(), ParseError> {
    let mut line: u64 = 1;
    let mut at_field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if at_field_start => {
                let opened_on = line;
                loop {
                    match chars.next() {
                        None => return Err(ParseError::UnterminatedQuote { line: opened_on }),
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                        }
                        Some('"') => break,
                        Some('\n') => line += 1,
                        Some(_) => {}
                    }
                }
                match chars.peek() {
                    None | Some(',') | Some('\n') | Some('\r') => {}
                    Some(_) => return Err(ParseError::TrailingAfterQuote { line }),
                }
                at_field_start = false;
            }
            ',' | '\r' => at_field_start = true,
            '\n' => {
                line += 1;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }

    Ok(())
}
