//! CSV parsing for broker exports.
//!
//! Broker exports are small, comma separated and sometimes carry a title
//! line above the header row. Cells are kept as strings; typing happens
//! against the broker's schema.

use csv::{ReaderBuilder, Terminator};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::Result;

/// Configuration for CSV parsing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParseConfig {
    /// Number of lines to skip above the header row (default: 0)
    pub skip_top_rows: Option<usize>,
    /// Delimiter character (default: ",")
    pub delimiter: Option<char>,
    /// Whether to skip empty rows (default: true)
    pub skip_empty_rows: Option<bool>,
}

impl ParseConfig {
    /// Returns the number of rows to skip at the top
    pub fn top_skip(&self) -> usize {
        self.skip_top_rows.unwrap_or(0)
    }

    /// Returns the delimiter as a byte; only ASCII delimiters are supported
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter {
            None => Ok(b','),
            Some(c) if c.is_ascii() => Ok(c as u8),
            Some(c) => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unsupported CSV delimiter '{}': only ASCII delimiters are allowed",
                c
            )))),
        }
    }

    /// Returns whether to skip empty rows
    pub fn skip_empty(&self) -> bool {
        self.skip_empty_rows.unwrap_or(true)
    }
}

/// A header row plus data rows, every row as long as the header.
///
/// Data rows are numbered from 1 in `rows` order, after title lines and
/// skipped empty rows are removed; `MalformedRow` errors use that numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ImportTable {
    /// Builds a table from string slices, mostly for tests and fixtures.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact (trimmed) header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Parses CSV content with the given configuration.
///
/// Content that is not valid UTF-8 is decoded as Big5, the encoding used by
/// Taiwanese brokerage exports.
pub fn parse_csv(content: &[u8], config: &ParseConfig) -> Result<ImportTable> {
    let content_str = decode_content(content);

    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(false) // We handle headers manually to honour skip_top_rows
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(content_str.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Failed to parse line {}: {}",
                idx + 1,
                e
            )))
        })?;
        records.push(
            record
                .iter()
                .map(|s| s.trim_end_matches('\r').to_string())
                .collect(),
        );
    }

    let skip_top = config.top_skip();
    if records.len() <= skip_top {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "CSV file is empty or contains no header row".to_string(),
        )));
    }

    let mut remaining = records.into_iter().skip(skip_top);
    let headers: Vec<String> = remaining
        .next()
        .unwrap_or_default()
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let header_count = headers.len();

    let mut rows = Vec::new();
    for mut row in remaining {
        if config.skip_empty() && row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        if row.len() > header_count {
            // Trailing delimiters are common in spreadsheet exports
            if row[header_count..].iter().all(|cell| cell.trim().is_empty()) {
                row.truncate(header_count);
            } else {
                return Err(Error::malformed(
                    rows.len() + 1,
                    format!(
                        "row has {} columns, header has {}",
                        row.len(),
                        header_count
                    ),
                ));
            }
        }
        row.resize(header_count, String::new());
        rows.push(row);
    }

    Ok(ImportTable { headers, rows })
}

/// Decodes content bytes to a string, handling a UTF-8 BOM if present.
fn decode_content(content: &[u8]) -> String {
    let content_without_bom = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);

    match std::str::from_utf8(content_without_bom) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::BIG5.decode(content_without_bom);
            if had_errors {
                warn!("CSV content is neither UTF-8 nor Big5; some characters were replaced");
            }
            text.into_owned()
        }
    }
}
