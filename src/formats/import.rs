//! Column import from `.txt` and `.json` files
//!
//! An import fills one column of the document, row by row from the top.
//! Rows past the end of the document are appended with the other column
//! empty; rows past the end of the file are left as they were.

use serde_json::Value;

use crate::config::AlignerConfig;
use crate::errors::{AlignError, Result};
use crate::models::{generate_row_id, Column, FlatEntry, Row};

/// Recognised import formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportFormat {
    Text,
    Json,
}

impl ImportFormat {
    /// Pick the format from a file name's extension
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".json") {
            Ok(ImportFormat::Json)
        } else if lower.ends_with(".txt") {
            Ok(ImportFormat::Text)
        } else {
            Err(AlignError::UnsupportedFileType(file_name.to_string()))
        }
    }
}

/// Outcome of an import
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportResult {
    pub rows: Vec<Row>,
    /// Number of entries read from the file
    pub imported: usize,
    pub format: ImportFormat,
}

/// Non-blank, trimmed lines of a text file
pub fn parse_text_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Entries of a JSON column file
///
/// The payload must be a non-empty array; each element is read as
/// `{ text, tags?, type?, typename? }` with missing fields defaulted.
pub fn parse_json_entries(content: &str) -> Result<Vec<FlatEntry>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AlignError::MalformedImport(format!("Invalid JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(AlignError::MalformedImport("Invalid JSON format. Expected an array.".to_string()));
    };
    if items.is_empty() {
        return Err(AlignError::MalformedImport("JSON file is empty.".to_string()));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<FlatEntry>(item)
                .map_err(|e| AlignError::MalformedImport(format!("Entry {}: {}", i, e)))
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn new_row_for(column: Column, entry: FlatEntry) -> Row {
    let mut row = Row::new(generate_row_id());
    row.set_cell(column, &entry);
    row
}

/// Import `content` into `column` of `existing`
///
/// Nothing is returned on error; the caller's document stays as it was.
pub fn import_column(
    content: &str,
    file_name: &str,
    column: Column,
    existing: &[Row],
    config: &AlignerConfig,
) -> Result<ImportResult> {
    let format = ImportFormat::from_file_name(file_name)?;
    let mut rows = existing.to_vec();

    let imported = match format {
        ImportFormat::Json => {
            let entries = parse_json_entries(content)?;
            let count = entries.len();
            for (index, item) in entries.into_iter().enumerate() {
                let entry = FlatEntry {
                    text: item.text,
                    tags: Some(item.tags.unwrap_or_default()),
                    kind: Some(non_empty(item.kind).unwrap_or_else(|| config.default_type.clone())),
                    type_name: Some(non_empty(item.type_name).unwrap_or_else(|| config.default_type_name.clone())),
                };
                match rows.get_mut(index) {
                    Some(row) => row.set_cell(column, &entry),
                    None => rows.push(new_row_for(column, entry)),
                }
            }
            count
        }
        ImportFormat::Text => {
            let lines = parse_text_lines(content);
            let count = lines.len();
            for (index, line) in lines.into_iter().enumerate() {
                match rows.get_mut(index) {
                    Some(row) => {
                        row.set_text(column, line);
                        if row.block_type(column).map_or(true, str::is_empty) {
                            row.set_block_type(column, Some(config.default_type.clone()));
                        }
                        if row.type_name(column).map_or(true, str::is_empty) {
                            row.set_type_name(column, Some(config.default_type_name.clone()));
                        }
                    }
                    None => {
                        let entry = FlatEntry {
                            text: line,
                            tags: None,
                            kind: Some(config.default_type.clone()),
                            type_name: Some(config.default_type_name.clone()),
                        };
                        rows.push(new_row_for(column, entry));
                    }
                }
            }
            count
        }
    };

    log::info!(
        "import: file={} column={} entries={} rows={}",
        file_name,
        column,
        imported,
        rows.len()
    );
    Ok(ImportResult { rows, imported, format })
}
