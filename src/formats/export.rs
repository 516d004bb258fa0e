//! JSON export of the whole document or one column
//!
//! Trailing empty rows are trimmed first. Optional fields are omitted when
//! empty, so a plain row exports as just `id`, `sourceText` and `targetText`.

use serde::{Deserialize, Serialize};

use crate::alignment::trim_trailing_empty_rows;
use crate::config::AlignerConfig;
use crate::errors::{AlignError, Result};
use crate::models::{Column, Row};

/// What to export
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    Both,
    Source,
    Target,
}

impl ExportScope {
    pub fn name(&self) -> &'static str {
        match self {
            ExportScope::Both => "both",
            ExportScope::Source => "source",
            ExportScope::Target => "target",
        }
    }
}

impl std::str::FromStr for ExportScope {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(ExportScope::Both),
            "source" => Ok(ExportScope::Source),
            "target" => Ok(ExportScope::Target),
            other => Err(AlignError::UnknownColumn(other.to_string())),
        }
    }
}

/// One column of one row, as exported
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExportedCell {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "typename", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl ExportedCell {
    pub fn from_row(row: &Row, column: Column) -> Self {
        Self {
            id: row.id.clone(),
            text: row.text(column).to_string(),
            tags: row.tags(column).to_vec(),
            kind: row.block_type(column).filter(|s| !s.is_empty()).map(str::to_string),
            type_name: row.type_name(column).filter(|s| !s.is_empty()).map(str::to_string),
        }
    }
}

/// A finished export, ready to hand to the download collaborator
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub file_name: String,
    pub json: String,
    pub count: usize,
}

fn combined_row(row: &Row) -> Row {
    let mut out = row.clone();
    out.source_type = out.source_type.filter(|s| !s.is_empty());
    out.target_type = out.target_type.filter(|s| !s.is_empty());
    out.source_type_name = out.source_type_name.filter(|s| !s.is_empty());
    out.target_type_name = out.target_type_name.filter(|s| !s.is_empty());
    out
}

/// Serialize the trimmed document for `scope`
pub fn export_json(rows: &[Row], scope: ExportScope) -> Result<(String, usize)> {
    let rows = trim_trailing_empty_rows(rows.to_vec());
    if rows.is_empty() {
        return Err(AlignError::EmptyExport);
    }

    let json = match scope {
        ExportScope::Both => {
            let out: Vec<Row> = rows.iter().map(combined_row).collect();
            serde_json::to_string_pretty(&out)?
        }
        ExportScope::Source | ExportScope::Target => {
            let column = if scope == ExportScope::Source { Column::Source } else { Column::Target };
            let out: Vec<ExportedCell> = rows.iter().map(|r| ExportedCell::from_row(r, column)).collect();
            serde_json::to_string_pretty(&out)?
        }
    };
    Ok((json, rows.len()))
}

/// Export file name: `<prefix>-<scope>-<unix millis>.json`
pub fn export_file_name(prefix: &str, scope: ExportScope, timestamp_millis: i64) -> String {
    format!("{}-{}-{}.json", prefix, scope.name(), timestamp_millis)
}

/// Build a complete export payload stamped with the current time
pub fn build_export(rows: &[Row], scope: ExportScope, config: &AlignerConfig) -> Result<ExportPayload> {
    let (json, count) = export_json(rows, scope)?;
    let file_name = export_file_name(&config.export_prefix, scope, chrono::Utc::now().timestamp_millis());
    log::info!("export: scope={} rows={} file={}", scope.name(), count, file_name);
    Ok(ExportPayload { file_name, json, count })
}
