//! Shared types for the WASM API
//!
//! Result shapes handed back to JavaScript alongside the view snapshot.

use crate::formats::{ExportPayload, ImportFormat};
use crate::models::ViewSnapshot;

/// Result of an import
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub snapshot: ViewSnapshot,
    pub imported: usize,
    pub format: String,    // "txt" or "json"
}

impl ImportSummary {
    pub fn new(snapshot: ViewSnapshot, imported: usize, format: ImportFormat) -> Self {
        let format = match format {
            ImportFormat::Text => "txt",
            ImportFormat::Json => "json",
        };
        Self { snapshot, imported, format: format.to_string() }
    }
}

/// Result of an export, ready to hand to the download collaborator
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub file_name: String,
    pub json: String,
    pub count: usize,
    pub message: String,
}

impl From<ExportPayload> for ExportResult {
    fn from(payload: ExportPayload) -> Self {
        let message = format!("Exported {} rows to {}", payload.count, payload.file_name);
        Self {
            file_name: payload.file_name,
            json: payload.json,
            count: payload.count,
            message,
        }
    }
}
