//! Error types for the alignment editor
//!
//! Every operator either produces a complete new document or fails with one
//! of these; nothing is committed on failure.

use thiserror::Error;

use crate::models::Column;

/// Top-level error type
#[derive(Debug, Error)]
pub enum AlignError {
    /// Import payload is not a non-empty array of entries
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    /// Import file extension is not .txt or .json
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// An operation referenced a row id absent from the document
    #[error("Row not found: {0}")]
    RowNotFound(String),

    /// Persistence write was rejected for lack of space
    #[error("Storage quota exceeded. Try exporting and clearing old data.")]
    StorageQuotaExceeded,

    /// Any other persistence failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Bulk operation needs more selected rows
    #[error("Please select at least {required} {column} rows (selected: {selected})")]
    SelectionTooSmall {
        column: Column,
        required: usize,
        selected: usize,
    },

    /// Bulk operation invoked with an empty selection
    #[error("No rows selected")]
    NothingSelected,

    /// Adjacent merge has nothing to merge with
    #[error("Row {row_id} has no {direction} neighbour to merge with")]
    NoNeighbour { row_id: String, direction: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Export would produce no rows
    #[error("No content to export")]
    EmptyExport,
}

impl From<serde_yaml::Error> for AlignError {
    fn from(e: serde_yaml::Error) -> Self {
        AlignError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
