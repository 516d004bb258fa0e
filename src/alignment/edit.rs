//! Dual-column edit save
//!
//! The edit view shows one row's cell in the edited column next to a cell
//! of the other column, and that other cell may belong to a different row
//! (it is navigated independently). Saving folds both into one commit:
//!
//! 1. split the edited text into lines (line endings normalized, blanks kept)
//! 2. decide whether the sibling cell was edited too
//! 3. project the document into per-column arrays
//! 4. splice the edited column at the edited row's index
//! 5. splice the other column at the sibling row's index, if it was edited
//! 6. reconstruct against the pre-edit document so untouched rows keep ids
//! 7. trim trailing empty rows
//!
//! Clearing, in-place replacement, single-column splits and dual splits all
//! fall out of these steps; none of them has its own code path.

use serde::{Deserialize, Serialize};

use super::projection::to_column_arrays;
use super::reconstruct::reconstruct;
use super::split::split_entry;
use super::trim::trim_trailing_empty_rows;
use crate::config::AlignerConfig;
use crate::errors::{AlignError, Result};
use crate::models::{Column, Row};

/// A save from the edit view
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    /// Row whose `column` cell was edited
    pub row_id: String,
    pub column: Column,
    pub new_text: String,
    /// Text shown for the other column when saving
    #[serde(default)]
    pub other_column_text: String,
    /// Row that owns the other column's displayed text
    #[serde(default)]
    pub other_column_row_id: String,
}

/// Result of a save
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub rows: Vec<Row>,
    /// Index of the originally edited row
    pub edited_index: usize,
    /// Row now shown in the edit view (the row at `edited_index`, if any)
    pub focus_row_id: Option<String>,
    /// Number of entries the edited column produced
    pub edited_lines: usize,
    /// Number of entries the other column produced, when it was edited
    pub other_lines: Option<usize>,
}

impl EditOutcome {
    /// Short human-readable summary for status messages
    pub fn summary(&self, column: Column) -> String {
        let other = column.other();
        match (self.edited_lines, self.other_lines) {
            (1, None) => format!("{} content updated", column),
            (1, Some(1)) => "Both columns saved".to_string(),
            (n, None) => format!("{} content split into {} lines", column, n),
            (n, Some(1)) => format!("{} content split into {} lines, {} also saved", column, n, other),
            (n, Some(m)) => format!("Both columns split: {} {} lines, {} {} lines", column, n, other, m),
        }
    }
}

/// Apply an edit-view save to `rows`
///
/// Fails with `RowNotFound` when the edited row is gone, or when the
/// sibling text changed but its row is gone. On failure `rows` is untouched
/// (it is only ever read).
pub fn apply_edit(rows: &[Row], request: &EditRequest, config: &AlignerConfig) -> Result<EditOutcome> {
    let column = request.column;
    let other = column.other();

    let edited_index = rows
        .iter()
        .position(|r| r.id == request.row_id)
        .ok_or_else(|| AlignError::RowNotFound(request.row_id.clone()))?;

    let other_index = rows.iter().position(|r| r.id == request.other_column_row_id);
    // Raw comparison; line endings are only normalized for the split
    let stored_other = other_index.map_or("", |i| rows[i].text(other));
    let other_edited = request.other_column_text != stored_other;

    if other_edited && other_index.is_none() {
        return Err(AlignError::RowNotFound(request.other_column_row_id.clone()));
    }

    let mut arrays = to_column_arrays(rows);
    let edited_lines = split_entry(arrays.get_mut(column), edited_index, &request.new_text, config);

    let other_lines = match other_index {
        Some(index) if other_edited => Some(split_entry(arrays.get_mut(other), index, &request.other_column_text, config)),
        _ => None,
    };

    log::info!(
        "edit save: column={} row_index={} lines={} other_edited={} source_len={} target_len={}",
        column,
        edited_index,
        edited_lines,
        other_edited,
        arrays.source.len(),
        arrays.target.len()
    );

    let rebuilt = reconstruct(&arrays.source, &arrays.target, Some(rows));
    let rows = trim_trailing_empty_rows(rebuilt);
    let focus_row_id = rows.get(edited_index).map(|r| r.id.clone());

    Ok(EditOutcome {
        rows,
        edited_index,
        focus_row_id,
        edited_lines,
        other_lines,
    })
}
