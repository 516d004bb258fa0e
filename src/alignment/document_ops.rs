//! Document-level operators
//!
//! Column operators here follow one pattern: project the document, mutate a
//! single column's array, reconstruct against the prior document, trim.
//! Whole-row deletion and tagging work on the rows directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::merge::{delete_entries, merge_adjacent, merge_entries, union_tags, MergeDirection};
use super::projection::{to_column_arrays, ColumnArrays};
use super::reconstruct::reconstruct;
use super::trim::trim_trailing_empty_rows;
use crate::errors::{AlignError, Result};
use crate::models::{Column, Row};

fn rebuild(rows: &[Row], arrays: ColumnArrays) -> Vec<Row> {
    trim_trailing_empty_rows(reconstruct(&arrays.source, &arrays.target, Some(rows)))
}

fn index_of(rows: &[Row], id: &str) -> Result<usize> {
    rows.iter()
        .position(|r| r.id == id)
        .ok_or_else(|| AlignError::RowNotFound(id.to_string()))
}

/// Sorted indices of the given ids; ids not in the document are skipped
pub fn indices_of(rows: &[Row], ids: &BTreeSet<String>) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| ids.contains(&r.id))
        .map(|(i, _)| i)
        .collect()
}

/// Merge the selected cells of one column into the first selected row
pub fn merge_selected(rows: &[Row], column: Column, ids: &BTreeSet<String>) -> Result<Vec<Row>> {
    let indices = indices_of(rows, ids);
    if indices.len() < 2 {
        return Err(AlignError::SelectionTooSmall {
            column,
            required: 2,
            selected: indices.len(),
        });
    }

    let mut arrays = to_column_arrays(rows);
    merge_entries(arrays.get_mut(column), &indices);
    log::info!("merge: column={} rows={:?}", column, indices);
    Ok(rebuild(rows, arrays))
}

/// Merge one cell with its neighbour in the same column
pub fn merge_with_neighbour(rows: &[Row], row_id: &str, column: Column, direction: MergeDirection) -> Result<Vec<Row>> {
    let index = index_of(rows, row_id)?;
    let mut arrays = to_column_arrays(rows);
    merge_adjacent(arrays.get_mut(column), index, direction).ok_or_else(|| AlignError::NoNeighbour {
        row_id: row_id.to_string(),
        direction: direction.to_string(),
    })?;
    log::info!("merge {}: column={} index={}", direction, column, index);
    Ok(rebuild(rows, arrays))
}

/// Remove the selected cells from one column; the column shifts up
pub fn delete_content(rows: &[Row], column: Column, ids: &BTreeSet<String>) -> Result<Vec<Row>> {
    let indices = indices_of(rows, ids);
    if indices.is_empty() {
        return Err(AlignError::NothingSelected);
    }

    let mut arrays = to_column_arrays(rows);
    let removed = delete_entries(arrays.get_mut(column), &indices);
    log::info!("delete content: column={} removed={}", column, removed);
    Ok(rebuild(rows, arrays))
}

/// Remove whole rows by id, without reconstruction
pub fn delete_rows(rows: &[Row], ids: &BTreeSet<String>) -> Vec<Row> {
    rows.iter().filter(|r| !ids.contains(&r.id)).cloned().collect()
}

/// Tag/type changes applied to a column selection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TagUpdate {
    /// Tags added to each selected cell
    #[serde(default)]
    pub tags: Vec<String>,

    /// Structural type to set, if any
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Semantic label to set, if any
    #[serde(default, alias = "typename")]
    pub type_name: Option<String>,
}

impl TagUpdate {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.kind.is_none() && self.type_name.is_none()
    }
}

/// Add tags and set type metadata on the selected cells of one column
pub fn apply_tags(rows: &[Row], column: Column, ids: &BTreeSet<String>, update: &TagUpdate) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            if !ids.contains(&row.id) {
                return row.clone();
            }
            let mut row = row.clone();
            if !update.tags.is_empty() {
                let merged = union_tags([row.tags(column), update.tags.as_slice()]);
                *row.tags_mut(column) = merged;
            }
            if let Some(kind) = update.kind.as_ref().filter(|k| !k.is_empty()) {
                row.set_block_type(column, Some(kind.clone()));
            }
            if let Some(name) = update.type_name.as_ref().filter(|n| !n.is_empty()) {
                row.set_type_name(column, Some(name.clone()));
            }
            row
        })
        .collect()
}
