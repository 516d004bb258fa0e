//! Document → per-column flat arrays

use crate::models::{Column, FlatEntry, Row};

/// The two per-column arrays of a projected document
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ColumnArrays {
    pub source: Vec<FlatEntry>,
    pub target: Vec<FlatEntry>,
}

impl ColumnArrays {
    pub fn get(&self, column: Column) -> &Vec<FlatEntry> {
        match column {
            Column::Source => &self.source,
            Column::Target => &self.target,
        }
    }

    pub fn get_mut(&mut self, column: Column) -> &mut Vec<FlatEntry> {
        match column {
            Column::Source => &mut self.source,
            Column::Target => &mut self.target,
        }
    }
}

/// Project one column of a row
///
/// A column with text, tags or explicit type metadata becomes a full entry.
/// Anything else becomes a bare `{ text: "" }` slot with no metadata.
pub fn project_cell(row: &Row, column: Column) -> FlatEntry {
    if !row.has_content(column) {
        return FlatEntry::empty();
    }
    FlatEntry {
        text: row.text(column).to_string(),
        tags: Some(row.tags(column).to_vec()),
        kind: row.block_type(column).map(str::to_string),
        type_name: row.type_name(column).map(str::to_string),
    }
}

/// Split a document into its source and target arrays
pub fn to_column_arrays(rows: &[Row]) -> ColumnArrays {
    ColumnArrays {
        source: rows.iter().map(|r| project_cell(r, Column::Source)).collect(),
        target: rows.iter().map(|r| project_cell(r, Column::Target)).collect(),
    }
}
