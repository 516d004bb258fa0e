//! Per-column row selection
//!
//! Tracks which rows are selected in each column, plus what is needed for
//! shift-click ranges: the last row clicked per column, and whether the last
//! action selected both columns at once (a range started in "both" mode
//! keeps selecting both).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::row::{Column, Row};

/// Which columns a clear/select action applies to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnScope {
    Source,
    Target,
    Both,
}

impl From<Column> for ColumnScope {
    fn from(column: Column) -> Self {
        match column {
            Column::Source => ColumnScope::Source,
            Column::Target => ColumnScope::Target,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub source_ids: BTreeSet<String>,
    pub target_ids: BTreeSet<String>,
    pub last_source_id: Option<String>,
    pub last_target_id: Option<String>,
    pub last_selection_was_both: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a selection from stored id lists (history entries)
    pub fn from_ids(source: &[String], target: &[String]) -> Self {
        Self {
            source_ids: source.iter().cloned().collect(),
            target_ids: target.iter().cloned().collect(),
            ..Default::default()
        }
    }

    pub fn ids(&self, column: Column) -> &BTreeSet<String> {
        match column {
            Column::Source => &self.source_ids,
            Column::Target => &self.target_ids,
        }
    }

    fn ids_mut(&mut self, column: Column) -> &mut BTreeSet<String> {
        match column {
            Column::Source => &mut self.source_ids,
            Column::Target => &mut self.target_ids,
        }
    }

    fn last_id(&self, column: Column) -> Option<&str> {
        match column {
            Column::Source => self.last_source_id.as_deref(),
            Column::Target => self.last_target_id.as_deref(),
        }
    }

    fn set_last_id(&mut self, column: Column, id: Option<String>) {
        match column {
            Column::Source => self.last_source_id = id,
            Column::Target => self.last_target_id = id,
        }
    }

    pub fn is_selected(&self, id: &str, column: Column) -> bool {
        self.ids(column).contains(id)
    }

    /// Ids selected in either column
    pub fn union_ids(&self) -> BTreeSet<String> {
        self.source_ids.union(&self.target_ids).cloned().collect()
    }

    /// Selected row indices of one column, ascending, ignoring stale ids
    pub fn indices(&self, column: Column, rows: &[Row]) -> Vec<usize> {
        let ids = self.ids(column);
        rows.iter()
            .enumerate()
            .filter(|(_, row)| ids.contains(&row.id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Handle a checkbox click
    ///
    /// - `select_both`: toggle the row in both columns
    /// - `extend`: shift-click; toggles the range from the last clicked row
    ///   to this one, continuing "both" mode if the last click was in it
    pub fn toggle(&mut self, id: &str, column: Column, select_both: bool, extend: bool, rows: &[Row]) {
        if extend && self.toggle_range(id, column, select_both, rows) {
            return;
        }

        if select_both {
            let both_selected = self.source_ids.contains(id) && self.target_ids.contains(id);
            for col in [Column::Source, Column::Target] {
                if both_selected {
                    self.ids_mut(col).remove(id);
                } else {
                    self.ids_mut(col).insert(id.to_string());
                }
                self.set_last_id(col, Some(id.to_string()));
            }
            self.last_selection_was_both = true;
            return;
        }

        let ids = self.ids_mut(column);
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        self.set_last_id(column, Some(id.to_string()));
        self.last_selection_was_both = false;
    }

    /// Returns false when there is no usable anchor for a range
    fn toggle_range(&mut self, id: &str, column: Column, select_both: bool, rows: &[Row]) -> bool {
        let Some(last_id) = self.last_id(column) else {
            return false;
        };
        let current = rows.iter().position(|r| r.id == id);
        let last = rows.iter().position(|r| r.id == last_id);
        let (Some(current), Some(last)) = (current, last) else {
            return false;
        };

        let (start, end) = (current.min(last), current.max(last));
        let range: Vec<String> = rows[start..=end].iter().map(|r| r.id.clone()).collect();
        let all_selected = range.iter().all(|rid| self.ids(column).contains(rid));

        let both = select_both || self.last_selection_was_both;
        let columns: &[Column] = if both {
            &[Column::Source, Column::Target]
        } else {
            std::slice::from_ref(&column)
        };

        for &col in columns {
            let ids = self.ids_mut(col);
            for rid in &range {
                if all_selected {
                    ids.remove(rid);
                } else {
                    ids.insert(rid.clone());
                }
            }
            self.set_last_id(col, Some(id.to_string()));
        }
        self.last_selection_was_both = both;
        true
    }

    /// Select every row in a column, or clear it if everything is selected
    pub fn toggle_all(&mut self, column: Column, rows: &[Row]) {
        let all_selected = rows.iter().all(|r| self.ids(column).contains(&r.id));
        let ids = self.ids_mut(column);
        if all_selected {
            ids.clear();
        } else {
            *ids = rows.iter().map(|r| r.id.clone()).collect();
        }
        self.last_selection_was_both = false;
    }

    pub fn clear(&mut self, scope: ColumnScope) {
        match scope {
            ColumnScope::Source => self.clear_column(Column::Source),
            ColumnScope::Target => self.clear_column(Column::Target),
            ColumnScope::Both => {
                self.clear_column(Column::Source);
                self.clear_column(Column::Target);
            }
        }
        self.last_selection_was_both = false;
    }

    fn clear_column(&mut self, column: Column) {
        self.ids_mut(column).clear();
        self.set_last_id(column, None);
    }

    /// Drop ids that no longer name a row
    pub fn retain_existing(&mut self, rows: &[Row]) {
        let live: BTreeSet<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        self.source_ids.retain(|id| live.contains(id.as_str()));
        self.target_ids.retain(|id| live.contains(id.as_str()));
    }
}
