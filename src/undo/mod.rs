//! Snapshot-based undo/redo history
//!
//! Every committed mutation pushes a full snapshot of the document plus the
//! selection at that moment. Snapshots are immutable once pushed; the stack
//! hands out shared pointers to them so the live document can never alias a
//! history entry.

use crate::config::MAX_HISTORY;
use crate::models::{Row, SelectionState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// One immutable snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub rows: Vec<Row>,
    #[serde(default)]
    pub selected_source_ids: Vec<String>,
    #[serde(default)]
    pub selected_target_ids: Vec<String>,
}

impl HistoryEntry {
    pub fn new(rows: &[Row], selection: &SelectionState) -> Self {
        Self {
            rows: rows.to_vec(),
            selected_source_ids: selection.source_ids.iter().cloned().collect(),
            selected_target_ids: selection.target_ids.iter().cloned().collect(),
        }
    }

    /// Selection to restore alongside the rows
    pub fn selection(&self) -> SelectionState {
        SelectionState::from_ids(&self.selected_source_ids, &self.selected_target_ids)
    }
}

/// Linear history with a pointer to the current snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<Arc<HistoryEntry>>,
    /// Index of the current snapshot; meaningless while `entries` is empty
    current_index: usize,
    /// Maximum number of snapshots to keep
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl History {
    /// Create an empty history with the given capacity
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            current_index: 0,
            max_size: max_size.max(1),
        }
    }

    /// Rebuild a history from persisted entries and pointer
    ///
    /// Entries beyond capacity are dropped from the front and the pointer is
    /// clamped into range.
    pub fn restore(entries: Vec<HistoryEntry>, index: i64, max_size: usize) -> Self {
        let mut history = Self::new(max_size);
        let overflow = entries.len().saturating_sub(history.max_size);
        history.entries = entries.into_iter().skip(overflow).map(Arc::new).collect();
        let shifted = index - overflow as i64;
        let last = history.entries.len().saturating_sub(1) as i64;
        history.current_index = shifted.clamp(0, last) as usize;
        history
    }

    /// Record a new snapshot, discarding any redo branch
    pub fn push(&mut self, rows: &[Row], selection: &SelectionState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.current_index + 1);
        }
        self.entries.push_back(Arc::new(HistoryEntry::new(rows, selection)));

        // Enforce max size
        if self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.current_index = self.entries.len() - 1;
    }

    /// Step back; `None` at the oldest snapshot
    pub fn undo(&mut self) -> Option<Arc<HistoryEntry>> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        self.entries.get(self.current_index).cloned()
    }

    /// Step forward; `None` at the newest snapshot
    pub fn redo(&mut self) -> Option<Arc<HistoryEntry>> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        self.entries.get(self.current_index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.current_index).map(Arc::as_ref)
    }

    /// Pointer as persisted: -1 when there are no snapshots
    pub fn index(&self) -> i64 {
        if self.entries.is_empty() {
            -1
        } else {
            self.current_index as i64
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().map(Arc::as_ref)
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tag: &str) -> Vec<Row> {
        vec![Row::with_text(format!("id-{}", tag), tag, "")]
    }

    #[test]
    fn test_undo_redo_basic() {
        let mut history = History::new(10);
        let sel = SelectionState::new();
        history.push(&doc("a"), &sel);
        history.push(&doc("b"), &sel);

        assert!(history.can_undo());
        assert!(!history.can_redo());

        let entry = history.undo().unwrap();
        assert_eq!(entry.rows[0].source_text, "a");
        assert!(!history.can_undo());
        assert!(history.can_redo());

        let entry = history.redo().unwrap();
        assert_eq!(entry.rows[0].source_text, "b");
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut history = History::new(10);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.index(), -1);

        history.push(&doc("a"), &SelectionState::new());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = History::new(10);
        let sel = SelectionState::new();
        for t in ["a", "b", "c"] {
            history.push(&doc(t), &sel);
        }
        history.undo();
        history.undo();
        history.push(&doc("d"), &sel);
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().rows[0].source_text, "d");
    }

    #[test]
    fn test_max_size_enforcement() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(&doc(&i.to_string()), &SelectionState::new());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        let oldest: Vec<String> = history.entries().map(|e| e.rows[0].source_text.clone()).collect();
        assert_eq!(oldest, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_snapshot_is_independent_of_live_rows() {
        let mut history = History::new(3);
        let mut rows = doc("a");
        history.push(&rows, &SelectionState::new());
        rows[0].source_text = "mutated".to_string();
        assert_eq!(history.current().unwrap().rows[0].source_text, "a");
    }

    #[test]
    fn test_restore_clamps_pointer() {
        let entries: Vec<HistoryEntry> = (0..4)
            .map(|i| HistoryEntry::new(&doc(&i.to_string()), &SelectionState::new()))
            .collect();
        let history = History::restore(entries.clone(), 99, 10);
        assert_eq!(history.index(), 3);

        let history = History::restore(entries, 3, 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert_eq!(history.current().unwrap().rows[0].source_text, "3");

        let history = History::restore(vec![], -1, 5);
        assert_eq!(history.index(), -1);
    }

    #[test]
    fn test_entry_keeps_selection() {
        let mut sel = SelectionState::new();
        sel.source_ids.insert("x".to_string());
        let entry = HistoryEntry::new(&doc("a"), &sel);
        assert_eq!(entry.selection().source_ids, sel.source_ids);
        assert!(entry.selection().target_ids.is_empty());
    }
}
