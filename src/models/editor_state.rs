//! Editor state management
//!
//! `EditorState` is the complete application state: the document, its
//! history, the selection, and the row shown in the edit view. Operators
//! take `&self` and return a new state, so a failed operation leaves the
//! current state exactly as it was and tests can compare before/after.
//!
//! Every committed mutation pushes the new document onto the history
//! together with the selection that was active when the action ran.

use serde::{Deserialize, Serialize};

use crate::alignment::{self, EditOutcome, EditRequest, MergeDirection, TagUpdate};
use crate::config::AlignerConfig;
use crate::errors::{AlignError, Result};
use crate::formats::{self, ExportPayload, ExportScope, ImportResult};
use crate::storage::PersistedSession;
use crate::undo::History;

use super::row::{Column, Row};
use super::selection::{ColumnScope, SelectionState};

/// What the UI needs to re-render after an operation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub rows: Vec<Row>,
    pub selected_source_ids: Vec<String>,
    pub selected_target_ids: Vec<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history_count: usize,
    pub history_index: i64,
    pub editing_row_id: Option<String>,
    /// Status line for the operation that produced this snapshot
    pub message: Option<String>,
}

/// Complete editor state
#[derive(Clone, Debug)]
pub struct EditorState {
    pub rows: Vec<Row>,
    pub history: History,
    pub selection: SelectionState,
    /// Row currently open in the edit view
    pub editing_row_id: Option<String>,
    pub config: AlignerConfig,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(AlignerConfig::default())
    }
}

impl EditorState {
    /// Empty document; the empty state is the first history entry so the
    /// first real edit can be undone
    pub fn new(config: AlignerConfig) -> Self {
        Self::with_rows(Vec::new(), config)
    }

    pub fn with_rows(rows: Vec<Row>, config: AlignerConfig) -> Self {
        let selection = SelectionState::new();
        let mut history = History::new(config.max_history);
        history.push(&rows, &selection);
        Self {
            rows,
            history,
            selection,
            editing_row_id: None,
            config,
        }
    }

    /// Resume a persisted session
    pub fn from_persisted(session: PersistedSession, config: AlignerConfig) -> Self {
        let PersistedSession { rows, mut history } = session;
        let selection = SelectionState::new();
        if history.is_empty() {
            history.push(&rows, &selection);
        }
        Self {
            rows,
            history,
            selection,
            editing_row_id: None,
            config,
        }
    }

    pub fn find_row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn editing_row(&self) -> Option<&Row> {
        self.editing_row_id.as_deref().and_then(|id| self.find_row(id))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Build the next state around `rows` and record it in history
    fn commit(&self, rows: Vec<Row>) -> Self {
        let mut next = self.clone();
        next.history.push(&rows, &self.selection);
        next.rows = rows;
        next.selection.retain_existing(&next.rows);
        if next.editing_row().is_none() {
            next.editing_row_id = None;
        }
        next
    }

    /// Save from the edit view
    pub fn edit_save(&self, request: &EditRequest) -> Result<(Self, EditOutcome)> {
        let outcome = alignment::apply_edit(&self.rows, request, &self.config)?;
        let mut next = self.commit(outcome.rows.clone());
        next.editing_row_id = outcome.focus_row_id.clone();
        Ok((next, outcome))
    }

    /// Point the edit view at another row
    pub fn navigate_to(&self, row_id: &str) -> Result<Self> {
        if self.find_row(row_id).is_none() {
            return Err(AlignError::RowNotFound(row_id.to_string()));
        }
        let mut next = self.clone();
        next.editing_row_id = Some(row_id.to_string());
        Ok(next)
    }

    /// Merge the selected cells of `column`; clears that column's selection
    pub fn merge_selected(&self, column: Column) -> Result<Self> {
        let rows = alignment::merge_selected(&self.rows, column, self.selection.ids(column))?;
        let mut next = self.commit(rows);
        next.selection.clear(column.into());
        Ok(next)
    }

    pub fn merge_adjacent(&self, row_id: &str, column: Column, direction: MergeDirection) -> Result<Self> {
        let rows = alignment::merge_with_neighbour(&self.rows, row_id, column, direction)?;
        Ok(self.commit(rows))
    }

    /// Delete the selected cells of `column`; clears that column's selection
    pub fn delete_content(&self, column: Column) -> Result<Self> {
        let rows = alignment::delete_content(&self.rows, column, self.selection.ids(column))?;
        let mut next = self.commit(rows);
        next.selection.clear(column.into());
        Ok(next)
    }

    /// Delete every row selected in either column
    pub fn delete_rows(&self) -> Result<Self> {
        let ids = self.selection.union_ids();
        if ids.is_empty() {
            return Err(AlignError::NothingSelected);
        }
        let rows = alignment::delete_rows(&self.rows, &ids);
        log::info!("delete rows: removed={}", self.rows.len() - rows.len());
        let mut next = self.commit(rows);
        next.selection.clear(ColumnScope::Both);
        Ok(next)
    }

    /// Apply tags and type metadata to the selected cells of `column`
    pub fn apply_tags(&self, column: Column, update: &TagUpdate) -> Result<Self> {
        let ids = self.selection.ids(column);
        if ids.is_empty() {
            return Err(AlignError::NothingSelected);
        }
        if update.is_empty() {
            return Ok(self.clone());
        }
        let rows = alignment::apply_tags(&self.rows, column, ids, update);
        Ok(self.commit(rows))
    }

    /// Import a file into one column
    pub fn import(&self, content: &str, file_name: &str, column: Column) -> Result<(Self, ImportResult)> {
        let result = formats::import_column(content, file_name, column, &self.rows, &self.config)?;
        let next = self.commit(result.rows.clone());
        Ok((next, result))
    }

    pub fn export(&self, scope: ExportScope) -> Result<ExportPayload> {
        formats::build_export(&self.rows, scope, &self.config)
    }

    /// Restore the previous snapshot; `None` at the oldest one
    pub fn undo(&self) -> Option<Self> {
        let mut next = self.clone();
        let entry = next.history.undo()?;
        next.restore_entry(entry.rows.clone(), entry.selection());
        Some(next)
    }

    /// Restore the next snapshot; `None` at the newest one
    pub fn redo(&self) -> Option<Self> {
        let mut next = self.clone();
        let entry = next.history.redo()?;
        next.restore_entry(entry.rows.clone(), entry.selection());
        Some(next)
    }

    fn restore_entry(&mut self, rows: Vec<Row>, selection: SelectionState) {
        self.rows = rows;
        self.selection = selection;
        if self.editing_row().is_none() {
            self.editing_row_id = None;
        }
    }

    pub fn toggle_selection(&self, id: &str, column: Column, select_both: bool, extend: bool) -> Self {
        let mut next = self.clone();
        next.selection.toggle(id, column, select_both, extend, &self.rows);
        next
    }

    pub fn select_all(&self, column: Column) -> Self {
        let mut next = self.clone();
        next.selection.toggle_all(column, &self.rows);
        next
    }

    pub fn clear_selection(&self, scope: ColumnScope) -> Self {
        let mut next = self.clone();
        next.selection.clear(scope);
        next
    }

    /// Drop document, history and selection, keeping the configuration
    pub fn cleared(&self) -> Self {
        Self::new(self.config.clone())
    }

    /// Snapshot for the UI
    pub fn snapshot(&self, message: Option<String>) -> ViewSnapshot {
        ViewSnapshot {
            rows: self.rows.clone(),
            selected_source_ids: self.selection.source_ids.iter().cloned().collect(),
            selected_target_ids: self.selection.target_ids.iter().cloned().collect(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            history_count: self.history.len(),
            history_index: self.history.index(),
            editing_row_id: self.editing_row_id.clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EditorState {
        EditorState::with_rows(
            vec![
                Row::with_text("a", "s0", "t0"),
                Row::with_text("b", "s1", "t1"),
                Row::with_text("c", "s2", "t2"),
            ],
            AlignerConfig::default(),
        )
    }

    #[test]
    fn test_new_state_has_one_snapshot() {
        let state = EditorState::default();
        assert_eq!(state.history.len(), 1);
        assert!(!state.can_undo());
    }

    #[test]
    fn test_edit_then_undo_redo() {
        let state = state();
        let request = EditRequest {
            row_id: "b".to_string(),
            column: Column::Target,
            new_text: "x\ny".to_string(),
            other_column_text: "s1".to_string(),
            other_column_row_id: "b".to_string(),
        };
        let (edited, outcome) = state.edit_save(&request).unwrap();
        assert_eq!(edited.rows.len(), 4);
        assert_eq!(edited.editing_row_id.as_deref(), Some("b"));
        assert_eq!(outcome.edited_lines, 2);

        let undone = edited.undo().unwrap();
        assert_eq!(undone.rows, state.rows);
        assert!(undone.undo().is_none());

        let redone = undone.redo().unwrap();
        assert_eq!(redone.rows, edited.rows);
        assert!(redone.redo().is_none());
    }

    #[test]
    fn test_failed_operation_leaves_state_untouched() {
        let state = state();
        let request = EditRequest {
            row_id: "missing".to_string(),
            column: Column::Source,
            new_text: "x".to_string(),
            other_column_text: String::new(),
            other_column_row_id: String::new(),
        };
        assert!(state.edit_save(&request).is_err());
        assert!(state.merge_selected(Column::Source).is_err());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.rows.len(), 3);
    }

    #[test]
    fn test_merge_clears_column_selection() {
        let state = state()
            .toggle_selection("a", Column::Source, false, false)
            .toggle_selection("b", Column::Source, false, false)
            .toggle_selection("c", Column::Target, false, false);
        let merged = state.merge_selected(Column::Source).unwrap();
        assert_eq!(merged.rows[0].source_text, "s0 s1");
        assert!(merged.selection.source_ids.is_empty());
        assert!(merged.selection.target_ids.contains("c"));

        let undone = merged.undo().unwrap();
        assert_eq!(undone.rows, state.rows);
    }

    #[test]
    fn test_delete_rows_uses_both_columns() {
        let state = state()
            .toggle_selection("a", Column::Source, false, false)
            .toggle_selection("c", Column::Target, false, false);
        let next = state.delete_rows().unwrap();
        let ids: Vec<&str> = next.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(next.selection.union_ids().is_empty());
        assert!(matches!(next.delete_rows(), Err(AlignError::NothingSelected)));
    }

    #[test]
    fn test_navigate_and_clear_editing_row() {
        let state = state().navigate_to("c").unwrap();
        assert_eq!(state.editing_row().unwrap().source_text, "s2");
        assert!(state.navigate_to("zzz").is_err());

        let next = state
            .toggle_selection("c", Column::Source, true, false)
            .delete_rows()
            .unwrap();
        assert!(next.editing_row_id.is_none());
    }

    #[test]
    fn test_apply_tags_commits() {
        let state = state().toggle_selection("b", Column::Target, false, false);
        let update = TagUpdate {
            tags: vec!["verse".to_string()],
            kind: None,
            type_name: Some("stanza".to_string()),
        };
        let next = state.apply_tags(Column::Target, &update).unwrap();
        assert_eq!(next.rows[1].target_tags, vec!["verse".to_string()]);
        assert_eq!(next.rows[1].target_type_name.as_deref(), Some("stanza"));
        assert_eq!(next.history.len(), 2);
    }

    #[test]
    fn test_snapshot_reports_history() {
        let snapshot = state().snapshot(Some("ok".to_string()));
        assert_eq!(snapshot.history_count, 1);
        assert_eq!(snapshot.history_index, 0);
        assert!(!snapshot.can_undo);
        assert_eq!(snapshot.message.as_deref(), Some("ok"));
    }
}
