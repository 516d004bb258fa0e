//! WASM API for the alignment editor session
//!
//! The session is the single source of truth: JavaScript sends intents,
//! WASM applies them to the `EditorState` and hands back a view snapshot.
//! Each call locks the session for one synchronous operation; a failed
//! operation leaves the stored state untouched.

use wasm_bindgen::prelude::*;
use std::sync::{Mutex, MutexGuard};
use lazy_static::lazy_static;

use super::helpers::{
    align_error, deserialize, deserialize_or_default, parse_column, parse_direction, parse_export_scope,
    parse_scope, serialize, validation_error,
};
use super::types::{ExportResult, ImportSummary};
use crate::alignment::{EditRequest, TagUpdate};
use crate::config::AlignerConfig;
use crate::models::{BlockType, EditorState, TypeName};
use crate::storage::{clear_session, load_session, save_session, BrowserStorage};
use crate::{wasm_info, wasm_warn};

// WASM-owned session storage (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<Option<EditorState>> = Mutex::new(None);
}

fn lock_session() -> Result<MutexGuard<'static, Option<EditorState>>, JsValue> {
    SESSION
        .lock()
        .map_err(|_| validation_error("Session lock poisoned by an earlier panic"))
}

/// Run `op` against the current state and store the state it returns
///
/// Returns the serialized view snapshot of the new state.
fn update<F>(context: &str, op: F) -> Result<JsValue, JsValue>
where
    F: FnOnce(&EditorState) -> Result<(EditorState, Option<String>), JsValue>,
{
    let mut guard = lock_session()?;
    let state = guard
        .as_ref()
        .ok_or_else(|| validation_error("No session initialized"))?;
    let (next, message) = op(state)?;
    let snapshot = next.snapshot(message);
    *guard = Some(next);
    serialize(&snapshot, context)
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// Start a fresh session with an optional configuration object
#[wasm_bindgen(js_name = initSession)]
pub fn init_session(config_js: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("initSession called");

    let config: AlignerConfig = deserialize_or_default(config_js, "Config deserialization error")?;
    let config = config.validated().map_err(align_error)?;
    let state = EditorState::new(config);
    let snapshot = state.snapshot(None);
    *lock_session()? = Some(state);

    serialize(&snapshot, "Snapshot serialization error")
}

/// Replace the session with what is persisted in local storage
#[wasm_bindgen(js_name = loadSession)]
pub fn load_session_from_storage() -> Result<JsValue, JsValue> {
    wasm_info!("loadSession called");

    let mut guard = lock_session()?;
    let config = guard.as_ref().map(|s| s.config.clone()).unwrap_or_default();
    let store = BrowserStorage::local().map_err(align_error)?;
    let persisted = load_session(&store, &config).map_err(align_error)?;
    let state = EditorState::from_persisted(persisted, config);

    wasm_info!("  Loaded {} rows, {} history entries", state.rows.len(), state.history.len());
    let snapshot = state.snapshot(None);
    *guard = Some(state);
    serialize(&snapshot, "Snapshot serialization error")
}

/// Persist document, history and history pointer
#[wasm_bindgen(js_name = saveSession)]
pub fn save_session_to_storage() -> Result<(), JsValue> {
    wasm_info!("saveSession called");

    let guard = lock_session()?;
    let state = guard
        .as_ref()
        .ok_or_else(|| validation_error("No session initialized"))?;
    let mut store = BrowserStorage::local().map_err(align_error)?;
    save_session(&mut store, &state.config.storage_keys, &state.rows, &state.history).map_err(align_error)
}

/// Drop document, history and selection, and remove the persisted copies
#[wasm_bindgen(js_name = clearAll)]
pub fn clear_all() -> Result<JsValue, JsValue> {
    wasm_info!("clearAll called");

    let mut guard = lock_session()?;
    let config = guard.as_ref().map(|s| s.config.clone()).unwrap_or_default();
    let mut store = BrowserStorage::local().map_err(align_error)?;
    clear_session(&mut store, &config.storage_keys).map_err(align_error)?;

    let state = EditorState::new(config);
    let snapshot = state.snapshot(Some("All data cleared".to_string()));
    *guard = Some(state);
    serialize(&snapshot, "Snapshot serialization error")
}

/// Get the current view snapshot
#[wasm_bindgen(js_name = getSnapshot)]
pub fn get_snapshot() -> Result<JsValue, JsValue> {
    let guard = lock_session()?;
    match guard.as_ref() {
        Some(state) => serialize(&state.snapshot(None), "Snapshot serialization error"),
        None => {
            wasm_warn!("No session initialized");
            Err(JsValue::from_str("No session initialized"))
        }
    }
}

// ============================================================================
// Editing
// ============================================================================

/// Save from the edit view
#[wasm_bindgen(js_name = editSave)]
pub fn edit_save(request_js: JsValue) -> Result<JsValue, JsValue> {
    let request: EditRequest = deserialize(request_js, "EditRequest deserialization error")?;
    wasm_info!("editSave called: row={} column={}", request.row_id, request.column);

    update("editSave serialization error", |state| {
        let (next, outcome) = state.edit_save(&request).map_err(align_error)?;
        let message = outcome.summary(request.column);
        wasm_info!("  {}", message);
        Ok((next, Some(message)))
    })
}

/// Show another row in the edit view
#[wasm_bindgen(js_name = navigateTo)]
pub fn navigate_to(row_id: &str) -> Result<JsValue, JsValue> {
    update("navigateTo serialization error", |state| {
        let next = state.navigate_to(row_id).map_err(align_error)?;
        Ok((next, None))
    })
}

/// Merge the selected cells of one column
#[wasm_bindgen(js_name = mergeSelected)]
pub fn merge_selected(column: &str) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    wasm_info!("mergeSelected called: column={}", column);

    update("mergeSelected serialization error", |state| {
        let count = state.selection.ids(column).len();
        let next = state.merge_selected(column).map_err(align_error)?;
        Ok((next, Some(format!("Merged {} {} rows", count, column))))
    })
}

/// Merge a cell with its previous or next neighbour
#[wasm_bindgen(js_name = mergeAdjacent)]
pub fn merge_adjacent(row_id: &str, column: &str, direction: &str) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    let direction = parse_direction(direction)?;
    wasm_info!("mergeAdjacent called: row={} column={} direction={}", row_id, column, direction);

    update("mergeAdjacent serialization error", |state| {
        let next = state.merge_adjacent(row_id, column, direction).map_err(align_error)?;
        Ok((next, Some(format!("Merged with {} row", direction))))
    })
}

/// Delete the selected cells of one column, shifting the column up
#[wasm_bindgen(js_name = deleteContent)]
pub fn delete_content(column: &str) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    wasm_info!("deleteContent called: column={}", column);

    update("deleteContent serialization error", |state| {
        let count = state.selection.ids(column).len();
        let next = state.delete_content(column).map_err(align_error)?;
        Ok((next, Some(format!("Deleted {} {} cells", count, column))))
    })
}

/// Delete every row selected in either column
#[wasm_bindgen(js_name = deleteRows)]
pub fn delete_rows() -> Result<JsValue, JsValue> {
    wasm_info!("deleteRows called");

    update("deleteRows serialization error", |state| {
        let count = state.selection.union_ids().len();
        let next = state.delete_rows().map_err(align_error)?;
        Ok((next, Some(format!("Deleted {} rows", count))))
    })
}

/// Add tags and set type metadata on the selected cells of one column
#[wasm_bindgen(js_name = applyTags)]
pub fn apply_tags(
    column: &str,
    tags_js: JsValue,
    block_type: Option<String>,
    type_name: Option<String>,
) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    let tags: Vec<String> = deserialize_or_default(tags_js, "Tags deserialization error")?;
    let update_request = TagUpdate { tags, kind: block_type, type_name };
    wasm_info!("applyTags called: column={} tags={:?}", column, update_request.tags);

    update("applyTags serialization error", |state| {
        let next = state.apply_tags(column, &update_request).map_err(align_error)?;
        Ok((next, Some(format!("Applied tags to {} cells", column))))
    })
}

// ============================================================================
// Import / Export
// ============================================================================

/// Import a `.txt` or `.json` file into one column
#[wasm_bindgen(js_name = importFile)]
pub fn import_file(content: &str, file_name: &str, column: &str) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    wasm_info!("importFile called: file={} column={}", file_name, column);

    let mut guard = lock_session()?;
    let state = guard
        .as_ref()
        .ok_or_else(|| validation_error("No session initialized"))?;
    let (next, result) = state.import(content, file_name, column).map_err(align_error)?;

    let message = format!("Imported {} lines into {}", result.imported, column);
    wasm_info!("  {}", message);
    let summary = ImportSummary::new(next.snapshot(Some(message)), result.imported, result.format);
    *guard = Some(next);
    serialize(&summary, "ImportSummary serialization error")
}

/// Export the document or one column as JSON
#[wasm_bindgen(js_name = exportRows)]
pub fn export_rows(scope: &str) -> Result<JsValue, JsValue> {
    let scope = parse_export_scope(scope)?;
    wasm_info!("exportRows called: scope={}", scope.name());

    let guard = lock_session()?;
    let state = guard
        .as_ref()
        .ok_or_else(|| validation_error("No session initialized"))?;
    let payload = state.export(scope).map_err(align_error)?;
    serialize(&ExportResult::from(payload), "ExportResult serialization error")
}

// ============================================================================
// Undo/Redo operations
// ============================================================================

/// Undo the last committed operation; a no-op at the oldest snapshot
#[wasm_bindgen(js_name = undo)]
pub fn undo() -> Result<JsValue, JsValue> {
    wasm_info!("undo called");

    update("undo serialization error", |state| match state.undo() {
        Some(next) => Ok((next, Some("Undo".to_string()))),
        None => Ok((state.clone(), None)),
    })
}

/// Redo the last undone operation; a no-op at the newest snapshot
#[wasm_bindgen(js_name = redo)]
pub fn redo() -> Result<JsValue, JsValue> {
    wasm_info!("redo called");

    update("redo serialization error", |state| match state.redo() {
        Some(next) => Ok((next, Some("Redo".to_string()))),
        None => Ok((state.clone(), None)),
    })
}

// ============================================================================
// Selection
// ============================================================================

/// Checkbox click on a row
#[wasm_bindgen(js_name = toggleSelection)]
pub fn toggle_selection(id: &str, column: &str, select_both: bool, shift: bool) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    update("toggleSelection serialization error", |state| {
        Ok((state.toggle_selection(id, column, select_both, shift), None))
    })
}

/// Select every row of a column, or clear it if all are selected
#[wasm_bindgen(js_name = selectAll)]
pub fn select_all(column: &str) -> Result<JsValue, JsValue> {
    let column = parse_column(column)?;
    update("selectAll serialization error", |state| Ok((state.select_all(column), None)))
}

/// Clear the selection of one column or both
#[wasm_bindgen(js_name = clearSelection)]
pub fn clear_selection(scope: &str) -> Result<JsValue, JsValue> {
    let scope = parse_scope(scope)?;
    update("clearSelection serialization error", |state| Ok((state.clear_selection(scope), None)))
}

// ============================================================================
// Tag vocabulary
// ============================================================================

/// Structural types offered by the tag picker
#[wasm_bindgen(js_name = getBlockTypes)]
pub fn get_block_types() -> js_sys::Array {
    let result = js_sys::Array::new();
    for kind in BlockType::all() {
        result.push(&JsValue::from_str(kind.as_str()));
    }
    result
}

/// Semantic labels offered by the tag picker
#[wasm_bindgen(js_name = getTypeNames)]
pub fn get_type_names() -> js_sys::Array {
    let result = js_sys::Array::new();
    for name in TypeName::all() {
        result.push(&JsValue::from_str(name.as_str()));
    }
    result
}
