//! WASM build test
//!
//! Drives the JavaScript-facing session API in a browser.

#![cfg(target_arch = "wasm32")]

use aligner_wasm::api;
use aligner_wasm::ViewSnapshot;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn snapshot(value: JsValue) -> ViewSnapshot {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_session_starts_empty() {
    let snap = snapshot(api::init_session(JsValue::UNDEFINED).unwrap());
    assert!(snap.rows.is_empty());
    assert_eq!(snap.history_count, 1);
    assert!(!snap.can_undo);
}

#[wasm_bindgen_test]
fn test_import_merge_undo() {
    api::init_session(JsValue::UNDEFINED).unwrap();
    api::import_file("a\nb\nc", "source.txt", "source").unwrap();
    let snap = snapshot(api::get_snapshot().unwrap());
    assert_eq!(snap.rows.len(), 3);

    let first = snap.rows[0].id.clone();
    let second = snap.rows[1].id.clone();
    api::toggle_selection(&first, "source", false, false).unwrap();
    api::toggle_selection(&second, "source", false, false).unwrap();
    let merged = snapshot(api::merge_selected("source").unwrap());
    assert_eq!(merged.rows[0].source_text, "a b");
    assert!(merged.selected_source_ids.is_empty());

    let undone = snapshot(api::undo().unwrap());
    assert_eq!(undone.rows[0].source_text, "a");
    assert!(undone.can_redo);
}

#[wasm_bindgen_test]
fn test_bad_arguments_are_errors() {
    api::init_session(JsValue::UNDEFINED).unwrap();
    assert!(api::merge_selected("middle").is_err());
    assert!(api::export_rows("both").is_err());
    assert!(api::navigate_to("row-missing").is_err());
}

#[wasm_bindgen_test]
fn test_rejected_arguments_carry_their_message() {
    api::init_session(JsValue::UNDEFINED).unwrap();
    let err = api::merge_selected("middle").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Unknown column: middle"));

    // an empty document is reported as a warning but still rejected
    let err = api::export_rows("both").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("No content to export"));
}

#[wasm_bindgen_test]
fn test_save_and_load_round_trip() {
    api::init_session(JsValue::UNDEFINED).unwrap();
    api::import_file("x\ny", "target.txt", "target").unwrap();
    api::save_session_to_storage().unwrap();

    let loaded = snapshot(api::load_session_from_storage().unwrap());
    assert_eq!(loaded.rows.len(), 2);
    assert_eq!(loaded.rows[1].target_text, "y");

    let cleared = snapshot(api::clear_all().unwrap());
    assert!(cleared.rows.is_empty());
}
