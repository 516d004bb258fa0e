//! Shared helpers for WASM API operations
//!
//! This module contains common patterns for serialization, deserialization,
//! argument parsing and error handling across all API operations.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::alignment::MergeDirection;
use crate::errors::AlignError;
use crate::formats::ExportScope;
use crate::models::{Column, ColumnScope};

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log an info message with [ALIGNER] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [ALIGNER] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [ALIGNER] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_info(msg: &str) {
    info(&format!("[ALIGNER] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[ALIGNER] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[ALIGNER] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        crate::wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Deserialize an optional argument; `undefined` and `null` yield the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        crate::wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Argument Parsing
// ============================================================================

pub fn parse_column(value: &str) -> Result<Column, JsValue> {
    value.parse::<Column>().map_err(align_error)
}

pub fn parse_scope(value: &str) -> Result<ColumnScope, JsValue> {
    match value.trim().to_ascii_lowercase().as_str() {
        "source" => Ok(ColumnScope::Source),
        "target" => Ok(ColumnScope::Target),
        "both" | "" => Ok(ColumnScope::Both),
        other => Err(align_error(AlignError::UnknownColumn(other.to_string()))),
    }
}

pub fn parse_export_scope(value: &str) -> Result<ExportScope, JsValue> {
    value.parse::<ExportScope>().map_err(align_error)
}

pub fn parse_direction(value: &str) -> Result<MergeDirection, JsValue> {
    value.parse::<MergeDirection>().map_err(validation_error)
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    crate::wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Convert an operator error to a JsValue
///
/// An empty export is reported as a warning, everything else as an error.
pub fn align_error(err: AlignError) -> JsValue {
    let msg = err.to_string();
    match err {
        AlignError::EmptyExport => crate::wasm_warn!("{}", msg),
        _ => crate::wasm_error!("{}", msg),
    }
    JsValue::from_str(&msg)
}
