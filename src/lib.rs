//! Parallel-Text Alignment Editor WASM Module
//!
//! Core of a browser editor that pairs two parallel texts, source and
//! target, line by line into rows. Either column can be split, merged or
//! edited on its own; the alignment engine keeps the rows paired and row
//! ids stable across those edits.

pub mod errors;
pub mod config;
pub mod models;
pub mod alignment;
pub mod undo;
pub mod formats;
pub mod storage;
pub mod api;

// Re-export commonly used types
pub use config::AlignerConfig;
pub use errors::{AlignError, Result};
pub use models::{Column, EditorState, FlatEntry, Row, SelectionState, ViewSnapshot};
pub use undo::{History, HistoryEntry};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        // A second start (hot reload) finds the logger already set
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    log::info!("Alignment editor WASM module initialized");
}
