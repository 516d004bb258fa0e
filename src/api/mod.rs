//! Alignment Editor WASM API
//!
//! JavaScript-facing API for the alignment editor. JavaScript owns
//! rendering and input dispatch; every intent is forwarded here and
//! answered with a view snapshot.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization, argument parsing, error conversion
//! - `types`: result shapes returned alongside snapshots
//! - `session`: the session store and all `#[wasm_bindgen]` entry points

pub mod helpers;
pub mod types;
pub mod session;

pub use session::*;
