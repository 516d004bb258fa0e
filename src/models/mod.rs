//! Models module for the alignment editor
//!
//! This module contains the data models shared by the alignment operators,
//! the history stack and the WASM API.

pub mod block_types;
pub mod editor_state;
pub mod ids;
pub mod row;
pub mod selection;

// Re-export commonly used types
pub use block_types::{BlockType, TypeName};
pub use editor_state::{EditorState, ViewSnapshot};
pub use ids::generate_row_id;
pub use row::{Column, FlatEntry, Row};
pub use selection::{ColumnScope, SelectionState};
