//! Row alignment engine
//!
//! Keeps the source and target columns paired while either side is split,
//! merged or edited on its own. Every structural operator works the same
//! way: project the document into two flat per-column arrays, mutate one or
//! both arrays, then reconstruct paired rows, reusing row ids wherever a
//! row's content still matches positionally.
//!
//! ## Modules
//!
//! - `projection`: document → per-column arrays
//! - `reconstruct`: per-column arrays → document, identity preserving
//! - `split`: line splitting of a single entry
//! - `merge`: merge/adjacent-merge/delete on a single column array
//! - `edit`: the dual-column edit save
//! - `document_ops`: row-level wrappers (merge, delete, tag) over the above
//! - `trim`: trailing empty row removal

pub mod document_ops;
pub mod edit;
pub mod merge;
pub mod projection;
pub mod reconstruct;
pub mod split;
pub mod trim;

// Re-exports for convenience
pub use document_ops::{apply_tags, delete_content, delete_rows, merge_selected, merge_with_neighbour, TagUpdate};
pub use edit::{apply_edit, EditOutcome, EditRequest};
pub use merge::MergeDirection;
pub use projection::{to_column_arrays, ColumnArrays};
pub use reconstruct::reconstruct;
pub use split::{normalize_line_breaks, split_entry, split_lines};
pub use trim::{row_has_content, trim_trailing_empty_rows};
