//! File formats for the upload and download collaborators
//!
//! - `import`: `.txt` and `.json` column import
//! - `export`: combined and single-column JSON export

pub mod export;
pub mod import;

pub use export::{build_export, export_json, ExportPayload, ExportScope};
pub use import::{import_column, ImportFormat, ImportResult};
