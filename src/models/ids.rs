//! Row identifier generation

use uuid::Uuid;

/// Prefix shared by every generated row id
pub const ROW_ID_PREFIX: &str = "row-";

/// Mint a new row identifier
///
/// Ids are random v4 UUIDs, so they never collide with ids minted earlier in
/// the session, including ids that only survive in undo history.
pub fn generate_row_id() -> String {
    format!("{}{}", ROW_ID_PREFIX, Uuid::new_v4().simple())
}
