//! Flat arrays → document, preserving row identity
//!
//! Row *i* of the result pairs `source[i]` with `target[i]`; the shorter
//! array is padded with empty slots. Identity is positional: the row keeps
//! the id of the prior row at the same index when at least one side's text
//! is unchanged, and gets a fresh id when both sides changed.

use crate::models::{generate_row_id, Column, FlatEntry, Row};

/// Whether the prior row at this index may lend its id to the new row
pub fn keeps_identity(prior: &Row, source: Option<&FlatEntry>, target: Option<&FlatEntry>) -> bool {
    let source_text = source.map_or("", |e| e.text.as_str());
    let target_text = target.map_or("", |e| e.text.as_str());
    prior.source_text == source_text || prior.target_text == target_text
}

/// Rebuild paired rows from two per-column arrays
///
/// `prior` is the document the arrays were derived from, if any. Type
/// metadata is copied exactly as found in the entries.
pub fn reconstruct(source: &[FlatEntry], target: &[FlatEntry], prior: Option<&[Row]>) -> Vec<Row> {
    let len = source.len().max(target.len());
    let mut rows = Vec::with_capacity(len);
    let mut reused = 0usize;

    for i in 0..len {
        let source_item = source.get(i);
        let target_item = target.get(i);

        let id = match prior.and_then(|p| p.get(i)) {
            Some(old) if keeps_identity(old, source_item, target_item) => {
                reused += 1;
                old.id.clone()
            }
            _ => generate_row_id(),
        };

        let mut row = Row::new(id);
        row.set_cell(Column::Source, source_item.unwrap_or(&FlatEntry::empty()));
        row.set_cell(Column::Target, target_item.unwrap_or(&FlatEntry::empty()));
        rows.push(row);
    }

    log::debug!(
        "reconstruct: source={} target={} rows={} reused_ids={}",
        source.len(),
        target.len(),
        len,
        reused
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::projection::to_column_arrays;

    fn doc() -> Vec<Row> {
        vec![Row::with_text("a", "s0", "t0"), Row::with_text("b", "s1", "t1")]
    }

    #[test]
    fn test_length_is_max_of_arrays() {
        let source = vec![FlatEntry::text("x"), FlatEntry::text("y"), FlatEntry::text("z")];
        let target = vec![FlatEntry::text("1")];
        let rows = reconstruct(&source, &target, None);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].source_text, "z");
        assert_eq!(rows[2].target_text, "");
        assert!(rows[2].target_tags.is_empty());
        assert!(rows[2].target_type.is_none());
    }

    #[test]
    fn test_id_kept_when_one_side_matches() {
        let prior = doc();
        let mut arrays = to_column_arrays(&prior);
        arrays.target[0].text = "changed".to_string();
        let rows = reconstruct(&arrays.source, &arrays.target, Some(&prior));
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[1].id, "b");
    }

    #[test]
    fn test_new_id_when_both_sides_change() {
        let prior = doc();
        let mut arrays = to_column_arrays(&prior);
        arrays.source[1].text = "new s".to_string();
        arrays.target[1].text = "new t".to_string();
        let rows = reconstruct(&arrays.source, &arrays.target, Some(&prior));
        assert_eq!(rows[0].id, "a");
        assert_ne!(rows[1].id, "b");
    }

    #[test]
    fn test_without_prior_every_id_is_fresh() {
        let prior = doc();
        let arrays = to_column_arrays(&prior);
        let rows = reconstruct(&arrays.source, &arrays.target, None);
        assert!(rows.iter().all(|r| r.id != "a" && r.id != "b"));
    }

    #[test]
    fn test_missing_entry_compares_as_empty_text() {
        let prior = vec![Row::with_text("a", "", "gone")];
        let source: Vec<FlatEntry> = vec![];
        let target = vec![FlatEntry::text("other")];
        let rows = reconstruct(&source, &target, Some(&prior));
        assert_eq!(rows[0].id, "a");
    }
}
