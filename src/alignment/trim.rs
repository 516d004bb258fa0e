//! Trailing-empty-row trimming

use crate::models::{Column, Row, TypeName};

/// A row holds something when either column has non-blank text, a tag, or
/// the deliberate `(empty)` placeholder label
pub fn row_has_content(row: &Row) -> bool {
    [Column::Source, Column::Target].into_iter().any(|column| {
        !row.text(column).trim().is_empty()
            || !row.tags(column).is_empty()
            || TypeName::is_placeholder(row.type_name(column))
    })
}

/// Drop fully empty rows from the end of the document
pub fn trim_trailing_empty_rows(mut rows: Vec<Row>) -> Vec<Row> {
    let keep = rows.iter().rposition(row_has_content).map_or(0, |i| i + 1);
    if keep < rows.len() {
        log::debug!("trim: dropping {} trailing empty rows", rows.len() - keep);
        rows.truncate(keep);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_blank_tail() {
        let rows = vec![
            Row::with_text("a", "A", "B"),
            Row::with_text("b", "", ""),
            Row::with_text("c", "  ", ""),
        ];
        let trimmed = trim_trailing_empty_rows(rows);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].id, "a");
    }

    #[test]
    fn test_keeps_interior_blank_rows() {
        let rows = vec![
            Row::with_text("a", "A", ""),
            Row::with_text("b", "", ""),
            Row::with_text("c", "", "C"),
        ];
        assert_eq!(trim_trailing_empty_rows(rows).len(), 3);
    }

    #[test]
    fn test_tags_and_placeholder_count_as_content() {
        let mut tagged = Row::new("t");
        tagged.target_tags = vec!["x".to_string()];
        assert!(row_has_content(&tagged));

        let mut placeholder = Row::new("p");
        placeholder.source_type_name = Some("(empty)".to_string());
        assert!(row_has_content(&placeholder));

        let mut typed_only = Row::new("q");
        typed_only.source_type = Some("p".to_string());
        typed_only.source_type_name = Some("paragraph".to_string());
        assert!(!row_has_content(&typed_only));
    }

    #[test]
    fn test_all_empty_yields_empty_document() {
        let rows = vec![Row::new("a"), Row::new("b")];
        assert!(trim_trailing_empty_rows(rows).is_empty());
    }

    #[test]
    fn test_trim_is_idempotent() {
        let rows = vec![Row::with_text("a", "A", ""), Row::new("b")];
        let once = trim_trailing_empty_rows(rows);
        let twice = trim_trailing_empty_rows(once.clone());
        assert_eq!(once, twice);
    }
}
