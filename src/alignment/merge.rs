//! Merge and delete operators on one column's flat array
//!
//! These only touch the array they are given. Merging source rows 3..5
//! leaves target rows 3..5 where they were; reconstruction re-pairs the
//! columns afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::FlatEntry;

/// Which neighbour an adjacent merge folds in
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MergeDirection {
    /// Fold into the previous entry; the previous index survives
    Prev,
    /// Fold the next entry in; the current index survives
    Next,
}

impl fmt::Display for MergeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeDirection::Prev => f.write_str("previous"),
            MergeDirection::Next => f.write_str("next"),
        }
    }
}

impl std::str::FromStr for MergeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prev" | "previous" | "up" => Ok(MergeDirection::Prev),
            "next" | "down" => Ok(MergeDirection::Next),
            other => Err(format!("Unknown merge direction: {}", other)),
        }
    }
}

/// Union of tag lists, deduplicated, in first-seen order
pub fn union_tags<'a>(lists: impl IntoIterator<Item = &'a [String]>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for list in lists {
        for tag in list {
            if !out.contains(tag) {
                out.push(tag.clone());
            }
        }
    }
    out
}

/// Fold entries into one: space-joined non-blank text, tag union, and the
/// first entry's type metadata
pub fn merge_group(group: &[&FlatEntry]) -> FlatEntry {
    let text = group
        .iter()
        .map(|e| e.text.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let tags = union_tags(group.iter().map(|e| e.tags_or_empty()));
    let first = group.first();
    FlatEntry {
        text,
        tags: Some(tags),
        kind: first.and_then(|e| e.kind.clone()),
        type_name: first.and_then(|e| e.type_name.clone()),
    }
}

/// Merge the entries at `indices` into the position of the smallest one
///
/// Out-of-range and duplicate indices are ignored. Returns the surviving
/// index, or `None` when fewer than two valid indices remain.
pub fn merge_entries(entries: &mut Vec<FlatEntry>, indices: &[usize]) -> Option<usize> {
    let selected: BTreeSet<usize> = indices.iter().copied().filter(|&i| i < entries.len()).collect();
    if selected.len() < 2 {
        return None;
    }

    let first = *selected.iter().next()?;
    let group: Vec<&FlatEntry> = selected.iter().map(|&i| &entries[i]).collect();
    let merged = merge_group(&group);

    for &i in selected.iter().rev() {
        if i != first {
            entries.remove(i);
        }
    }
    entries[first] = merged;
    log::debug!("merge_entries: merged {} entries into index {}", selected.len(), first);
    Some(first)
}

/// Merge the entry at `index` with its neighbour
///
/// Returns the surviving index, or `None` when the neighbour is missing.
pub fn merge_adjacent(entries: &mut Vec<FlatEntry>, index: usize, direction: MergeDirection) -> Option<usize> {
    if index >= entries.len() {
        return None;
    }
    let (keep, consumed) = match direction {
        MergeDirection::Prev => (index.checked_sub(1)?, index),
        MergeDirection::Next => {
            if index + 1 >= entries.len() {
                return None;
            }
            (index, index + 1)
        }
    };
    let merged = merge_group(&[&entries[keep], &entries[consumed]]);
    entries.remove(consumed);
    entries[keep] = merged;
    Some(keep)
}

/// Remove the entries at `indices`; later entries shift up
///
/// Returns the number of entries removed.
pub fn delete_entries(entries: &mut Vec<FlatEntry>, indices: &[usize]) -> usize {
    let selected: BTreeSet<usize> = indices.iter().copied().filter(|&i| i < entries.len()).collect();
    for &i in selected.iter().rev() {
        entries.remove(i);
    }
    selected.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, tags: &[&str]) -> FlatEntry {
        FlatEntry {
            text: text.to_string(),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            kind: None,
            type_name: None,
        }
    }

    #[test]
    fn test_merge_joins_non_blank_text_and_unions_tags() {
        let mut entries = vec![
            entry("zero", &[]),
            FlatEntry {
                kind: Some("h1".to_string()),
                type_name: Some("title".to_string()),
                ..entry("one", &["a"])
            },
            entry("  ", &["b"]),
            entry("three", &["a", "c"]),
        ];
        let kept = merge_entries(&mut entries, &[3, 1, 2]);
        assert_eq!(kept, Some(1));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "one three");
        assert_eq!(entries[1].tags_or_empty(), ["a", "b", "c"].map(String::from));
        assert_eq!(entries[1].kind.as_deref(), Some("h1"));
        assert_eq!(entries[1].type_name.as_deref(), Some("title"));
    }

    #[test]
    fn test_merge_needs_two_valid_indices() {
        let mut entries = vec![entry("a", &[]), entry("b", &[])];
        assert_eq!(merge_entries(&mut entries, &[1, 7]), None);
        assert_eq!(merge_entries(&mut entries, &[0, 0]), None);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_merge_non_contiguous() {
        let mut entries = vec![entry("a", &[]), entry("b", &[]), entry("c", &[]), entry("d", &[])];
        merge_entries(&mut entries, &[0, 2]);
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a c", "b", "d"]);
    }

    #[test]
    fn test_adjacent_prev_keeps_previous_index() {
        let mut entries = vec![entry("a", &["x"]), entry("b", &["y"]), entry("c", &[])];
        assert_eq!(merge_adjacent(&mut entries, 1, MergeDirection::Prev), Some(0));
        assert_eq!(entries[0].text, "a b");
        assert_eq!(entries[0].tags_or_empty(), ["x", "y"].map(String::from));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_adjacent_next_keeps_current_index() {
        let mut entries = vec![entry("a", &[]), entry("b", &[]), entry("c", &[])];
        assert_eq!(merge_adjacent(&mut entries, 1, MergeDirection::Next), Some(1));
        assert_eq!(entries[1].text, "b c");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_adjacent_at_edges_is_rejected() {
        let mut entries = vec![entry("a", &[]), entry("b", &[])];
        assert_eq!(merge_adjacent(&mut entries, 0, MergeDirection::Prev), None);
        assert_eq!(merge_adjacent(&mut entries, 1, MergeDirection::Next), None);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_delete_entries_shifts_up() {
        let mut entries = vec![entry("a", &[]), entry("b", &[]), entry("c", &[])];
        assert_eq!(delete_entries(&mut entries, &[0, 2, 9]), 2);
        assert_eq!(entries, vec![entry("b", &[])]);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("prev".parse::<MergeDirection>(), Ok(MergeDirection::Prev));
        assert_eq!("Next".parse::<MergeDirection>(), Ok(MergeDirection::Next));
        assert!("sideways".parse::<MergeDirection>().is_err());
    }
}
