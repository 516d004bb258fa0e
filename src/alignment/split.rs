//! Line splitting of a column entry
//!
//! Splitting replaces one entry with one entry per line. Every line is kept,
//! including blank ones: a blank line is a deliberate empty row that holds
//! the alignment of its neighbours.

use crate::config::AlignerConfig;
use crate::models::FlatEntry;

/// Convert CRLF and lone CR line endings to LF
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into lines after normalizing line endings
pub fn split_lines(text: &str) -> Vec<String> {
    normalize_line_breaks(text).split('\n').map(str::to_string).collect()
}

/// Entries that replace `original` when its text is edited to `lines`
///
/// A single line that trims to empty clears the cell entirely. Otherwise
/// each line inherits the original's tags and type metadata, with the
/// configured defaults filling in a missing type or type name.
pub fn replacement_entries(original: Option<&FlatEntry>, lines: &[String], config: &AlignerConfig) -> Vec<FlatEntry> {
    if lines.len() == 1 && lines[0].trim().is_empty() {
        return vec![FlatEntry::empty()];
    }

    let tags = original.and_then(|e| e.tags.clone()).unwrap_or_default();
    let kind = original
        .and_then(|e| e.kind.clone())
        .unwrap_or_else(|| config.default_type.clone());
    let type_name = original
        .and_then(|e| e.type_name.clone())
        .unwrap_or_else(|| config.default_type_name.clone());

    lines
        .iter()
        .map(|line| FlatEntry {
            text: line.clone(),
            tags: Some(tags.clone()),
            kind: Some(kind.clone()),
            type_name: Some(type_name.clone()),
        })
        .collect()
}

/// Splice `text` into `entries` at `index`, one entry per line
///
/// An index past the end pads the array with empty slots first, so the new
/// entries still land at `index`. Returns the number of inserted entries.
pub fn split_entry(entries: &mut Vec<FlatEntry>, index: usize, text: &str, config: &AlignerConfig) -> usize {
    if index >= entries.len() {
        entries.resize(index + 1, FlatEntry::empty());
    }
    let lines = split_lines(text);
    let replacement = replacement_entries(entries.get(index), &lines, config);
    let count = replacement.len();
    entries.splice(index..=index, replacement);
    log::debug!("split_entry: index={} lines={}", index, count);
    count
}
