//! Paired-row data model
//!
//! A `Row` is the unit of alignment: one source-language cell and one
//! target-language cell that are considered translations of each other.
//! Each side carries its own text, tag set and structural metadata; the
//! two sides are edited and tagged independently.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AlignError;

/// One side of the alignment
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Source,
    Target,
}

impl Column {
    /// The sibling column
    pub fn other(self) -> Column {
        match self {
            Column::Source => Column::Target,
            Column::Target => Column::Source,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::Source => "source",
            Column::Target => "target",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source" => Ok(Column::Source),
            "target" => Ok(Column::Target),
            other => Err(AlignError::UnknownColumn(other.to_string())),
        }
    }
}

/// A paired source/target row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Opaque identifier, unique within the document
    pub id: String,

    #[serde(default)]
    pub source_text: String,

    #[serde(default)]
    pub target_text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_tags: Vec<String>,

    /// Structural role (h1..h6, p, blockquote)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,

    /// Semantic label (title, stanza, commentary, ...)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "sourceTypename")]
    pub source_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "targetTypename")]
    pub target_type_name: Option<String>,
}

impl Row {
    /// Create an empty row with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Create a row with text on both sides and no metadata
    pub fn with_text(id: impl Into<String>, source: &str, target: &str) -> Self {
        Self {
            id: id.into(),
            source_text: source.to_string(),
            target_text: target.to_string(),
            ..Default::default()
        }
    }

    pub fn text(&self, column: Column) -> &str {
        match column {
            Column::Source => &self.source_text,
            Column::Target => &self.target_text,
        }
    }

    pub fn tags(&self, column: Column) -> &[String] {
        match column {
            Column::Source => &self.source_tags,
            Column::Target => &self.target_tags,
        }
    }

    pub fn block_type(&self, column: Column) -> Option<&str> {
        match column {
            Column::Source => self.source_type.as_deref(),
            Column::Target => self.target_type.as_deref(),
        }
    }

    pub fn type_name(&self, column: Column) -> Option<&str> {
        match column {
            Column::Source => self.source_type_name.as_deref(),
            Column::Target => self.target_type_name.as_deref(),
        }
    }

    pub fn set_text(&mut self, column: Column, text: impl Into<String>) {
        match column {
            Column::Source => self.source_text = text.into(),
            Column::Target => self.target_text = text.into(),
        }
    }

    pub fn tags_mut(&mut self, column: Column) -> &mut Vec<String> {
        match column {
            Column::Source => &mut self.source_tags,
            Column::Target => &mut self.target_tags,
        }
    }

    pub fn set_block_type(&mut self, column: Column, value: Option<String>) {
        match column {
            Column::Source => self.source_type = value,
            Column::Target => self.target_type = value,
        }
    }

    pub fn set_type_name(&mut self, column: Column, value: Option<String>) {
        match column {
            Column::Source => self.source_type_name = value,
            Column::Target => self.target_type_name = value,
        }
    }

    /// Overwrite one column's cell from a flat entry
    pub fn set_cell(&mut self, column: Column, entry: &FlatEntry) {
        self.set_text(column, entry.text.clone());
        *self.tags_mut(column) = entry.tags.clone().unwrap_or_default();
        self.set_block_type(column, entry.kind.clone());
        self.set_type_name(column, entry.type_name.clone());
    }

    /// True when the column holds anything worth projecting as metadata
    pub fn has_content(&self, column: Column) -> bool {
        !self.text(column).is_empty()
            || !self.tags(column).is_empty()
            || self.block_type(column).is_some()
            || self.type_name(column).is_some()
    }
}

/// Per-column working representation used by split/merge/reconstruct
///
/// `tags`, `kind` and `type_name` are optional on purpose: `{ text: "" }`
/// with nothing else is an untyped empty slot, which is not the same thing
/// as an entry that deliberately carries an empty tag set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct FlatEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(rename = "typename", alias = "typeName", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl FlatEntry {
    /// Untyped empty slot
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn tags_or_empty(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Imported files may carry `"text": null`; read it as an empty cell
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_text_reads_as_empty() {
        let entry: FlatEntry = serde_json::from_str(r#"{"text": null, "tags": ["x"]}"#).unwrap();
        assert_eq!(entry.text, "");
        assert_eq!(entry.tags_or_empty(), ["x".to_string()]);

        let entry: FlatEntry = serde_json::from_str(r#"{"type": "h1"}"#).unwrap();
        assert_eq!(entry.text, "");
    }

    #[test]
    fn test_column_parse_and_other() {
        assert_eq!("source".parse::<Column>().unwrap(), Column::Source);
        assert_eq!(" Target ".parse::<Column>().unwrap(), Column::Target);
        assert!("pali".parse::<Column>().is_err());
        assert_eq!(Column::Source.other(), Column::Target);
    }

    #[test]
    fn test_row_serializes_camel_case_and_omits_empty_metadata() {
        let row = Row::with_text("row-1", "a", "b");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sourceText"], "a");
        assert_eq!(json["targetText"], "b");
        assert!(json.get("sourceTags").is_none());
        assert!(json.get("targetTypeName").is_none());
    }

    #[test]
    fn test_set_cell_copies_metadata() {
        let mut row = Row::new("row-1");
        let entry = FlatEntry {
            text: "hello".to_string(),
            tags: Some(vec!["x".to_string()]),
            kind: Some("h1".to_string()),
            type_name: Some("title".to_string()),
        };
        row.set_cell(Column::Target, &entry);
        assert_eq!(row.target_text, "hello");
        assert_eq!(row.target_tags, vec!["x".to_string()]);
        assert_eq!(row.block_type(Column::Target), Some("h1"));
        assert_eq!(row.type_name(Column::Target), Some("title"));
        assert!(!row.has_content(Column::Source));
    }

    #[test]
    fn test_flat_entry_reads_typename_key() {
        let entry: FlatEntry =
            serde_json::from_str(r#"{"text":"t","type":"p","typename":"stanza"}"#).unwrap();
        assert_eq!(entry.kind.as_deref(), Some("p"));
        assert_eq!(entry.type_name.as_deref(), Some("stanza"));
        assert!(entry.tags.is_none());
    }
}
