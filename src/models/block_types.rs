//! Structural and semantic block labels
//!
//! Rows store these as plain strings so imported files with unknown labels
//! survive a load/save cycle. The enums here cover the labels the editor
//! offers and the defaults it fills in.

use serde::{Deserialize, Serialize};

/// Structural role of a cell (rendered element)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Blockquote,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::H1 => "h1",
            BlockType::H2 => "h2",
            BlockType::H3 => "h3",
            BlockType::H4 => "h4",
            BlockType::H5 => "h5",
            BlockType::H6 => "h6",
            BlockType::P => "p",
            BlockType::Blockquote => "blockquote",
        }
    }

    pub fn all() -> &'static [BlockType] {
        &[
            BlockType::H1,
            BlockType::H2,
            BlockType::H3,
            BlockType::H4,
            BlockType::H5,
            BlockType::H6,
            BlockType::P,
            BlockType::Blockquote,
        ]
    }
}

/// Semantic label of a cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeName {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "subtitle")]
    Subtitle,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "stanza")]
    Stanza,
    #[serde(rename = "commentary")]
    Commentary,
    #[serde(rename = "footnote")]
    Footnote,
    #[serde(rename = "vagga")]
    Vagga,
    #[serde(rename = "sub-vagga")]
    SubVagga,
    #[serde(rename = "nikaya")]
    Nikaya,
    #[serde(rename = "sutta")]
    Sutta,
    #[serde(rename = "samyutta")]
    Samyutta,
    #[serde(rename = "namo-tasa")]
    NamoTasa,
    /// Deliberately empty slot kept for alignment
    #[serde(rename = "(empty)")]
    EmptyPlaceholder,
}

impl TypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Title => "title",
            TypeName::Subtitle => "subtitle",
            TypeName::Paragraph => "paragraph",
            TypeName::Stanza => "stanza",
            TypeName::Commentary => "commentary",
            TypeName::Footnote => "footnote",
            TypeName::Vagga => "vagga",
            TypeName::SubVagga => "sub-vagga",
            TypeName::Nikaya => "nikaya",
            TypeName::Sutta => "sutta",
            TypeName::Samyutta => "samyutta",
            TypeName::NamoTasa => "namo-tasa",
            TypeName::EmptyPlaceholder => "(empty)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }

    pub fn all() -> &'static [TypeName] {
        &[
            TypeName::Title,
            TypeName::Subtitle,
            TypeName::Paragraph,
            TypeName::Stanza,
            TypeName::Commentary,
            TypeName::Footnote,
            TypeName::Vagga,
            TypeName::SubVagga,
            TypeName::Nikaya,
            TypeName::Sutta,
            TypeName::Samyutta,
            TypeName::NamoTasa,
            TypeName::EmptyPlaceholder,
        ]
    }

    /// Whether a stored label marks a deliberate empty slot
    pub fn is_placeholder(label: Option<&str>) -> bool {
        label.and_then(TypeName::parse) == Some(TypeName::EmptyPlaceholder)
    }
}
