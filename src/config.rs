//! Editor configuration
//!
//! All fields have defaults, so a partial object (or none at all) is a valid
//! configuration. The JS host passes one to `initSession`; native callers
//! can load it from JSON or YAML.

use serde::{Deserialize, Serialize};

use crate::errors::{AlignError, Result};
use crate::models::block_types::{BlockType, TypeName};

/// Default history capacity
pub const MAX_HISTORY: usize = 50;

/// Keys used for the three persisted blobs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub document: String,
    pub history: String,
    pub history_index: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            document: "bilingual-alignment-data".to_string(),
            history: "bilingual-alignment-history".to_string(),
            history_index: "bilingual-alignment-history-index".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignerConfig {
    /// Maximum number of history snapshots kept
    pub max_history: usize,

    pub storage_keys: StorageKeys,

    /// Structural type given to freshly created cells
    pub default_type: String,

    /// Semantic label given to freshly created cells
    pub default_type_name: String,

    /// Export file names look like `<prefix>-<scope>-<millis>.json`
    pub export_prefix: String,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            storage_keys: StorageKeys::default(),
            default_type: BlockType::P.as_str().to_string(),
            default_type_name: TypeName::Paragraph.as_str().to_string(),
            export_prefix: "bilingual-alignment".to_string(),
        }
    }
}

impl AlignerConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: AlignerConfig = serde_json::from_str(s)?;
        config.validated()
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        let config: AlignerConfig = serde_yaml::from_str(s)?;
        config.validated()
    }

    /// Reject values the editor cannot operate with
    pub fn validated(self) -> Result<Self> {
        if self.max_history == 0 {
            return Err(AlignError::Config("maxHistory must be at least 1".to_string()));
        }
        let keys = &self.storage_keys;
        if keys.document.is_empty() || keys.history.is_empty() || keys.history_index.is_empty() {
            return Err(AlignError::Config("storage keys must not be empty".to_string()));
        }
        if keys.document == keys.history
            || keys.document == keys.history_index
            || keys.history == keys.history_index
        {
            return Err(AlignError::Config("storage keys must be distinct".to_string()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlignerConfig::default();
        assert_eq!(config.max_history, 50);
        assert_eq!(config.default_type, "p");
        assert_eq!(config.default_type_name, "paragraph");
        assert_eq!(config.storage_keys.document, "bilingual-alignment-data");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AlignerConfig::from_json(r#"{"maxHistory": 10}"#).unwrap();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.export_prefix, "bilingual-alignment");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = "maxHistory: 5\nstorageKeys:\n  document: doc\n  history: hist\n  historyIndex: idx\n";
        let config = AlignerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.max_history, 5);
        assert_eq!(config.storage_keys.history_index, "idx");
    }

    #[test]
    fn test_zero_history_rejected() {
        assert!(matches!(
            AlignerConfig::from_json(r#"{"maxHistory": 0}"#),
            Err(AlignError::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_storage_keys_rejected() {
        let json = r#"{"storageKeys": {"document": "a", "history": "a", "historyIndex": "b"}}"#;
        assert!(AlignerConfig::from_json(json).is_err());
    }
}
