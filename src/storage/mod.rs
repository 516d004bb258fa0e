//! Persistence of document and history
//!
//! The editor persists three blobs under configurable keys: the document,
//! the history snapshots, and the history pointer. They are written only on
//! an explicit save and read once on load.

pub mod browser;

use std::collections::HashMap;

use crate::config::{AlignerConfig, StorageKeys};
use crate::errors::{AlignError, Result};
use crate::models::Row;
use crate::undo::{History, HistoryEntry};

pub use browser::BrowserStorage;

/// Minimal string key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// Reject writes whose total size would exceed this many bytes
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(AlignError::StorageQuotaExceeded);
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Everything read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSession {
    pub rows: Vec<Row>,
    pub history: History,
}

/// Write document, history and pointer
pub fn save_session<S: KeyValueStore>(store: &mut S, keys: &StorageKeys, rows: &[Row], history: &History) -> Result<()> {
    let entries: Vec<&HistoryEntry> = history.entries().collect();
    store.set(&keys.document, &serde_json::to_string(rows)?)?;
    store.set(&keys.history, &serde_json::to_string(&entries)?)?;
    store.set(&keys.history_index, &history.index().to_string())?;
    log::info!("saved session: rows={} history={}", rows.len(), history.len());
    Ok(())
}

/// Read document, history and pointer; missing keys yield empty values
pub fn load_session<S: KeyValueStore>(store: &S, config: &AlignerConfig) -> Result<PersistedSession> {
    let keys = &config.storage_keys;
    let rows: Vec<Row> = match store.get(&keys.document)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Vec::new(),
    };
    let entries: Vec<HistoryEntry> = match store.get(&keys.history)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Vec::new(),
    };
    let index = match store.get(&keys.history_index)? {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| AlignError::Storage(format!("Invalid history index '{}': {}", raw, e)))?,
        None => -1,
    };
    let history = History::restore(entries, index, config.max_history);
    log::info!("loaded session: rows={} history={}", rows.len(), history.len());
    Ok(PersistedSession { rows, history })
}

/// Remove all three blobs
pub fn clear_session<S: KeyValueStore>(store: &mut S, keys: &StorageKeys) -> Result<()> {
    store.remove(&keys.document)?;
    store.remove(&keys.history)?;
    store.remove(&keys.history_index)?;
    Ok(())
}
