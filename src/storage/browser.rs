//! `window.localStorage` backed store (wasm32 only at runtime)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

use super::KeyValueStore;
use crate::errors::{AlignError, Result};

/// Browser local storage
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// Open the window's local storage
    pub fn local() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| AlignError::Storage("No window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| storage_error(&e))?
            .ok_or_else(|| AlignError::Storage("localStorage is not available".to_string()))?;
        Ok(Self { storage })
    }
}

/// Map a JS exception to a storage error, singling out quota failures
fn storage_error(err: &JsValue) -> AlignError {
    if let Some(dom) = err.dyn_ref::<DomException>() {
        if dom.name() == "QuotaExceededError" {
            return AlignError::StorageQuotaExceeded;
        }
        return AlignError::Storage(format!("{}: {}", dom.name(), dom.message()));
    }
    AlignError::Storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(|e| storage_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(|e| storage_error(&e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(|e| storage_error(&e))
    }
}
