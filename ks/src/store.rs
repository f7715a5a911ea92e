//! Best-effort serializing adapter over a [`Backend`]

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::backend::Backend;

/// Serializes values to JSON and keeps them under a key
///
/// Every failure is logged and swallowed: `save` and `clear` degrade to
/// no-ops, `load` degrades to `None`.
#[derive(Clone)]
pub struct KeyStore {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore").finish_non_exhaustive()
    }
}

impl KeyStore {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Serialize `value` and write it under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "save: failed to serialize value");
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &serialized) {
            warn!(key, error = %e, "save: failed to write value");
            return;
        }
        debug!(key, bytes = serialized.len(), "save: stored");
    }

    /// Read and deserialize the value under `key`
    ///
    /// Missing, corrupt, and unreadable entries all come back as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "load: key absent");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "load: failed to read value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "load: stored value is corrupt");
                None
            }
        }
    }

    /// Raw stored text, for inspection tools
    pub fn load_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "load_raw: failed to read value");
                None
            }
        }
    }

    /// Remove the entry under `key`
    pub fn clear(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!(key, error = %e, "clear: failed to remove value");
        }
    }

    /// Stored keys, empty if the backend cannot be listed
    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            warn!(error = %e, "keys: failed to list store");
            Vec::new()
        })
    }
}
