//! Raw storage backends
//!
//! Backends are fallible; the best-effort policy lives in [`crate::KeyStore`].

use eyre::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A named-value store holding serialized text
pub trait Backend: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// List stored keys in sorted order
    fn keys(&self) -> Result<Vec<String>>;
}

/// Reject keys that could escape the store directory
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(eyre::eyre!("Invalid key: {:?}", key))
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    /// Open or create a file backend at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(?base_path, "Opened file backend");
        Ok(Self { base_path })
    }

    /// Directory holding the value files
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.{}", key, crate::VALUE_EXTENSION)))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        // Temp file + rename so a crash never leaves a half-written value
        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).context(format!("Failed to create {}", tmp.display()))?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &path).context(format!("Failed to replace {}", path.display()))?;
        debug!(key, bytes = value.len(), "set: wrote value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("Failed to remove {}", path.display())),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().map(|e| e == crate::VALUE_EXTENSION).unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}

/// In-process backend for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.values.lock().map_err(|_| eyre::eyre!("Memory backend lock poisoned"))
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_set_get_remove() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::open(temp.path().join("store")).unwrap();

        assert_eq!(backend.get("scrumData").unwrap(), None);

        backend.set("scrumData", "{\"a\":1}").unwrap();
        assert_eq!(backend.get("scrumData").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(temp.path().join("store").join("scrumData.json").exists());

        backend.remove("scrumData").unwrap();
        assert_eq!(backend.get("scrumData").unwrap(), None);

        // Removing twice is fine
        backend.remove("scrumData").unwrap();
    }

    #[test]
    fn test_file_backend_keys_sorted_and_skip_temp_files() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::open(temp.path()).unwrap();

        backend.set("zeta", "1").unwrap();
        backend.set("alpha", "2").unwrap();
        fs::write(temp.path().join("stray.json.tmp"), "x").unwrap();

        assert_eq!(backend.keys().unwrap(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::open(temp.path()).unwrap();

        assert!(backend.set("../escape", "1").is_err());
        assert!(backend.get("a/b").is_err());
        assert!(backend.remove("").is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("scrumData").is_ok());
        assert!(validate_key("scrum_developers").is_ok());
        assert!(validate_key("v1.2-backup").is_ok());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(backend.keys().unwrap(), vec!["k".to_string()]);
        backend.remove("k").unwrap();
        assert!(backend.keys().unwrap().is_empty());
    }
}
