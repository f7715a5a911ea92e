//! Configuration for keystore
//!
//! Lookup order: `--config PATH`, then `keystore.yml` in the working
//! directory, then `~/.config/keystore/config.yml`, then defaults. The local
//! file wins so a project can point `kv` at its own store.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the store directory
    #[serde(rename = "store-path", default = "default_store_path")]
    pub store_path: PathBuf,
}

/// Shared with scrumsim so both binaries see the same values by default
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrumsim")
        .join("store")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

/// Implicit config locations, most specific first
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("keystore.yml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("keystore").join("config.yml"));
    }
    paths
}

impl Config {
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path);
        }
        Ok(Self::first_existing(&candidate_paths())?.unwrap_or_default())
    }

    /// Load the first candidate that exists; a broken one is an error
    fn first_existing(candidates: &[PathBuf]) -> Result<Option<Self>> {
        match candidates.iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => {
                debug!("first_existing: no config file found");
                Ok(None)
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "from_file: loaded");
        Ok(config)
    }
}
