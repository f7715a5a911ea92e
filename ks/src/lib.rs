//! KeyStore - best-effort JSON key-value store
//!
//! Stands in for the browser's local storage: whole values are serialized to
//! JSON and kept under a name. Reads and writes never fail loudly; the store
//! is a cache, so errors are logged and the caller sees "nothing saved".
//!
//! # Layout
//!
//! ```text
//! store/
//! ├── scrumData.json
//! └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use keystore::{FileBackend, KeyStore};
//!
//! let store = KeyStore::new(FileBackend::open("store")?);
//! store.save("scrumData", &data);
//! let restored: Option<ScrumData> = store.load("scrumData");
//! ```

mod backend;
pub mod cli;
pub mod config;
mod store;

pub use backend::{Backend, FileBackend, MemoryBackend, validate_key};
pub use store::KeyStore;

/// File extension used for stored values
pub const VALUE_EXTENSION: &str = "json";
