//! State management with actor pattern
//!
//! ScrumStore owns the live ScrumData and processes messages via channels;
//! views read snapshots and subscribe to changes.

mod manager;
mod messages;

pub use manager::ScrumStore;
pub use messages::{StoreCommand, StoreError, StoreResponse};
