//! Remote task API client
//!
//! The server is the source of truth for tasks; sprints stay local.

pub mod client;
mod error;
mod http;
mod types;

pub use client::TaskApi;
pub use error::ApiError;
pub use http::HttpTaskApi;
pub use types::{ApiTask, TaskPatch, TaskRequest};
