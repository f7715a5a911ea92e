//! TaskApi trait definition

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiError, ApiTask, TaskPatch, TaskRequest};

/// The four verbs of the remote task service
///
/// Each call is a single attempt; failures are returned, never retried.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch every task the server knows
    async fn list_tasks(&self) -> Result<Vec<ApiTask>, ApiError>;

    /// Create a task; the server assigns its id
    async fn create_task(&self, task: &TaskRequest) -> Result<Value, ApiError>;

    /// Update the given fields of a task
    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Value, ApiError>;

    async fn delete_task(&self, id: u64) -> Result<(), ApiError>;
}
