//! Wire shapes of the remote task API

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::domain::{NewTask, Task, TaskStatus};

/// A task as the server returns it; the id is numeric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTask {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub assignee: String,
    #[serde(deserialize_with = "lenient_points")]
    pub story_points: u32,
    pub status: String,
}

/// Accept any JSON number for story points
///
/// Fractions are rounded and anything below one becomes one, so a single odd
/// record cannot fail the whole task list.
fn lenient_points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    let points = if raw.is_finite() { raw.round().max(1.0) as u32 } else { 1 };
    if f64::from(points) != raw {
        warn!(raw, points, "lenient_points: adjusted story points from server");
    }
    Ok(points)
}

impl ApiTask {
    /// Convert to the local shape
    ///
    /// The status string is trusted as-is; a value outside the known set
    /// cannot be placed anywhere, so the record is dropped with a warning.
    pub fn into_task(self) -> Option<Task> {
        let status = match self.status.parse::<TaskStatus>() {
            Ok(status) => status,
            Err(e) => {
                warn!(id = self.id, error = %e, "into_task: dropping task with unknown status");
                return None;
            }
        };

        Some(Task {
            id: self.id.to_string(),
            title: self.title,
            description: self.description,
            assignee: self.assignee,
            story_points: self.story_points,
            status,
        })
    }
}

/// Body for creating a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub story_points: u32,
    pub status: TaskStatus,
}

impl From<&NewTask> for TaskRequest {
    fn from(task: &NewTask) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            assignee: task.assignee.clone(),
            story_points: task.story_points,
            status: task.status,
        }
    }
}

/// Body for updating a task; absent fields are left unchanged by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl From<&Task> for TaskPatch {
    /// A full patch carrying every field of the task
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            assignee: Some(task.assignee.clone()),
            story_points: Some(task.story_points),
            status: Some(task.status),
        }
    }
}

/// Error body the server sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
