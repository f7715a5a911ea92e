//! Scrum store messages
//!
//! Commands and responses for the actor pattern.

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::api::ApiError;
use crate::domain::{Role, Sprint, Task};

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task API error: {0}")]
    Api(#[from] ApiError),

    #[error("Task id is not numeric: {0}")]
    InvalidTaskId(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from store operations
pub type StoreResponse<T> = Result<T, StoreError>;

/// Commands sent to the store actor
///
/// Only local mutations go through the actor; remote calls happen on the
/// caller's task and hand their results over with `ApplyRemoteTasks`.
#[derive(Debug)]
pub enum StoreCommand {
    SetRole {
        role: Role,
        reply: oneshot::Sender<()>,
    },
    ToggleTutorial {
        reply: oneshot::Sender<bool>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },

    // Sprint operations
    AddSprint {
        sprint: Sprint,
        reply: oneshot::Sender<()>,
    },
    UpdateSprint {
        sprint: Sprint,
        reply: oneshot::Sender<bool>,
    },
    DeleteSprint {
        sprint_id: String,
        reply: oneshot::Sender<Option<usize>>,
    },
    AddDailyNote {
        sprint_id: String,
        date: NaiveDate,
        note: String,
        reply: oneshot::Sender<bool>,
    },

    // Remote reconciliation
    ApplyRemoteTasks {
        tasks: Vec<Task>,
        reply: oneshot::Sender<()>,
    },

    Shutdown,
}
