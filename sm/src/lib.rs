//! scrumsim - Scrum process simulator
//!
//! Play one of the three Scrum roles against a small project: groom the
//! product backlog, plan sprints, and move cards across the active sprint's
//! board. Tasks live on a remote task API; sprints, role and tutorial state
//! live locally and survive restarts.
//!
//! # Modules
//!
//! - [`domain`] - tasks, sprints, roles and the root aggregate
//! - [`api`] - remote task API trait and HTTP implementation
//! - [`state`] - the ScrumStore actor
//! - [`views`] - text renderings of the board, backlog and sprints
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod state;
pub mod views;

/// Key the whole ScrumData aggregate is stored under
pub const DATA_KEY: &str = "scrumData";

// Re-export commonly used types
pub use api::{ApiError, ApiTask, HttpTaskApi, TaskApi, TaskPatch, TaskRequest};
pub use config::Config;
pub use domain::{NewSprint, NewTask, Role, ScrumData, Sprint, Task, TaskStatus};
pub use state::{ScrumStore, StoreError, StoreResponse};
