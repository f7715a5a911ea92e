//! Domain types for the Scrum simulator
//!
//! - [`Task`] and [`TaskStatus`] - work items and where they sit
//! - [`Sprint`] - time-boxed task containers
//! - [`Role`] - the persona being played, with its permissions
//! - [`ScrumData`] - the persisted root aggregate and its transitions

mod data;
mod role;
pub mod seed;
mod sprint;
mod task;

pub use data::ScrumData;
pub use role::Role;
pub use sprint::{DEFAULT_SPRINT_DAYS, NewSprint, Sprint, new_sprint_id};
pub use task::{NewTask, Task, TaskStatus};
