//! Tasks and their board status

use serde::{Deserialize, Serialize};

/// Where a task sits in the Scrum flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    ProductBacklog,
    /// Reserved: never routed into a sprint on reload
    SprintBacklog,
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Board columns of the active sprint, left to right
    pub const BOARD: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::ProductBacklog,
        TaskStatus::SprintBacklog,
        TaskStatus::Todo,
        TaskStatus::Doing,
        TaskStatus::Done,
    ];

    /// Wire name, as stored and sent to the task API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductBacklog => "product-backlog",
            Self::SprintBacklog => "sprint-backlog",
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Human label for views
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductBacklog => "Backlog",
            Self::SprintBacklog => "Sprint Backlog",
            Self::Todo => "To Do",
            Self::Doing => "Doing",
            Self::Done => "Done",
        }
    }

    /// True for the three statuses shown on the sprint board
    pub fn is_board(&self) -> bool {
        match self {
            Self::Todo | Self::Doing | Self::Done => true,
            Self::ProductBacklog | Self::SprintBacklog => false,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product-backlog" | "backlog" => Ok(Self::ProductBacklog),
            "sprint-backlog" => Ok(Self::SprintBacklog),
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// A unit of work, unique by `id` across the backlog and every sprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub story_points: u32,
    pub status: TaskStatus,
}

impl Task {
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// A task that has not been created yet; the server assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub story_points: u32,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assignee: String::new(),
            story_points: 1,
            status,
        }
    }
}
