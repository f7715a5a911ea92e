//! ScrumData - the root aggregate and its state transitions
//!
//! Every mutation the store performs is a method here, so the rules can be
//! tested without a runtime. The store applies them to its owned copy and
//! publishes the result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Role, Sprint, Task, TaskStatus};

/// Everything the simulator persists, saved and restored as one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrumData {
    pub project_name: String,
    pub product_backlog: Vec<Task>,
    pub sprints: Vec<Sprint>,
    pub current_role: Role,
    pub show_tutorial: bool,
}

impl ScrumData {
    /// An empty project with no tasks or sprints
    pub fn empty(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            product_backlog: Vec::new(),
            sprints: Vec::new(),
            current_role: Role::default(),
            show_tutorial: true,
        }
    }

    pub fn set_role(&mut self, role: Role) {
        self.current_role = role;
    }

    pub fn toggle_tutorial(&mut self) {
        self.show_tutorial = !self.show_tutorial;
    }

    /// Append a sprint; an active one deactivates all existing sprints
    pub fn add_sprint(&mut self, sprint: Sprint) {
        debug!(sprint_id = %sprint.id, is_active = sprint.is_active, "add_sprint: called");
        if sprint.is_active {
            for existing in &mut self.sprints {
                existing.is_active = false;
            }
        }
        self.sprints.push(sprint);
    }

    /// Replace the sprint with the same id
    ///
    /// An active incoming sprint leaves only the sprint with its id active, so
    /// activating an unknown id deactivates every sprint. Returns whether a
    /// sprint was replaced.
    pub fn update_sprint(&mut self, sprint: Sprint) -> bool {
        debug!(sprint_id = %sprint.id, is_active = sprint.is_active, "update_sprint: called");
        if sprint.is_active {
            for existing in &mut self.sprints {
                existing.is_active = false;
            }
        }

        let Some(index) = self.sprints.iter().position(|s| s.id == sprint.id) else {
            debug!("update_sprint: sprint not found");
            return false;
        };
        self.sprints[index] = sprint;
        true
    }

    /// Remove a sprint, returning its tasks to the end of the backlog
    ///
    /// Returns how many tasks moved back, or `None` if the id is unknown.
    pub fn delete_sprint(&mut self, sprint_id: &str) -> Option<usize> {
        debug!(%sprint_id, "delete_sprint: called");
        let index = self.sprints.iter().position(|s| s.id == sprint_id)?;
        let sprint = self.sprints.remove(index);
        let moved = sprint.tasks.len();

        self.product_backlog.extend(
            sprint
                .tasks
                .into_iter()
                .map(|task| task.with_status(TaskStatus::ProductBacklog)),
        );
        Some(moved)
    }

    /// Record a note for a day of a sprint, replacing any earlier note that day
    pub fn add_daily_note(&mut self, sprint_id: &str, date: NaiveDate, note: impl Into<String>) -> bool {
        match self.sprints.iter_mut().find(|s| s.id == sprint_id) {
            Some(sprint) => {
                sprint.daily_notes.insert(date.format("%Y-%m-%d").to_string(), note.into());
                true
            }
            None => false,
        }
    }

    /// Rebuild the partitions from the full remote task list
    ///
    /// The backlog becomes every product-backlog task. The active sprint gets
    /// every board task; every other sprint is left with no tasks. Tasks in
    /// `sprint-backlog` land nowhere.
    pub fn apply_remote_tasks(&mut self, tasks: &[Task]) {
        debug!(task_count = tasks.len(), "apply_remote_tasks: called");
        self.product_backlog = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::ProductBacklog)
            .cloned()
            .collect();

        for sprint in &mut self.sprints {
            sprint.tasks = if sprint.is_active {
                tasks.iter().filter(|t| t.status.is_board()).cloned().collect()
            } else {
                Vec::new()
            };
        }
    }

    /// Look in the backlog first, then each sprint in order
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.product_backlog
            .iter()
            .find(|t| t.id == task_id)
            .or_else(|| self.sprints.iter().flat_map(|s| s.tasks.iter()).find(|t| t.id == task_id))
    }

    pub fn active_sprint(&self) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.is_active)
    }

    pub fn sprint(&self, sprint_id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == sprint_id)
    }

    /// Cards in one board column of the active sprint
    pub fn board_column(&self, status: TaskStatus) -> Vec<&Task> {
        self.active_sprint()
            .map(|s| s.tasks.iter().filter(|t| t.status == status).collect())
            .unwrap_or_default()
    }

    pub fn backlog_points(&self) -> u32 {
        self.product_backlog.iter().map(|t| t.story_points).sum()
    }

    pub fn active_sprint_count(&self) -> usize {
        self.sprints.iter().filter(|s| s.is_active).count()
    }
}
