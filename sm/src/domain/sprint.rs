//! Sprints: time-boxed task containers

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Task;

/// Default sprint length used when no end date is given
pub const DEFAULT_SPRINT_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub is_active: bool,
    pub completed: bool,
    /// Keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub daily_notes: BTreeMap<String, String>,
}

impl Sprint {
    pub fn story_points(&self) -> u32 {
        self.tasks.iter().map(|t| t.story_points).sum()
    }
}

/// A sprint before it has been given an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSprint {
    pub name: String,
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub is_active: bool,
    pub completed: bool,
    #[serde(default)]
    pub daily_notes: BTreeMap<String, String>,
}

impl NewSprint {
    /// An empty sprint starting now and running for the default length
    pub fn starting_now(name: impl Into<String>, goal: impl Into<String>, is_active: bool) -> Self {
        let start_date = Utc::now();
        Self {
            name: name.into(),
            goal: goal.into(),
            start_date,
            end_date: start_date + Duration::days(DEFAULT_SPRINT_DAYS),
            tasks: Vec::new(),
            is_active,
            completed: false,
            daily_notes: BTreeMap::new(),
        }
    }

    pub fn into_sprint(self, id: String) -> Sprint {
        Sprint {
            id,
            name: self.name,
            goal: self.goal,
            start_date: self.start_date,
            end_date: self.end_date,
            tasks: self.tasks,
            is_active: self.is_active,
            completed: self.completed,
            daily_notes: self.daily_notes,
        }
    }
}

/// Fresh client-side sprint id; time-ordered and unique
pub fn new_sprint_id() -> String {
    format!("sprint-{}", uuid::Uuid::now_v7())
}
