//! Seed dataset and static reference content

use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{DEFAULT_SPRINT_DAYS, Role, ScrumData, Sprint, Task, TaskStatus};

/// Names offered as assignees
pub const TEAM_MEMBERS: [&str; 2] = ["Robson Calheira", "Lucas Pereira"];

/// A Scrum event shown in the tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ceremony {
    pub name: &'static str,
    pub description: &'static str,
    pub participants: &'static [&'static str],
    pub duration: &'static str,
}

pub const CEREMONIES: [Ceremony; 4] = [
    Ceremony {
        name: "Sprint Planning",
        description: "Meeting at the start of the Sprint to decide what will be delivered and how the work will be done.",
        participants: &["Product Owner", "Scrum Master", "Developers"],
        duration: "Up to 8 hours for a one-month Sprint",
    },
    Ceremony {
        name: "Daily Scrum",
        description: "Daily 15-minute meeting for the team to synchronize.",
        participants: &["Developers", "Scrum Master (facilitator)"],
        duration: "15 minutes",
    },
    Ceremony {
        name: "Sprint Review",
        description: "Demonstration of the product increment at the end of the Sprint.",
        participants: &["Product Owner", "Scrum Master", "Developers", "Stakeholders"],
        duration: "Up to 4 hours for a one-month Sprint",
    },
    Ceremony {
        name: "Sprint Retrospective",
        description: "Reflection on the Sprint to identify process improvements.",
        participants: &["Product Owner", "Scrum Master", "Developers"],
        duration: "Up to 3 hours for a one-month Sprint",
    },
];

fn task(id: &str, title: &str, description: &str, assignee: &str, story_points: u32, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        assignee: assignee.to_string(),
        story_points,
        status,
    }
}

/// Built once per process so every reset yields the same dates
static SEED: LazyLock<ScrumData> = LazyLock::new(build_seed);

/// The dataset used when nothing has been saved yet, and by `reset`
pub fn initial_data() -> ScrumData {
    SEED.clone()
}

fn build_seed() -> ScrumData {
    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();

    ScrumData {
        project_name: "Scrum Example Project".to_string(),
        current_role: Role::Developer,
        show_tutorial: true,
        product_backlog: vec![
            task(
                "task-1",
                "Implement user login",
                "Build the login screen with form validation",
                "Maria Silva",
                5,
                TaskStatus::ProductBacklog,
            ),
            task(
                "task-2",
                "Build profile page",
                "Page showing user information with editing options",
                "",
                3,
                TaskStatus::ProductBacklog,
            ),
            task(
                "task-3",
                "Implement password recovery",
                "Let users recover their password by e-mail",
                "",
                3,
                TaskStatus::ProductBacklog,
            ),
            task(
                "task-4",
                "Payments API integration",
                "Connect to the payment gateway to process transactions",
                "",
                8,
                TaskStatus::ProductBacklog,
            ),
            task(
                "task-5",
                "Main dashboard design",
                "Lay out the main panel with customizable widgets",
                "",
                5,
                TaskStatus::ProductBacklog,
            ),
        ],
        sprints: vec![Sprint {
            id: "sprint-1".to_string(),
            name: "Sprint 1".to_string(),
            goal: "Deliver the basic authentication features".to_string(),
            start_date: now,
            end_date: now + Duration::days(DEFAULT_SPRINT_DAYS),
            is_active: true,
            completed: false,
            daily_notes: BTreeMap::from([(today, "Sprint kickoff. Scope discussion.".to_string())]),
            tasks: vec![
                task(
                    "task-6",
                    "Set up development environment",
                    "Prepare the environment with the required dependencies and tools",
                    "João Pereira",
                    2,
                    TaskStatus::Todo,
                ),
                task(
                    "task-7",
                    "Create reusable button component",
                    "Button component with variants",
                    "Ana Costa",
                    1,
                    TaskStatus::Doing,
                ),
                task(
                    "task-8",
                    "Implement form validation",
                    "Utilities for validating inputs",
                    "Pedro Santos",
                    3,
                    TaskStatus::Done,
                ),
            ],
        }],
    }
}
