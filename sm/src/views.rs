//! Text views and rendering
//!
//! Renders the board, backlog, sprint plan and tutorial from a ScrumData
//! snapshot. Views never modify state.

use colored::{Color, ColoredString, Colorize};
use std::fmt::Write;
use tracing::trace;

use crate::domain::{Role, ScrumData, Sprint, Task, TaskStatus, seed};

/// Status colors
mod colors {
    use colored::Color;

    pub const BACKLOG: Color = Color::TrueColor { r: 100, g: 149, b: 237 }; // Cornflower blue
    pub const SPRINT_BACKLOG: Color = Color::TrueColor { r: 147, g: 112, b: 219 }; // Medium purple
    pub const TODO: Color = Color::TrueColor { r: 255, g: 215, b: 0 }; // Gold
    pub const DOING: Color = Color::TrueColor { r: 0, g: 191, b: 255 }; // Deep sky blue
    pub const DONE: Color = Color::TrueColor { r: 50, g: 205, b: 50 }; // Lime green
}

/// Get color for a task status
pub fn status_color(status: TaskStatus) -> Color {
    trace!(%status, "status_color: called");
    match status {
        TaskStatus::ProductBacklog => colors::BACKLOG,
        TaskStatus::SprintBacklog => colors::SPRINT_BACKLOG,
        TaskStatus::Todo => colors::TODO,
        TaskStatus::Doing => colors::DOING,
        TaskStatus::Done => colors::DONE,
    }
}

pub fn status_badge(status: TaskStatus) -> ColoredString {
    format!("[{}]", status.label()).color(status_color(status))
}

fn points(n: u32) -> String {
    if n == 1 { "1 point".to_string() } else { format!("{} points", n) }
}

fn date(sprint_date: &chrono::DateTime<chrono::Utc>) -> String {
    sprint_date.format("%d/%m/%Y").to_string()
}

/// One line for a task card
pub fn render_task(task: &Task) -> String {
    let mut line = format!(
        "{} {} {} ({})",
        task.id.dimmed(),
        task.title.bold(),
        status_badge(task.status),
        points(task.story_points)
    );
    if !task.assignee.is_empty() {
        let _ = write!(line, " @{}", task.assignee);
    }
    line
}

/// The active sprint's To Do / Doing / Done columns
pub fn render_board(data: &ScrumData) -> String {
    let Some(sprint) = data.active_sprint() else {
        return "No active sprint. Activate one in sprint planning to see the board.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", sprint.name.cyan().bold(), format!("({})", sprint.goal).dimmed());

    for status in TaskStatus::BOARD {
        let column = data.board_column(status);
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", status.label().color(status_color(status)).bold(), column.len());
        if column.is_empty() {
            let _ = writeln!(out, "  {}", "empty".dimmed());
        }
        for task in column {
            let _ = writeln!(out, "  {}", render_task(task));
        }
    }
    out
}

pub fn render_backlog(data: &ScrumData) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} tasks, {}",
        "Product Backlog".cyan().bold(),
        data.product_backlog.len(),
        points(data.backlog_points())
    );

    if data.product_backlog.is_empty() {
        let _ = writeln!(out, "  {}", "No tasks in the backlog".dimmed());
    }
    for task in &data.product_backlog {
        let _ = writeln!(out, "  {}", render_task(task));
    }
    out
}

fn render_sprint(out: &mut String, sprint: &Sprint) {
    let marker = if sprint.is_active { "*".green().bold() } else { " ".normal() };
    let goal = if sprint.goal.is_empty() { "No goal set" } else { sprint.goal.as_str() };
    let _ = writeln!(
        out,
        "{} {} {}  {} - {}  {} tasks, {}",
        marker,
        sprint.name.bold(),
        sprint.id.dimmed(),
        date(&sprint.start_date),
        date(&sprint.end_date),
        sprint.tasks.len(),
        points(sprint.story_points())
    );
    let _ = writeln!(out, "    Goal: {}", goal);
    for (day, note) in &sprint.daily_notes {
        let _ = writeln!(out, "    {} {}", day.dimmed(), note);
    }
}

/// Sprint planning: every sprint, active one marked
pub fn render_sprints(data: &ScrumData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Sprint Planning".cyan().bold());
    if data.sprints.is_empty() {
        let _ = writeln!(out, "  {}", "No sprints yet".dimmed());
    }
    for sprint in &data.sprints {
        render_sprint(&mut out, sprint);
    }
    out
}

/// Roles, the current role, and the Scrum ceremonies
pub fn render_tutorial(current: Role) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Scrum Roles".cyan().bold());
    for role in Role::ALL {
        let _ = writeln!(out, "  {}: {}", role.display_name().bold(), role.description());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "You are playing: {}", current.display_name().green().bold());
    let _ = writeln!(out, "Team: {}", seed::TEAM_MEMBERS.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Scrum Ceremonies".cyan().bold());
    for ceremony in seed::CEREMONIES {
        let _ = writeln!(out, "  {} ({})", ceremony.name.bold(), ceremony.duration);
        let _ = writeln!(out, "    {}", ceremony.description);
        let _ = writeln!(out, "    Participants: {}", ceremony.participants.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_board_lists_seed_columns() {
        plain();
        let out = render_board(&seed::initial_data());
        assert!(out.contains("Sprint 1"));
        assert!(out.contains("To Do (1)"));
        assert!(out.contains("Doing (1)"));
        assert!(out.contains("Done (1)"));
        assert!(out.contains("task-7 Create reusable button component [Doing] (1 point) @Ana Costa"));
    }

    #[test]
    fn test_board_without_active_sprint() {
        plain();
        let mut data = seed::initial_data();
        data.sprints[0].is_active = false;
        assert!(render_board(&data).starts_with("No active sprint"));
    }

    #[test]
    fn test_backlog_totals() {
        plain();
        let out = render_backlog(&seed::initial_data());
        assert!(out.contains("5 tasks, 24 points"));
        assert!(out.contains("task-4 Payments API integration [Backlog] (8 points)"));
    }

    #[test]
    fn test_sprints_marks_active_and_goal() {
        plain();
        let mut data = seed::initial_data();
        data.sprints[0].goal.clear();
        let out = render_sprints(&data);
        assert!(out.contains("* Sprint 1 sprint-1"));
        assert!(out.contains("Goal: No goal set"));
        assert!(out.contains("Sprint kickoff"));
    }

    #[test]
    fn test_tutorial_mentions_role_and_ceremonies() {
        plain();
        let out = render_tutorial(Role::ScrumMaster);
        assert!(out.contains("You are playing: Scrum Master"));
        assert!(out.contains("Daily Scrum (15 minutes)"));
        assert!(out.contains("Team: Robson Calheira, Lucas Pereira"));
    }

    #[test]
    fn test_every_status_has_distinct_color() {
        let colors: Vec<_> = TaskStatus::ALL.into_iter().map(status_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
