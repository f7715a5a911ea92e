//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Role, TaskStatus};

/// scrumsim - Scrum process simulator
#[derive(Parser)]
#[command(
    name = "scrum",
    about = "Role-play a Scrum team: manage the backlog, plan sprints, move cards",
    version,
    after_help = "Logs are written to: ~/.local/share/scrumsim/logs/scrumsim.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Show the active sprint's board
    Board,

    /// Show the product backlog
    Backlog,

    /// Show all sprints
    Sprints,

    /// Show the Scrum tutorial
    Tutorial {
        /// Flip whether the tutorial is shown on startup
        #[arg(long)]
        toggle: bool,
    },

    /// Show or change the role you are playing
    Role {
        /// product-owner, scrum-master or developer
        role: Option<Role>,
    },

    /// Fetch tasks from the task API
    Sync,

    /// Discard everything and restore the example project
    Reset,

    /// Task operations (go through the task API)
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Sprint operations (local only)
    Sprint {
        #[command(subcommand)]
        command: SprintCommand,
    },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Create a task
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long, default_value = "")]
        assignee: String,

        /// Story points
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        points: u32,

        /// Initial status
        #[arg(short, long, default_value = "product-backlog")]
        status: TaskStatus,
    },

    /// Edit fields of a task
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        assignee: Option<String>,

        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        points: Option<u32>,
    },

    /// Move a task to another status (drag and drop)
    Move {
        id: String,

        status: TaskStatus,

        /// Sprint the card was dropped on
        #[arg(long)]
        sprint: Option<String>,
    },

    /// Delete a task
    Rm { id: String },
}

#[derive(Subcommand)]
pub enum SprintCommand {
    /// Create a sprint
    Add {
        name: String,

        #[arg(short, long, default_value = "")]
        goal: String,

        /// Length in days
        #[arg(long, default_value = "14", value_parser = clap::value_parser!(i64).range(1..))]
        days: i64,

        /// Create without activating it
        #[arg(long)]
        inactive: bool,
    },

    /// Make a sprint the active one
    Activate { id: String },

    /// Delete a sprint, returning its tasks to the backlog
    Rm { id: String },

    /// Record a daily note for today
    Note { id: String, note: String },
}
