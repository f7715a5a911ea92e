//! scrumsim - Scrum process simulator
//!
//! CLI entry point.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use keystore::{FileBackend, KeyStore};
use tracing::{debug, info, warn};

use scrumsim::cli::{Cli, Command, SprintCommand, TaskCommand};
use scrumsim::config::Config;
use scrumsim::domain::{NewSprint, NewTask, Role, TaskStatus};
use scrumsim::state::ScrumStore;
use scrumsim::{HttpTaskApi, views};

fn setup_logging(verbose: bool, log_dir: &Path) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(log_dir.join("scrumsim.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.verbose, &config.log.dir).context("Failed to setup logging")?;

    info!(
        base_url = %config.api.base_url,
        store = %config.storage.path.display(),
        "scrumsim loaded config"
    );

    let api = HttpTaskApi::from_config(&config.api).context("Failed to build task API client")?;
    let backend = FileBackend::open(&config.storage.path).context("Failed to open local store")?;
    let store = ScrumStore::spawn(Arc::new(api), KeyStore::new(backend), config.storage.data_key.clone());

    let result = dispatch(&store, cli.command).await;

    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "main: store shutdown failed");
    }
    result
}

async fn dispatch(store: &ScrumStore, command: Option<Command>) -> Result<()> {
    debug!("dispatch: called");
    match command {
        Some(Command::Board) => {
            debug!("dispatch: matched Board command");
            print!("{}", views::render_board(&store.snapshot()));
            Ok(())
        }
        Some(Command::Backlog) => {
            debug!("dispatch: matched Backlog command");
            print!("{}", views::render_backlog(&store.snapshot()));
            Ok(())
        }
        Some(Command::Sprints) => {
            debug!("dispatch: matched Sprints command");
            print!("{}", views::render_sprints(&store.snapshot()));
            Ok(())
        }
        Some(Command::Tutorial { toggle }) => {
            debug!(toggle, "dispatch: matched Tutorial command");
            cmd_tutorial(store, toggle).await
        }
        Some(Command::Role { role }) => {
            debug!(?role, "dispatch: matched Role command");
            cmd_role(store, role).await
        }
        Some(Command::Sync) => {
            debug!("dispatch: matched Sync command");
            cmd_sync(store).await
        }
        Some(Command::Reset) => {
            debug!("dispatch: matched Reset command");
            store.reset_data().await?;
            println!("{} Restored the example project", "✓".green());
            Ok(())
        }
        Some(Command::Task { command }) => {
            debug!("dispatch: matched Task command");
            cmd_task(store, command).await
        }
        Some(Command::Sprint { command }) => {
            debug!("dispatch: matched Sprint command");
            cmd_sprint(store, command).await
        }
        None => {
            debug!("dispatch: no command specified, showing start screen");
            cmd_start(store).await
        }
    }
}

/// Refuse an action the current role may not perform
fn require(allowed: bool, role: Role, action: &str) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        debug!(%role, %action, "require: refused");
        Err(eyre!("{} cannot {}", role.display_name(), action))
    }
}

/// Sync with the task API, then show the tutorial or the board
async fn cmd_start(store: &ScrumStore) -> Result<()> {
    debug!("cmd_start: called");
    if let Err(e) = store.load_tasks_from_api().await {
        warn!(error = %e, "cmd_start: initial sync failed");
        eprintln!("{} Could not reach the task API: {}", "✗".red(), e);
    }

    let data = store.snapshot();
    if data.show_tutorial {
        print!("{}", views::render_tutorial(data.current_role));
        println!();
        println!("{}", "Hide this with: scrum tutorial --toggle".dimmed());
    } else {
        print!("{}", views::render_board(&data));
    }
    Ok(())
}

async fn cmd_tutorial(store: &ScrumStore, toggle: bool) -> Result<()> {
    debug!(toggle, "cmd_tutorial: called");
    if toggle {
        let shown = store.toggle_tutorial().await?;
        let state = if shown { "shown" } else { "hidden" };
        println!("{} Tutorial will be {} on start", "✓".green(), state);
        return Ok(());
    }
    print!("{}", views::render_tutorial(store.current_role()));
    Ok(())
}

async fn cmd_role(store: &ScrumStore, role: Option<Role>) -> Result<()> {
    debug!(?role, "cmd_role: called");
    match role {
        Some(role) => {
            store.set_current_role(role).await?;
            println!("{} You are now playing {}", "✓".green(), role.display_name().bold());
        }
        None => {
            let current = store.current_role();
            println!("{} ({})", current.display_name().bold(), current);
        }
    }
    Ok(())
}

async fn cmd_sync(store: &ScrumStore) -> Result<()> {
    debug!("cmd_sync: called");
    store
        .load_tasks_from_api()
        .await
        .context("Failed to load tasks from the task API")?;

    let data = store.snapshot();
    let board = data.active_sprint().map(|s| s.tasks.len()).unwrap_or(0);
    println!(
        "{} Synced {} backlog tasks and {} board tasks",
        "✓".green(),
        data.product_backlog.len(),
        board
    );
    Ok(())
}

async fn cmd_task(store: &ScrumStore, command: TaskCommand) -> Result<()> {
    debug!("cmd_task: called");
    let data = store.snapshot();
    let role = data.current_role;

    match command {
        TaskCommand::Add {
            title,
            description,
            assignee,
            points,
            status,
        } => {
            debug!(%title, %status, "cmd_task: matched Add");
            let allowed = match status {
                TaskStatus::ProductBacklog => role.can_manage_backlog(),
                TaskStatus::SprintBacklog => role.can_manage_sprints(),
                TaskStatus::Todo | TaskStatus::Doing | TaskStatus::Done => {
                    role.can_add_board_tasks(data.active_sprint().is_some())
                }
            };
            require(allowed, role, &format!("add tasks to {}", status.label()))?;

            let task = NewTask {
                description,
                assignee,
                story_points: points,
                ..NewTask::new(title.clone(), status)
            };
            store.add_task(task).await.context("Failed to add task")?;
            println!("{} Added {}", "✓".green(), title.bold());
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            assignee,
            points,
        } => {
            debug!(%id, "cmd_task: matched Edit");
            let mut task = data
                .find_task(&id)
                .cloned()
                .ok_or_else(|| eyre!("No task with id {}", id))?;
            require(role.can_edit_task(task.status), role, "edit this task")?;

            if let Some(title) = title {
                task.title = title;
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(assignee) = assignee {
                task.assignee = assignee;
            }
            if let Some(points) = points {
                task.story_points = points;
            }
            store.update_task(task).await.context("Failed to update task")?;
            println!("{} Updated {}", "✓".green(), id);
        }
        TaskCommand::Move { id, status, sprint } => {
            debug!(%id, %status, ?sprint, "cmd_task: matched Move");
            if let Some(task) = data.find_task(&id) {
                require(
                    role.can_edit_task(task.status) && role.can_edit_task(status),
                    role,
                    &format!("move tasks to {}", status.label()),
                )?;
            }
            let moved = store
                .move_task(&id, status, sprint.as_deref())
                .await
                .context("Failed to move task")?;
            if !moved {
                return Err(eyre!("No task with id {}", id));
            }
            println!("{} Moved {} to {}", "✓".green(), id, status.label().color(views::status_color(status)));
        }
        TaskCommand::Rm { id } => {
            debug!(%id, "cmd_task: matched Rm");
            let task = data.find_task(&id).ok_or_else(|| eyre!("No task with id {}", id))?;
            require(role.can_edit_task(task.status), role, "delete this task")?;

            store.delete_task(&id).await.context("Failed to delete task")?;
            println!("{} Deleted {}", "✓".green(), id);
        }
    }
    Ok(())
}

async fn cmd_sprint(store: &ScrumStore, command: SprintCommand) -> Result<()> {
    debug!("cmd_sprint: called");
    let data = store.snapshot();
    let role = data.current_role;

    match command {
        SprintCommand::Add {
            name,
            goal,
            days,
            inactive,
        } => {
            debug!(%name, days, inactive, "cmd_sprint: matched Add");
            require(role.can_manage_sprints(), role, "plan sprints")?;

            let mut sprint = NewSprint::starting_now(name.clone(), goal, !inactive);
            sprint.end_date = sprint.start_date + chrono::Duration::days(days);
            let id = store.add_sprint(sprint).await?;
            println!("{} Created {} ({})", "✓".green(), name.bold(), id.dimmed());
        }
        SprintCommand::Activate { id } => {
            debug!(%id, "cmd_sprint: matched Activate");
            require(role.can_manage_sprints(), role, "start sprints")?;

            let mut sprint = data.sprint(&id).cloned().ok_or_else(|| eyre!("No sprint with id {}", id))?;
            sprint.is_active = true;
            store.update_sprint(sprint).await?;
            println!("{} {} is now the active sprint", "✓".green(), id);
        }
        SprintCommand::Rm { id } => {
            debug!(%id, "cmd_sprint: matched Rm");
            require(role.can_manage_sprints(), role, "delete sprints")?;

            let moved = store
                .delete_sprint(&id)
                .await?
                .ok_or_else(|| eyre!("No sprint with id {}", id))?;
            println!("{} Deleted {}, {} tasks returned to the backlog", "✓".green(), id, moved);
        }
        SprintCommand::Note { id, note } => {
            debug!(%id, "cmd_sprint: matched Note");
            let today = chrono::Utc::now().date_naive();
            if !store.add_daily_note(&id, today, note).await? {
                return Err(eyre!("No sprint with id {}", id));
            }
            println!("{} Noted for {}", "✓".green(), today);
        }
    }
    Ok(())
}
