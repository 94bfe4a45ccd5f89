//! CLI adapter: turns parsed commands into store actions and prints results.
//!
//! Commands run against a [`TaskBoard`]; output goes to any [`Write`] so the
//! behaviour can be exercised without spawning a process. Store failures are
//! read back from the store state and returned as [`CliError::Store`].

mod commands;
mod render;

use std::io::{self, Write};

use thiserror::Error;

pub use commands::{Cli, Command, SampleCommand, TaskCommand, TaskUpdateArgs, UserCommand};

use crate::bootstrap::{MaintenanceError, TaskBoard};
use crate::domain::{NewTask, NewUser, TaskPatch, UserPatch};

/// Failures reported by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store recorded an error for the action.
    #[error("{action} failed: {message}")]
    Store {
        action: &'static str,
        message: String,
    },
    /// The addressed record does not exist on the active data source.
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error(transparent)]
    Maintenance(#[from] MaintenanceError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Execute `command` against `board`, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when the store reports a failure, the record is
/// missing, or output cannot be written.
pub async fn run(board: &TaskBoard, command: Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Tasks { command } => run_tasks(board, command, out).await,
        Command::Users { command } => run_users(board, command, out).await,
        Command::Sample { command } => run_sample(board, command, out).await,
    }
}

async fn run_tasks(
    board: &TaskBoard,
    command: TaskCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let tasks = board.tasks();
    match command {
        TaskCommand::List => {
            board.load().await;
            check_tasks(board, "list tasks")?;
            let users = board.users().snapshot().users;
            let state = tasks.snapshot();
            if state.tasks.is_empty() {
                writeln!(out, "no tasks")?;
            }
            for task in &state.tasks {
                render::write_task(out, task, &users)?;
            }
        }
        TaskCommand::Add { title, user } => {
            let input = match user {
                Some(owner) => NewTask::new(title).owned_by(owner),
                None => NewTask::new(title),
            };
            let Some(task) = tasks.create(input).await else {
                return Err(store_failure("create task", tasks.snapshot().error));
            };
            render::write_task(out, &task, &board.users().snapshot().users)?;
        }
        TaskCommand::Update(args) => {
            let id = args.id;
            let mut patch = TaskPatch::new(id);
            if let Some(title) = args.title {
                patch = patch.title(title);
            }
            if let Some(completed) = args.completed {
                patch = patch.completed(completed);
            }
            if args.clear_user {
                patch = patch.user_id(None);
            } else if let Some(owner) = args.user {
                patch = patch.user_id(Some(owner));
            }
            let task = tasks.update(patch).await;
            check_tasks(board, "update task")?;
            let task = task.ok_or(CliError::NotFound {
                entity: "task",
                id: id.get(),
            })?;
            render::write_task(out, &task, &board.users().snapshot().users)?;
        }
        TaskCommand::Toggle { id } => {
            let task = tasks.toggle_complete(id).await;
            check_tasks(board, "toggle task")?;
            let task = task.ok_or(CliError::NotFound {
                entity: "task",
                id: id.get(),
            })?;
            render::write_task(out, &task, &board.users().snapshot().users)?;
        }
        TaskCommand::Delete { id } => {
            let removed = tasks.delete(id).await;
            check_tasks(board, "delete task")?;
            if !removed {
                return Err(CliError::NotFound {
                    entity: "task",
                    id: id.get(),
                });
            }
            writeln!(out, "deleted task #{id}")?;
        }
    }
    Ok(())
}

async fn run_users(
    board: &TaskBoard,
    command: UserCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let users = board.users();
    match command {
        UserCommand::List => {
            users.fetch_all().await;
            check_users(board, "list users")?;
            let state = users.snapshot();
            if state.users.is_empty() {
                writeln!(out, "no users")?;
            }
            for user in &state.users {
                render::write_user(out, user)?;
            }
        }
        UserCommand::Add { name, email } => {
            let Some(user) = users.create(NewUser::new(name, email)).await else {
                return Err(store_failure("create user", users.snapshot().error));
            };
            render::write_user(out, &user)?;
        }
        UserCommand::Update { id, name, email } => {
            let mut patch = UserPatch::new(id);
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if let Some(email) = email {
                patch = patch.email(email);
            }
            let user = users.update(patch).await;
            check_users(board, "update user")?;
            let user = user.ok_or(CliError::NotFound {
                entity: "user",
                id: id.get(),
            })?;
            render::write_user(out, &user)?;
        }
        UserCommand::Delete { id } => {
            let removed = users.delete(id).await;
            check_users(board, "delete user")?;
            if !removed {
                return Err(CliError::NotFound {
                    entity: "user",
                    id: id.get(),
                });
            }
            writeln!(out, "deleted user #{id}")?;
        }
        UserCommand::Show { id } => {
            board.load().await;
            check_users(board, "load users")?;
            let user = users.select_user(Some(id)).await;
            check_users(board, "show user")?;
            let user = user.ok_or(CliError::NotFound {
                entity: "user",
                id: id.get(),
            })?;
            render::write_user(out, &user)?;
            let all_users = users.snapshot().users;
            for task in board
                .tasks()
                .snapshot()
                .tasks
                .iter()
                .filter(|task| task.user_id == Some(id))
            {
                write!(out, "  ")?;
                render::write_task(out, task, &all_users)?;
            }
        }
    }
    Ok(())
}

async fn run_sample(
    board: &TaskBoard,
    command: SampleCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        SampleCommand::Fill => {
            board.fill_sample_data().await?;
            writeln!(out, "sample data installed")?;
        }
        SampleCommand::Clear => {
            board.clear_simulated_data().await?;
            writeln!(out, "simulated data cleared")?;
        }
    }
    Ok(())
}

fn check_tasks(board: &TaskBoard, action: &'static str) -> Result<(), CliError> {
    match board.tasks().snapshot().error {
        Some(message) => Err(CliError::Store { action, message }),
        None => Ok(()),
    }
}

fn check_users(board: &TaskBoard, action: &'static str) -> Result<(), CliError> {
    match board.users().snapshot().error {
        Some(message) => Err(CliError::Store { action, message }),
        None => Ok(()),
    }
}

fn store_failure(action: &'static str, error: Option<String>) -> CliError {
    CliError::Store {
        action,
        message: error.unwrap_or_else(|| "no result returned".to_owned()),
    }
}
