//! Command-line surface of the `taskboard` binary.

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::domain::{DataSourceKind, TaskId, UserId};
use crate::settings::TaskboardSettings;

/// Manage tasks and users on a simulated, GraphQL, or REST data source.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version)]
pub struct Cli {
    /// Data source to use: simulated, remote (GraphQL), or rest.
    #[arg(long, global = true, value_name = "SOURCE")]
    pub source: Option<DataSourceKind>,

    /// GraphQL endpoint or REST base URL for remote sources.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<Url>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Overlay `--source` and `--endpoint` on loaded settings.
    pub fn apply_overrides(&self, settings: &mut TaskboardSettings) {
        if let Some(kind) = self.source {
            settings.data_source = Some(kind.as_str().to_owned());
        }
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = Some(endpoint.to_string());
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and edit tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// List and edit users
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Maintain the simulated dataset
    Sample {
        #[command(subcommand)]
        command: SampleCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List every task with its owner
    List,
    /// Create a pending task
    Add {
        title: String,
        /// Owner of the task
        #[arg(long, value_name = "USER_ID")]
        user: Option<UserId>,
    },
    /// Change a task's title, completion, or owner
    Update(TaskUpdateArgs),
    /// Flip a task between pending and completed
    Toggle { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
}

#[derive(Debug, Args)]
pub struct TaskUpdateArgs {
    pub id: TaskId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub completed: Option<bool>,
    /// Assign the task to this user
    #[arg(long, value_name = "USER_ID", conflicts_with = "clear_user")]
    pub user: Option<UserId>,
    /// Remove the task's owner
    #[arg(long)]
    pub clear_user: bool,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List every user
    List,
    /// Create a user
    Add { name: String, email: String },
    /// Change a user's name or email
    Update {
        id: UserId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user; their tasks keep the dangling owner id
    Delete { id: UserId },
    /// Show one user and the tasks they own
    Show { id: UserId },
}

#[derive(Debug, Subcommand)]
pub enum SampleCommand {
    /// Replace simulated data with the sample dataset
    Fill,
    /// Delete all simulated data
    Clear,
}
