//! CLI argument definitions.
//!
//! All arguments are declared with clap's derive macros; [`Cli`] is the
//! entry point. Global flags apply to every subcommand.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Quizctl - IntelliQuiz stack operations.
#[derive(Debug, Parser)]
#[command(name = "quizctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Compose file to use for development commands
    #[arg(long, global = true, value_name = "FILE")]
    pub compose_file: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build and start the development stack
    Up(UpArgs),

    /// Pull published images and start the production stack
    Prod(ProdArgs),

    /// Stop the stack
    Down(DownArgs),

    /// Restart the stack
    Restart(RestartArgs),

    /// Follow container logs
    Logs(LogsArgs),

    /// Tag and push the backend image to Docker Hub
    Publish(PublishArgs),

    /// Build and run the backend directly on the host
    Backend(BackendArgs),

    /// Provision the local PostgreSQL database
    Db(DbArgs),

    /// Show stack status (default if no command specified)
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `up` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpArgs {
    /// Pull the latest code with git before starting
    #[arg(long)]
    pub pull: bool,

    /// Start without rebuilding images
    #[arg(long)]
    pub no_build: bool,

    /// Follow container logs once the stack is up
    #[arg(long)]
    pub logs: bool,
}

/// Arguments for the `prod` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProdArgs {
    /// Follow container logs once the stack is up
    #[arg(long)]
    pub logs: bool,
}

/// Arguments for the `down` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DownArgs {
    /// Use the production compose file
    #[arg(long)]
    pub prod: bool,
}

/// Arguments for the `restart` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RestartArgs {
    /// Use the production compose file
    #[arg(long)]
    pub prod: bool,
}

/// Arguments for the `logs` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LogsArgs {
    /// Service to follow (all services when omitted)
    pub service: Option<String>,

    /// Use the production compose file
    #[arg(long)]
    pub prod: bool,
}

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PublishArgs {
    /// Push without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Docker Hub user to push under (overrides the configured user)
    #[arg(long)]
    pub user: Option<String>,

    /// Repository name on the registry (overrides the configured repository)
    #[arg(long)]
    pub repo: Option<String>,

    /// Tag to publish under (overrides the configured tag)
    #[arg(long)]
    pub tag: Option<String>,

    /// Locally built image to push (overrides the configured image)
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the `backend` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BackendArgs {
    /// Only remove previous build outputs
    #[arg(long, conflicts_with = "compile_only")]
    pub clean_only: bool,

    /// Build the jar but do not run it
    #[arg(long)]
    pub compile_only: bool,

    /// Run the test phase while packaging
    #[arg(long)]
    pub run_tests: bool,

    /// Resolve dependencies from the local Maven repository only
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `db` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DbArgs {
    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database port
    #[arg(long)]
    pub port: Option<u16>,

    /// Database name
    #[arg(long)]
    pub db_name: Option<String>,

    /// Database user
    #[arg(long)]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long)]
    pub db_password: Option<String>,

    /// Schema file to apply (overrides the default DDL path)
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Use defaults and flags as-is, never prompt
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Inspect the production compose file
    #[arg(long)]
    pub prod: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
