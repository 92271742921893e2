//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands
//!
//! Dispatch resolves the stack configuration once, so every command sees
//! the same layered view (defaults, then `.env.local`, then process env,
//! then global flags).

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::config::StackConfig;
use crate::error::Result;
use crate::ui::Reporter;

/// Exit code for precondition and configuration failures, as opposed to
/// steps that ran and failed.
pub const PRECONDITION_EXIT: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, reporting progress through `reporter`.
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn load_config(&self, cli: &Cli) -> Result<StackConfig> {
        let mut config = StackConfig::load(&self.project_root)?;
        if let Some(file) = &cli.compose_file {
            config.compose_file = file.clone();
        }
        Ok(config)
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. Without a subcommand, `status` runs.
    pub fn dispatch(&self, cli: &Cli, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let config = match self.load_config(cli) {
            Ok(config) => config,
            Err(e) => {
                reporter.error(&e.to_string());
                return Ok(CommandResult::failure(PRECONDITION_EXIT));
            }
        };

        match &cli.command {
            Some(Commands::Up(args)) => {
                super::up::UpCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Prod(args)) => {
                super::prod::ProdCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Down(args)) => {
                super::down::DownCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Restart(args)) => {
                super::restart::RestartCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Logs(args)) => {
                super::logs::LogsCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Publish(args)) => {
                super::publish::PublishCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Backend(args)) => {
                super::backend::BackendCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Db(args)) => {
                super::db::DbCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(config, args.clone()).execute(reporter)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(reporter)
            }
            None => {
                super::status::StatusCommand::new(config, StatusArgs::default()).execute(reporter)
            }
        }
    }
}
