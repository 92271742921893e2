//! Logs command implementation.
//!
//! `quizctl logs` hands the terminal to `docker-compose logs -f` until the
//! operator interrupts it. Detaching is not a failure.

use crate::cli::args::LogsArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::exec::{self, CommandOptions};
use crate::stack::compose;
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};

/// The logs command implementation.
pub struct LogsCommand {
    config: StackConfig,
    args: LogsArgs,
}

impl LogsCommand {
    /// Create a new logs command.
    pub fn new(config: StackConfig, args: LogsArgs) -> Self {
        Self { config, args }
    }
}

impl Command for LogsCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let compose_file = if self.args.prod {
            self.config.prod_compose_path()
        } else {
            self.config.compose_path()
        };
        if !compose_file.exists() {
            reporter.error(&format!("Compose file not found: {}", compose_file.display()));
            return Ok(CommandResult::failure(PRECONDITION_EXIT));
        }

        reporter.info("Following logs (Ctrl+C to stop)");

        let argv = compose::logs_argv(&self.config, self.args.prod, self.args.service.as_deref());
        let options = CommandOptions {
            cwd: Some(self.config.project_root.clone()),
            ..CommandOptions::inherited()
        };
        exec::execute_interactive(&argv, &options)?;

        reporter.message("Stopped following logs");
        Ok(CommandResult::success())
    }
}
