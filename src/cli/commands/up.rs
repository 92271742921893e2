//! Up command implementation.
//!
//! `quizctl up` builds and starts the development stack with Docker
//! Compose, waits for the services, then shows the access panels.

use crate::cli::args::UpArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::exec::{self, CommandOptions};
use crate::sequence::run_plan;
use crate::stack::compose::{self, UpOptions};
use crate::stack::health;
use crate::ui::{can_prompt, confirm, Reporter};

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};
use super::panels;

/// The up command implementation.
pub struct UpCommand {
    config: StackConfig,
    args: UpArgs,
}

impl UpCommand {
    /// Create a new up command.
    pub fn new(config: StackConfig, args: UpArgs) -> Self {
        Self { config, args }
    }

    fn should_follow_logs(&self, reporter: &mut dyn Reporter) -> bool {
        if self.args.logs {
            return true;
        }
        if !reporter.output_mode().shows_status() || !can_prompt() {
            return false;
        }
        confirm("Follow container logs now?", false).unwrap_or(false)
    }
}

impl Command for UpCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let compose_file = self.config.compose_path();
        if !compose_file.exists() {
            reporter.error(&format!("Compose file not found: {}", compose_file.display()));
            return Ok(CommandResult::failure(PRECONDITION_EXIT));
        }
        let dockerfile = self.config.dockerfile_path();
        if !dockerfile.exists() {
            reporter.error(&format!("Backend Dockerfile not found: {}", dockerfile.display()));
            return Ok(CommandResult::failure(PRECONDITION_EXIT));
        }

        reporter.header("IntelliQuiz Docker Setup");

        let options = UpOptions {
            pull: self.args.pull,
            build: !self.args.no_build,
        };
        let plan = compose::up_plan(&self.config, &options);
        let outcome = run_plan(&plan, reporter);

        if !outcome.halted_early {
            let report = health::probe_http(&self.config.health_url(), health::PROBE_TIMEOUT);
            panels::health_line(reporter, &report);

            panels::backend_panel(reporter, &self.config);
            panels::database_panel(reporter, &self.config.compose_database);
            panels::quick_commands(reporter, false);

            if self.should_follow_logs(reporter) {
                reporter.info("Following logs (Ctrl+C to stop)");
                let argv = compose::logs_argv(&self.config, false, None);
                let cwd = CommandOptions {
                    cwd: Some(self.config.project_root.clone()),
                    ..CommandOptions::inherited()
                };
                exec::execute_interactive(&argv, &cwd).ok();
                reporter.message("Stopped following logs");
            }
        }

        Ok(panels::finish_run(reporter, &outcome, "Stack is running"))
    }
}
