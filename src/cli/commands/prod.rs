//! Prod command implementation.
//!
//! `quizctl prod` pulls the published images and starts the stack from the
//! production compose file. Nothing is built locally.

use crate::cli::args::ProdArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::exec::{self, CommandOptions};
use crate::sequence::run_plan;
use crate::stack::compose::{self, ComposeFile};
use crate::stack::health;
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};
use super::panels;

/// The prod command implementation.
pub struct ProdCommand {
    config: StackConfig,
    args: ProdArgs,
}

impl ProdCommand {
    /// Create a new prod command.
    pub fn new(config: StackConfig, args: ProdArgs) -> Self {
        Self { config, args }
    }

    fn backend_container(&self) -> String {
        ComposeFile::load(&self.config.prod_compose_path())
            .map(|file| file.backend_container().to_string())
            .unwrap_or_else(|_| compose::DEFAULT_BACKEND_CONTAINER.to_string())
    }
}

impl Command for ProdCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let compose_file = self.config.prod_compose_path();
        if !compose_file.exists() {
            reporter.error(&format!("Compose file not found: {}", compose_file.display()));
            return Ok(CommandResult::failure(PRECONDITION_EXIT));
        }

        reporter.header("IntelliQuiz Production Stack");

        let plan = compose::prod_plan(&self.config);
        let outcome = run_plan(&plan, reporter);

        if !outcome.halted_early {
            match health::container_status(&self.config, &self.backend_container()) {
                Some(status) => reporter.success(&format!("Backend container: {}", status)),
                None => reporter.warning("Backend container is not running"),
            }

            let report = health::probe_http(&self.config.health_url(), health::PROBE_TIMEOUT);
            panels::health_line(reporter, &report);

            panels::backend_panel(reporter, &self.config);
            panels::database_panel(reporter, &self.config.compose_database);
            panels::quick_commands(reporter, true);

            if self.args.logs {
                reporter.info("Following logs (Ctrl+C to stop)");
                let argv = compose::logs_argv(&self.config, true, None);
                let options = CommandOptions {
                    cwd: Some(self.config.project_root.clone()),
                    ..CommandOptions::inherited()
                };
                exec::execute_interactive(&argv, &options).ok();
                reporter.message("Stopped following logs");
            }
        }

        Ok(panels::finish_run(reporter, &outcome, "Production stack is running"))
    }
}
