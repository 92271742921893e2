//! Restart command implementation.
//!
//! `quizctl restart` bounces the containers, waits for them to settle,
//! then echoes the compose service listing and probes the backend.

use crate::cli::args::RestartArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::exec::{self, CommandOptions};
use crate::sequence::run_plan;
use crate::stack::compose;
use crate::stack::health;
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};
use super::panels;

/// The restart command implementation.
pub struct RestartCommand {
    config: StackConfig,
    args: RestartArgs,
}

impl RestartCommand {
    /// Create a new restart command.
    pub fn new(config: StackConfig, args: RestartArgs) -> Self {
        Self { config, args }
    }

    fn show_service_listing(&self, reporter: &mut dyn Reporter) {
        let argv = compose::ps_argv(&self.config, self.args.prod);
        let options = CommandOptions {
            cwd: Some(self.config.project_root.clone()),
            ..Default::default()
        };
        if let Ok(result) = exec::execute(&argv, &options) {
            if result.success {
                reporter.message("");
                for line in result.combined().lines() {
                    reporter.message(line);
                }
            }
        }
    }
}

impl Command for RestartCommand {
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

        reporter.header("Restarting IntelliQuiz Stack");

        let plan = compose::restart_plan(&self.config, self.args.prod);
        let outcome = run_plan(&plan, reporter);

        if !outcome.halted_early {
            self.show_service_listing(reporter);

            let report = health::probe_http(&self.config.health_url(), health::PROBE_TIMEOUT);
            panels::health_line(reporter, &report);
            panels::backend_panel(reporter, &self.config);
            panels::quick_commands(reporter, self.args.prod);
        }

        Ok(panels::finish_run(reporter, &outcome, "Containers restarted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::ui::RecordingReporter;

    #[test]
    fn missing_compose_file_is_a_precondition_failure() {
        let temp = TempDir::new().unwrap();
        let cmd = RestartCommand::new(StackConfig::new(temp.path()), RestartArgs::default());

        let mut reporter = RecordingReporter::new();
        let result = cmd.execute(&mut reporter).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, PRECONDITION_EXIT);
        assert!(reporter.has_error("Compose file not found"));
    }
}
