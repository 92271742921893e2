//! Down command implementation.
//!
//! `quizctl down` stops the stack. Volumes are left alone; the data in the
//! compose database survives a shutdown.

use crate::cli::args::DownArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::sequence::run_plan;
use crate::stack::compose;
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};
use super::panels;

/// The down command implementation.
pub struct DownCommand {
    config: StackConfig,
    args: DownArgs,
}

impl DownCommand {
    /// Create a new down command.
    pub fn new(config: StackConfig, args: DownArgs) -> Self {
        Self { config, args }
    }

    fn compose_file(&self) -> std::path::PathBuf {
        if self.args.prod {
            self.config.prod_compose_path()
        } else {
            self.config.compose_path()
        }
    }
}

impl Command for DownCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let compose_file = self.compose_file();
        if !compose_file.exists() {
            reporter.error(&format!("Compose file not found: {}", compose_file.display()));
            return Ok(CommandResult::failure(PRECONDITION_EXIT));
        }

        reporter.header("Stopping IntelliQuiz Stack");

        let plan = compose::down_plan(&self.config, self.args.prod);
        let outcome = run_plan(&plan, reporter);

        Ok(panels::finish_run(reporter, &outcome, "Containers stopped"))
    }
}
