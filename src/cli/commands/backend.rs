//! Backend command implementation.
//!
//! `quizctl backend` builds the Spring Boot backend with the host Maven
//! and runs the packaged jar in the foreground. `--clean-only` and
//! `--compile-only` stop the workflow earlier.

use crate::cli::args::BackendArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::exec::{self, CommandOptions};
use crate::sequence::run_plan;
use crate::stack::backend::{self, BackendOptions};
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandResult, PRECONDITION_EXIT};
use super::panels;

/// The backend command implementation.
pub struct BackendCommand {
    config: StackConfig,
    args: BackendArgs,
}

impl BackendCommand {
    /// Create a new backend command.
    pub fn new(config: StackConfig, args: BackendArgs) -> Self {
        Self { config, args }
    }

    fn run_jar(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let jar = match backend::find_runnable_jar(&self.config.target_path()) {
            Ok(jar) => jar,
            Err(e) => {
                reporter.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        reporter.success("JAR file ready");
        reporter.key_value("Location", &jar.display().to_string());

        if self.args.compile_only {
            return Ok(CommandResult::success());
        }

        reporter.info("Starting backend (Ctrl+C to stop)");
        let step = backend::run_step(&self.config, &jar);
        let options = CommandOptions {
            cwd: step.cwd.clone(),
            ..CommandOptions::inherited()
        };
        exec::execute_interactive(&step.command, &options)?;

        reporter.message("Backend stopped");
        Ok(CommandResult::success())
    }
}

impl Command for BackendCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let pom = self.config.pom_path();
        if !pom.exists() {
            reporter.error(&format!("Backend project not found: {}", pom.display()));
            return Ok(CommandResult::failure(PRECONDITION_EXIT));
        }

        reporter.header("IntelliQuiz Backend Build");

        let plan = if self.args.clean_only {
            backend::clean_plan(&self.config)
        } else {
            let options = BackendOptions {
                run_tests: self.args.run_tests,
                offline: self.args.offline,
            };
            backend::build_plan(&self.config, &options)
        };

        let outcome = run_plan(&plan, reporter);

        if outcome.halted_at().map(|failed| failed.name.as_str()) == Some("check-maven") {
            reporter.message(backend::maven_install_hint());
        }

        if !outcome.success() {
            return Ok(panels::finish_run(reporter, &outcome, "Build complete"));
        }

        if self.args.clean_only {
            reporter.success("Build outputs removed");
            return Ok(CommandResult::success());
        }

        self.run_jar(reporter)
    }
}
