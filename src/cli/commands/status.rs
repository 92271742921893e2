//! Status command implementation.
//!
//! `quizctl status` is a read-only snapshot: which tools are installed,
//! whether the compose stack's containers answer, and whether the backend
//! health endpoint responds. It never mutates anything and always exits
//! zero; the findings are the output.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::StatusArgs;
use crate::config::StackConfig;
use crate::detect::{self, ToolVersion};
use crate::error::{QuizctlError, Result};
use crate::exec::{self, CommandOptions};
use crate::stack::compose::{self, ComposeFile};
use crate::stack::health;
use crate::ui::Reporter;

use super::dispatcher::{Command, CommandResult};
use super::panels;

/// The status command implementation.
pub struct StatusCommand {
    config: StackConfig,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(config: StackConfig, args: StatusArgs) -> Self {
        Self { config, args }
    }

    fn compose_path(&self) -> PathBuf {
        if self.args.prod {
            self.config.prod_compose_path()
        } else {
            self.config.compose_path()
        }
    }

    fn probe_tools(&self) -> Vec<ToolVersion> {
        let tools = &self.config.tools;
        vec![
            detect::probe_tool("docker", &tools.docker),
            detect::probe_tool("docker-compose", &tools.compose),
            detect::probe_tool("git", &tools.git),
            detect::probe_tool("mvn", &tools.mvn),
            detect::probe_tool("java", &tools.java),
            detect::probe_tool("psql", &tools.psql),
        ]
    }

    fn backend_container(&self, compose_file: Option<&ComposeFile>) -> String {
        compose_file
            .map(|file| file.backend_container().to_string())
            .unwrap_or_else(|| compose::DEFAULT_BACKEND_CONTAINER.to_string())
    }

    /// Capture the `docker-compose ps` listing, one line per entry.
    ///
    /// Returns `None` when the compose file is absent or the command fails,
    /// so callers can skip the section instead of echoing an error.
    fn compose_listing(&self, compose_path: &Path) -> Option<Vec<String>> {
        if !compose_path.exists() {
            return None;
        }
        let argv = compose::ps_argv(&self.config, self.args.prod);
        let options = CommandOptions {
            cwd: Some(self.config.project_root.clone()),
            ..Default::default()
        };
        match exec::execute(&argv, &options) {
            Ok(result) if result.success => {
                Some(result.combined().lines().map(str::to_string).collect())
            }
            _ => None,
        }
    }

    fn execute_json(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let compose_path = self.compose_path();
        let compose_file = ComposeFile::load(&compose_path).ok();
        let services: Vec<String> = compose_file
            .as_ref()
            .map(|f| f.service_names().iter().map(ToString::to_string).collect())
            .unwrap_or_default();

        let container = health::container_status(
            &self.config,
            &self.backend_container(compose_file.as_ref()),
        );
        let report = health::probe_http(&self.config.health_url(), health::PROBE_TIMEOUT);
        let database_ready =
            compose_path.exists() && health::database_ready(&self.config, &compose_path);

        let snapshot = json!({
            "generated_at": chrono::Local::now().to_rfc3339(),
            "project_root": self.config.project_root.display().to_string(),
            "compose_file": compose_path.display().to_string(),
            "compose_file_present": compose_path.exists(),
            "services": services,
            "containers": self.compose_listing(&compose_path),
            "tools": self.probe_tools(),
            "backend": {
                "container": container,
                "health": report,
            },
            "database_ready": database_ready,
        });

        let rendered = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| QuizctlError::Other(e.into()))?;
        reporter.message(&rendered);
        Ok(CommandResult::success())
    }

    fn execute_human(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let compose_path = self.compose_path();
        let compose_file = ComposeFile::load(&compose_path).ok();

        reporter.header("IntelliQuiz Stack Status");
        reporter.key_value("Project root", &self.config.project_root.display().to_string());
        if compose_path.exists() {
            reporter.key_value("Compose file", &compose_path.display().to_string());
        } else {
            reporter.key_value(
                "Compose file",
                &format!("{} (missing)", compose_path.display()),
            );
        }
        if let Some(file) = &compose_file {
            reporter.key_value("Services", &file.service_names().join(", "));
        }

        if let Some(listing) = self.compose_listing(&compose_path) {
            reporter.message("");
            reporter.message("Containers:");
            for line in &listing {
                reporter.message(line);
            }
        }

        reporter.message("");
        reporter.message("Tools:");
        for tool in self.probe_tools() {
            if tool.available {
                match &tool.version {
                    Some(version) => reporter.success(&format!("{} {}", tool.name, version)),
                    None => reporter.success(&tool.name),
                }
            } else {
                reporter.warning(&format!("{} not found", tool.name));
            }
        }

        reporter.message("");
        reporter.message("Backend:");
        match health::container_status(
            &self.config,
            &self.backend_container(compose_file.as_ref()),
        ) {
            Some(status) => reporter.success(&format!("Container: {}", status)),
            None => reporter.warning("Container is not running"),
        }
        let report = health::probe_http(&self.config.health_url(), health::PROBE_TIMEOUT);
        panels::health_line(reporter, &report);

        reporter.message("");
        reporter.message("Database:");
        if compose_path.exists() && health::database_ready(&self.config, &compose_path) {
            reporter.success("Accepting connections");
        } else {
            reporter.warning("Not answering pg_isready");
        }

        Ok(CommandResult::success())
    }
}

impl Command for StatusCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        if self.args.json {
            self.execute_json(reporter)
        } else {
            self.execute_human(reporter)
        }
    }
}
