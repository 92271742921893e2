//! Db command implementation.
//!
//! `quizctl db` provisions the host PostgreSQL database: create it, apply
//! the DDL when present, verify the connection, then write `.env.local`
//! and `.env.local.json` for the backend to pick up.

use crate::cli::args::DbArgs;
use crate::config::StackConfig;
use crate::error::Result;
use crate::sequence::{run_plan, SequenceOutcome};
use crate::stack::database;
use crate::ui::{can_prompt, input, Reporter};

use super::dispatcher::{Command, CommandResult};
use super::panels;

/// The db command implementation.
pub struct DbCommand {
    config: StackConfig,
    args: DbArgs,
}

impl DbCommand {
    /// Create a new db command.
    pub fn new(mut config: StackConfig, args: DbArgs) -> Self {
        let db = &mut config.database;
        if let Some(host) = &args.host {
            db.host = host.clone();
        }
        if let Some(port) = args.port {
            db.port = port;
        }
        if let Some(name) = &args.db_name {
            db.name = name.clone();
        }
        if let Some(user) = &args.db_user {
            db.user = user.clone();
        }
        if let Some(password) = &args.db_password {
            db.password = password.clone();
        }
        if let Some(schema) = &args.schema {
            config.schema_file = schema.clone();
        }
        Self { config, args }
    }

    /// Walk the connection settings interactively, current values as
    /// defaults.
    fn prompt_settings(&self, config: &mut StackConfig, reporter: &mut dyn Reporter) -> Result<()> {
        let db = &mut config.database;
        db.host = input("PostgreSQL host", &db.host)?;

        let port = input("PostgreSQL port", &db.port.to_string())?;
        match port.trim().parse::<u16>() {
            Ok(port) => db.port = port,
            Err(_) => reporter.warning(&format!(
                "Ignoring invalid port '{}', keeping {}",
                port, db.port
            )),
        }

        db.name = input("Database name", &db.name)?;
        db.user = input("Database user", &db.user)?;
        db.password = input("Database password", &db.password)?;
        Ok(())
    }

    /// Whether the only failure is the best-effort create step refusing to
    /// recreate an existing database.
    fn only_failure_is_existing_database(outcome: &SequenceOutcome) -> bool {
        let failures = outcome.failures();
        failures.len() == 1
            && failures[0].name == "create-database"
            && failures[0].output.contains("already exists")
    }
}

impl Command for DbCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        reporter.header("IntelliQuiz PostgreSQL Setup");

        let mut config = self.config.clone();
        if !self.args.non_interactive && can_prompt() {
            self.prompt_settings(&mut config, reporter)?;
        }

        let plan = database::db_plan(&config);
        let outcome = run_plan(&plan, reporter);

        if outcome.halted_early {
            if outcome.halted_at().map(|failed| failed.name.as_str()) == Some("check-psql") {
                reporter.message(database::psql_install_hint());
            }
            return Ok(panels::finish_run(reporter, &outcome, "Database ready"));
        }

        let existing_only = Self::only_failure_is_existing_database(&outcome);
        if existing_only {
            reporter.info(&format!(
                "Database '{}' already exists, reusing it",
                config.database.name
            ));
        }

        if let Some(version_line) = outcome
            .results
            .iter()
            .find(|r| r.name == "test-connection")
            .and_then(|r| r.output.lines().map(str::trim).find(|l| !l.is_empty()))
        {
            let version = version_line.split(',').next().unwrap_or(version_line);
            reporter.key_value("PostgreSQL version", version.trim());
        }

        database::save_env_files(&config)?;
        reporter.success(&format!(
            "Saved {} and {}",
            config.env_file_path().display(),
            config.env_json_path().display()
        ));

        panels::database_panel(reporter, &config.database);
        reporter.key_value("URL", &config.database.url());

        if outcome.success() || existing_only {
            reporter.success("Database ready");
            Ok(CommandResult::success())
        } else {
            Ok(panels::finish_run(reporter, &outcome, "Database ready"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Step, StepResult};
    use std::time::Duration;

    fn result_for(name: &str, succeeded: bool, best_effort: bool, output: &str) -> StepResult {
        let mut step = Step::new(name, ["psql"]);
        if best_effort {
            step = step.best_effort();
        }
        if succeeded {
            StepResult::success(&step, output.to_string(), Duration::from_millis(5))
        } else {
            StepResult::failure(
                &step,
                output.to_string(),
                Some(1),
                Duration::from_millis(5),
            )
        }
    }

    #[test]
    fn flags_override_connection_settings() {
        let args = DbArgs {
            host: Some("db.internal".to_string()),
            port: Some(5433),
            db_name: Some("quizdb".to_string()),
            ..Default::default()
        };
        let cmd = DbCommand::new(StackConfig::new("/srv/app"), args);

        assert_eq!(cmd.config.database.host, "db.internal");
        assert_eq!(cmd.config.database.port, 5433);
        assert_eq!(cmd.config.database.name, "quizdb");
        assert_eq!(cmd.config.database.user, "postgres");
    }

    #[test]
    fn schema_flag_overrides_the_ddl_path() {
        let args = DbArgs {
            schema: Some("alt/schema.sql".into()),
            ..Default::default()
        };
        let cmd = DbCommand::new(StackConfig::new("/srv/app"), args);

        assert!(cmd.config.schema_path().ends_with("alt/schema.sql"));
    }

    #[test]
    fn missing_psql_shows_the_install_hint() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = StackConfig::new(temp.path());
        config.tools.psql = vec!["quizctl-missing-psql".to_string()];
        let args = DbArgs {
            non_interactive: true,
            ..Default::default()
        };
        let cmd = DbCommand::new(config, args);

        let mut reporter = crate::ui::RecordingReporter::new();
        let result = cmd.execute(&mut reporter).unwrap();

        assert!(!result.success);
        assert!(reporter.has_line("Install the PostgreSQL client"));
    }

    #[test]
    fn existing_database_is_recognized() {
        let outcome = SequenceOutcome {
            results: vec![
                result_for("check-psql", true, false, "psql (PostgreSQL) 16.4"),
                result_for(
                    "create-database",
                    false,
                    true,
                    "ERROR:  database \"intelliquiz\" already exists",
                ),
                result_for("test-connection", true, false, " PostgreSQL 16.4, compiled"),
            ],
            halted_early: false,
            duration: Duration::from_secs(1),
        };

        assert!(DbCommand::only_failure_is_existing_database(&outcome));
    }

    #[test]
    fn other_create_failures_are_not_masked() {
        let outcome = SequenceOutcome {
            results: vec![result_for(
                "create-database",
                false,
                true,
                "FATAL:  password authentication failed",
            )],
            halted_early: false,
            duration: Duration::from_secs(1),
        };

        assert!(!DbCommand::only_failure_is_existing_database(&outcome));
    }
}
