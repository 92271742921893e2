//! Shared output panels.
//!
//! The bring-up commands end with the same access panels: where the
//! database listens, where the backend answers, and the follow-up commands
//! an operator reaches for next.

use crate::config::{DatabaseConfig, StackConfig};
use crate::sequence::{format_duration, SequenceOutcome};
use crate::stack::health::{HealthReport, ProbeStatus};
use crate::ui::Reporter;

use super::dispatcher::CommandResult;

/// Render the database access panel.
pub(crate) fn database_panel(reporter: &mut dyn Reporter, db: &DatabaseConfig) {
    reporter.message("");
    reporter.message("Database access:");
    reporter.key_value("Host", &db.host);
    reporter.key_value("Port", &db.port.to_string());
    reporter.key_value("Username", &db.user);
    reporter.key_value("Password", &db.password);
    reporter.key_value("Database", &db.name);
}

/// Render the backend endpoint panel.
pub(crate) fn backend_panel(reporter: &mut dyn Reporter, config: &StackConfig) {
    reporter.message("");
    reporter.message("Backend endpoints:");
    reporter.key_value("Base URL", &config.backend_url());
    reporter.key_value("Health check", &config.health_url());
    reporter.key_value("Swagger", &format!("{}/swagger-ui.html", config.backend_url()));
}

/// Render the quick-command reminders.
pub(crate) fn quick_commands(reporter: &mut dyn Reporter, prod: bool) {
    let prod_flag = if prod { " --prod" } else { "" };
    reporter.message("");
    reporter.message("Quick commands:");
    reporter.key_value("View logs", &format!("quizctl logs{}", prod_flag));
    reporter.key_value("Backend logs", &format!("quizctl logs backend{}", prod_flag));
    reporter.key_value("Stop stack", &format!("quizctl down{}", prod_flag));
    reporter.key_value("Status", "quizctl status");
}

/// Render the result of an HTTP health probe as one line.
pub(crate) fn health_line(reporter: &mut dyn Reporter, report: &HealthReport) {
    match report.status {
        ProbeStatus::Ready => reporter.success("Backend is up and answering health checks"),
        ProbeStatus::Starting => reporter.info("Backend is still starting (check again shortly)"),
        ProbeStatus::Unreachable => {
            reporter.warning("Backend is not answering yet (check again shortly)")
        }
    }
}

/// Map a finished sequence onto the command result, with a closing line.
pub(crate) fn finish_run(
    reporter: &mut dyn Reporter,
    outcome: &SequenceOutcome,
    success_message: &str,
) -> CommandResult {
    if outcome.success() {
        reporter.success(&format!(
            "{} ({})",
            success_message,
            format_duration(outcome.duration)
        ));
        CommandResult::success()
    } else if outcome.halted_early {
        if let Some(failed) = outcome.halted_at() {
            reporter.error(&format!("Stopped at '{}'", failed.name));
        }
        CommandResult::failure(outcome.exit_code())
    } else {
        let failures = outcome.failures().len();
        let label = if failures == 1 { "warning" } else { "warnings" };
        reporter.warning(&format!("Completed with {} {}", failures, label));
        CommandResult::failure(outcome.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Step, StepResult};
    use crate::ui::RecordingReporter;
    use std::time::Duration;

    fn ok_result(name: &str) -> StepResult {
        StepResult::success(
            &Step::new(name, ["true"]),
            String::new(),
            Duration::from_millis(5),
        )
    }

    fn failed_result(name: &str, best_effort: bool) -> StepResult {
        let mut step = Step::new(name, ["false"]);
        if best_effort {
            step = step.best_effort();
        }
        StepResult::failure(&step, "boom".to_string(), Some(1), Duration::from_millis(5))
    }

    #[test]
    fn database_panel_lists_connection_settings() {
        let mut reporter = RecordingReporter::new();
        database_panel(&mut reporter, &DatabaseConfig::compose_defaults());

        assert!(reporter.has_line("Host: localhost"));
        assert!(reporter.has_line("Port: 5434"));
        assert!(reporter.has_line("Password: mysecretpassword"));
    }

    #[test]
    fn backend_panel_lists_endpoints() {
        let mut reporter = RecordingReporter::new();
        backend_panel(&mut reporter, &StackConfig::new("/srv/app"));

        assert!(reporter.has_line("Base URL: http://localhost:8090"));
        assert!(reporter.has_line("Health check: http://localhost:8090/actuator/health"));
        assert!(reporter.has_line("Swagger: http://localhost:8090/swagger-ui.html"));
    }

    #[test]
    fn quick_commands_carry_the_prod_flag() {
        let mut reporter = RecordingReporter::new();
        quick_commands(&mut reporter, true);

        assert!(reporter.has_line("Stop stack: quizctl down --prod"));
    }

    #[test]
    fn finish_run_reports_success_with_duration() {
        let outcome = SequenceOutcome {
            results: vec![ok_result("a")],
            halted_early: false,
            duration: Duration::from_secs(3),
        };

        let mut reporter = RecordingReporter::new();
        let result = finish_run(&mut reporter, &outcome, "Stack is running");

        assert!(result.success);
        assert!(reporter.has_line("Stack is running (3.0s)"));
    }

    #[test]
    fn finish_run_names_the_halting_step() {
        let outcome = SequenceOutcome {
            results: vec![ok_result("a"), failed_result("start-stack", false)],
            halted_early: true,
            duration: Duration::from_secs(1),
        };

        let mut reporter = RecordingReporter::new();
        let result = finish_run(&mut reporter, &outcome, "Stack is running");

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(reporter.has_error("Stopped at 'start-stack'"));
    }

    #[test]
    fn finish_run_counts_best_effort_warnings() {
        let outcome = SequenceOutcome {
            results: vec![failed_result("pull-source", true), ok_result("b")],
            halted_early: false,
            duration: Duration::from_secs(1),
        };

        let mut reporter = RecordingReporter::new();
        let result = finish_run(&mut reporter, &outcome, "Stack is running");

        assert!(!result.success);
        assert!(reporter.has_warning("Completed with 1 warning"));
    }
}
