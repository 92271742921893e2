//! Recording reporter for tests.
//!
//! `RecordingReporter` implements the `Reporter` trait and captures every
//! line it would have printed, for later assertion.
//!
//! # Example
//!
//! ```
//! use quizctl::ui::{RecordingReporter, Reporter};
//!
//! let mut reporter = RecordingReporter::new();
//! reporter.message("Starting stack");
//! reporter.warning("Database is still starting");
//!
//! assert!(reporter.has_line("Starting stack"));
//! assert!(reporter.has_warning("still starting"));
//! ```

use std::time::Duration;

use crate::sequence::{format_duration, Step, StepResult};

use super::{OutputMode, Reporter};

/// Reporter that captures all output for later assertion.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    mode: OutputMode,
    lines: Vec<String>,
    headers: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    started: Vec<String>,
    finished: Vec<String>,
}

impl RecordingReporter {
    /// Create a new recording reporter with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new recording reporter with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Every line that would have been printed, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// All captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Names of the steps that started, in order.
    pub fn started(&self) -> &[String] {
        &self.started
    }

    /// Names of the steps that finished, in order.
    pub fn finished(&self) -> &[String] {
        &self.finished
    }

    /// Check if any captured line contains the given text.
    pub fn has_line(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l.contains(text))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|l| l.contains(text))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|l| l.contains(text))
    }

    /// Clear all captured output.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.headers.clear();
        self.warnings.clear();
        self.errors.clear();
        self.started.clear();
        self.finished.clear();
    }
}

impl Reporter for RecordingReporter {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn header(&mut self, title: &str) {
        self.headers.push(title.to_string());
        self.lines.push(title.to_string());
    }

    fn message(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn info(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
        self.lines.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
        self.lines.push(msg.to_string());
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{}: {}", key, value));
    }

    fn step_started(&mut self, step: &Step, index: usize, total: usize) {
        self.started.push(step.name.clone());
        self.lines
            .push(format!("[{}/{}] {}", index + 1, total, step.title));
    }

    fn step_finished(&mut self, step: &Step, result: &StepResult) {
        self.finished.push(step.name.clone());
        self.lines.push(result.summary_line());
    }

    fn pausing(&mut self, duration: Duration, reason: &str) {
        self.lines
            .push(format!("waiting {} ({})", format_duration(duration), reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_reporter_captures_lines() {
        let mut reporter = RecordingReporter::new();

        reporter.message("Hello");
        reporter.success("Done");
        reporter.warning("Be careful");
        reporter.error("Oops");

        assert_eq!(reporter.lines().len(), 4);
        assert_eq!(reporter.warnings(), &["Be careful"]);
        assert_eq!(reporter.errors(), &["Oops"]);
    }

    #[test]
    fn recording_reporter_captures_step_lifecycle() {
        let mut reporter = RecordingReporter::new();
        let step = Step::new("check-docker", ["docker", "--version"]);
        let result = StepResult::success(&step, "Docker 27.0".into(), Duration::from_millis(12));

        reporter.step_started(&step, 0, 3);
        reporter.step_finished(&step, &result);

        assert_eq!(reporter.started(), &["check-docker"]);
        assert_eq!(reporter.finished(), &["check-docker"]);
        assert!(reporter.has_line("[1/3]"));
    }

    #[test]
    fn recording_reporter_captures_pause_reason() {
        let mut reporter = RecordingReporter::new();

        reporter.pausing(Duration::from_secs(10), "waiting for containers");

        assert!(reporter.has_line("waiting for containers"));
        assert!(reporter.has_line("10.0s"));
    }

    #[test]
    fn recording_reporter_key_value() {
        let mut reporter = RecordingReporter::new();

        reporter.key_value("Backend", "http://localhost:8090");

        assert!(reporter.has_line("Backend: http://localhost:8090"));
    }

    #[test]
    fn recording_reporter_has_helpers() {
        let mut reporter = RecordingReporter::new();

        reporter.message("Starting the stack");
        reporter.warning("Database not ready");
        reporter.error("Compose failed");

        assert!(reporter.has_line("Starting"));
        assert!(reporter.has_warning("not ready"));
        assert!(reporter.has_error("Compose"));
        assert!(!reporter.has_line("not there"));
    }

    #[test]
    fn recording_reporter_clear_resets() {
        let mut reporter = RecordingReporter::new();

        reporter.header("Setup");
        reporter.message("test");
        reporter.clear();

        assert!(reporter.lines().is_empty());
        assert!(reporter.headers().is_empty());
    }

    #[test]
    fn recording_reporter_with_mode() {
        let reporter = RecordingReporter::with_mode(OutputMode::Quiet);
        assert_eq!(reporter.output_mode(), OutputMode::Quiet);
    }
}
