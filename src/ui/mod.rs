//! Terminal output components.
//!
//! This module provides:
//! - [`Reporter`] trait for progress and status reporting
//! - [`ConsoleReporter`] for terminal usage
//! - [`RecordingReporter`] for tests
//! - Prompts, spinners, and the visual theme
//!
//! # Example
//!
//! ```
//! use quizctl::ui::{OutputMode, RecordingReporter, Reporter};
//!
//! // Use the recording reporter for testability
//! let mut reporter = RecordingReporter::new();
//! reporter.header("IntelliQuiz Docker Setup");
//! reporter.success("Stack is up");
//! assert!(reporter.has_line("Stack is up"));
//! ```

pub mod mock;
pub mod output;
pub mod prompts;
pub mod reporter;
pub mod spinner;
pub mod theme;

pub use mock::RecordingReporter;
pub use output::OutputMode;
pub use prompts::{can_prompt, confirm, input};
pub use reporter::ConsoleReporter;
pub use spinner::ProgressSpinner;
pub use theme::{should_use_colors, QuizctlTheme};

use std::time::Duration;

use crate::sequence::{Step, StepResult};

/// Structured reporting of workflow progress.
///
/// The sequencer and the commands report through this trait; implementations
/// decide how much of it reaches the terminal, honoring the active
/// [`OutputMode`]. Tests swap in [`RecordingReporter`] to assert on what
/// would have been printed.
pub trait Reporter {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Show a ruled banner above a workflow.
    fn header(&mut self, title: &str);

    /// Display a plain line.
    fn message(&mut self, msg: &str);

    /// Display an informational line.
    fn info(&mut self, msg: &str);

    /// Display a success line.
    fn success(&mut self, msg: &str);

    /// Display a warning line.
    fn warning(&mut self, msg: &str);

    /// Display an error line.
    fn error(&mut self, msg: &str);

    /// Display an indented key/value detail line.
    fn key_value(&mut self, key: &str, value: &str);

    /// A step is about to launch.
    fn step_started(&mut self, step: &Step, index: usize, total: usize);

    /// A step finished with the given result.
    fn step_finished(&mut self, step: &Step, result: &StepResult);

    /// The sequencer is about to sleep before the next step.
    fn pausing(&mut self, duration: Duration, reason: &str);
}
