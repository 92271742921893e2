//! Step and sequence results.

use std::time::Duration;

use super::step::Step;

/// Outcome of one executed step. Constructed once when the step finishes
/// and never mutated.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Name of the originating step.
    pub name: String,

    /// Whether the command exited with code 0.
    pub succeeded: bool,

    /// Best-effort policy of the originating step.
    pub best_effort: bool,

    /// Combined stdout/stderr (empty for streamed steps), or the launch
    /// error message when the command could not be run.
    pub output: String,

    /// Exit code (None if killed by signal or never launched).
    pub exit_code: Option<i32>,

    /// How long the step took.
    pub duration: Duration,
}

impl StepResult {
    /// Create a success result.
    pub fn success(step: &Step, output: String, duration: Duration) -> Self {
        Self {
            name: step.name.clone(),
            succeeded: true,
            best_effort: step.best_effort,
            output,
            exit_code: Some(0),
            duration,
        }
    }

    /// Create a failure result.
    pub fn failure(
        step: &Step,
        output: String,
        exit_code: Option<i32>,
        duration: Duration,
    ) -> Self {
        Self {
            name: step.name.clone(),
            succeeded: false,
            best_effort: step.best_effort,
            output,
            exit_code,
            duration,
        }
    }

    /// One-line summary for listings: "✓ check-docker (12ms)".
    pub fn summary_line(&self) -> String {
        let mark = if self.succeeded { '✓' } else { '✗' };
        format!("{} {} ({})", mark, self.name, format_duration(self.duration))
    }
}

/// Terminal state of a whole sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Every step was given a chance to run.
    Completed,

    /// A non-best-effort failure stopped the run early.
    Halted,
}

impl std::fmt::Display for SequenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SequenceState::Completed => "Completed",
            SequenceState::Halted => "Halted",
        };
        write!(f, "{}", s)
    }
}

/// Aggregate result of running a step plan.
///
/// When `halted_early` is true, the last result is the failure that stopped
/// the run and its originating step was not best-effort.
#[derive(Debug)]
pub struct SequenceOutcome {
    /// Results in execution order, one per step that ran.
    pub results: Vec<StepResult>,

    /// Whether a non-best-effort failure stopped the run.
    pub halted_early: bool,

    /// Total wall time including pauses.
    pub duration: Duration,
}

impl SequenceOutcome {
    /// Terminal state of the sequence.
    pub fn state(&self) -> SequenceState {
        if self.halted_early {
            SequenceState::Halted
        } else {
            SequenceState::Completed
        }
    }

    /// Whether every recorded result succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }

    /// Clean run: completed without any recorded failure.
    pub fn success(&self) -> bool {
        !self.halted_early && self.all_succeeded()
    }

    /// Conventional process exit code: 0 for a clean run, 1 otherwise
    /// (best-effort failures count; the operator should see them).
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// All failed results, best-effort ones included.
    pub fn failures(&self) -> Vec<&StepResult> {
        self.results.iter().filter(|r| !r.succeeded).collect()
    }

    /// The failure that halted the run, if it halted.
    pub fn halted_at(&self) -> Option<&StepResult> {
        if self.halted_early {
            self.results.last()
        } else {
            None
        }
    }
}

/// Format a duration in a compact human form.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
