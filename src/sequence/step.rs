//! Step definitions.
//!
//! A [`Step`] is one named external-command invocation inside a plan. Steps
//! are assembled by the plan builders at sequence-definition time and never
//! change afterwards; everything the runner needs to know about a step is
//! carried here.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// A fixed pause inserted after a step completes, e.g. giving containers
/// time to initialize before anything probes them.
#[derive(Debug, Clone)]
pub struct Pause {
    /// How long to sleep.
    pub duration: Duration,

    /// Operator-facing reason shown while sleeping.
    pub reason: String,
}

/// A single named external-command invocation.
#[derive(Debug, Clone)]
pub struct Step {
    /// Short identifier (e.g. "check-docker").
    pub name: String,

    /// Human-readable description shown while the step runs.
    pub title: String,

    /// Command as argv tokens; the first token is the executable.
    pub command: Vec<String>,

    /// Failure is recorded as a warning instead of halting the sequence.
    pub best_effort: bool,

    /// Capture stdout/stderr (false leaves them attached to the terminal,
    /// used for long builds where live output matters).
    pub capture: bool,

    /// Working directory for the command.
    pub cwd: Option<PathBuf>,

    /// Extra environment variables for the command.
    pub env: HashMap<String, String>,

    /// Fixed sleep after the step, before the next one runs.
    pub pause_after: Option<Pause>,

    /// Surface the first output line alongside the success mark
    /// (version checks want "Docker version ..." visible).
    pub show_output: bool,
}

impl Step {
    /// Create a step; the title defaults to the name until overridden.
    pub fn new<I, S>(name: &str, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            title: name.to_string(),
            command: command.into_iter().map(Into::into).collect(),
            best_effort: false,
            capture: true,
            cwd: None,
            env: HashMap::new(),
            pause_after: None,
            show_output: false,
        }
    }

    /// Set the operator-facing title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Record failure as a warning and keep going.
    pub fn best_effort(mut self) -> Self {
        self.best_effort = true;
        self
    }

    /// Leave stdout/stderr attached to the terminal.
    pub fn streamed(mut self) -> Self {
        self.capture = false;
        self
    }

    /// Run the command from the given directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Sleep after the step completes.
    pub fn pause_after(mut self, duration: Duration, reason: &str) -> Self {
        self.pause_after = Some(Pause {
            duration,
            reason: reason.to_string(),
        });
        self
    }

    /// Show the first output line with the success mark.
    pub fn show_output(mut self) -> Self {
        self.show_output = true;
        self
    }
}
