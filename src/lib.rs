//! quizctl - Operator CLI for the IntelliQuiz stack.
//!
//! quizctl replaces the pile of ad-hoc run/build/deploy scripts around the
//! IntelliQuiz backend with one binary: it brings the Docker compose stack
//! up and down, builds and runs the Spring Boot backend with Maven, prepares
//! the local PostgreSQL database, publishes the backend image to Docker Hub,
//! and reports stack health.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Stack configuration with file and environment overrides
//! - [`detect`] - External tool probing
//! - [`error`] - Error types and result aliases
//! - [`exec`] - Child process execution
//! - [`sequence`] - Ordered step execution with fail-fast semantics
//! - [`stack`] - Workflow step plans for compose, Maven, psql, and the registry
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use quizctl::sequence::{run_plan, Step};
//! use quizctl::ui::RecordingReporter;
//!
//! let steps = vec![Step::new("noop", ["true"])];
//! let mut reporter = RecordingReporter::new();
//! let outcome = run_plan(&steps, &mut reporter);
//! assert_eq!(outcome.exit_code(), 0);
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod exec;
pub mod sequence;
pub mod stack;
pub mod ui;

pub use error::{QuizctlError, Result};
