//! Error types for quizctl operations.
//!
//! This module defines [`QuizctlError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `QuizctlError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `QuizctlError::Other`) for unexpected errors
//! - All errors should provide actionable messages for operators

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quizctl operations.
#[derive(Debug, Error)]
pub enum QuizctlError {
    /// A required file (compose file, Dockerfile, pom.xml) is missing.
    #[error("Required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Failed to parse an environment file.
    #[error("Failed to parse env file at {path}: {message}")]
    EnvFileError { path: PathBuf, message: String },

    /// The executable behind a step is missing from the environment.
    #[error("Required tool '{tool}' was not found: {message}")]
    ToolMissing { tool: String, message: String },

    /// A directly invoked command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// No runnable build artifact was produced.
    #[error("No runnable JAR found in {dir}")]
    JarNotFound { dir: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for quizctl operations.
pub type Result<T> = std::result::Result<T, QuizctlError>;
