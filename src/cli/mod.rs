//! Command-line interface for quizctl.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    BackendArgs, Cli, Commands, DbArgs, DownArgs, LogsArgs, ProdArgs, PublishArgs, RestartArgs,
    StatusArgs, UpArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
