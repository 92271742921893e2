//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`quizctl up`, `quizctl status`)
//! - Shared configuration loading
//! - Consistent global flag handling

pub mod backend;
pub mod completions;
pub mod db;
pub mod dispatcher;
pub mod down;
pub mod logs;
pub mod panels;
pub mod prod;
pub mod publish;
pub mod restart;
pub mod status;
pub mod up;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
