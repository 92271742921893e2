//! External process execution.

pub mod command;

pub use command::{
    command_line, execute, execute_interactive, execute_quiet, CommandOptions, CommandResult,
};
