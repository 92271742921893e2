//! Stack workflows.
//!
//! Each submodule turns a [`StackConfig`](crate::config::StackConfig) into
//! the step plan for one operator workflow. Plans are plain data built at
//! command time; nothing in this module spawns a process except the
//! read-only probes in [`health`].

pub mod backend;
pub mod compose;
pub mod database;
pub mod health;
pub mod registry;

pub use compose::{ComposeFile, ComposeService, UpOptions};

/// Join a configured launcher with trailing arguments into one argv vector.
///
/// Launchers may be multi-token ("docker compose"), so plans never assume
/// a tool is a single executable name.
pub(crate) fn build_argv(launcher: &[String], args: &[&str]) -> Vec<String> {
    let mut argv = Vec::with_capacity(launcher.len() + args.len());
    argv.extend(launcher.iter().cloned());
    argv.extend(args.iter().map(ToString::to_string));
    argv
}
