//! Configuration for the stack workflows.
//!
//! This module handles:
//! - The assembled [`StackConfig`] passed to every plan builder
//! - `.env.local` reading and writing in [`env_file`]
//!
//! # Example
//!
//! ```
//! use quizctl::config::StackConfig;
//!
//! let config = StackConfig::new("/srv/intelliquiz");
//! assert_eq!(config.health_url(), "http://localhost:8090/actuator/health");
//! ```
//!
//! # Layering
//!
//! `StackConfig::load` assembles settings in this order, later layers
//! overriding earlier ones:
//! 1. Built-in stack defaults
//! 2. `.env.local` in the project root (written by `quizctl db`)
//! 3. Process environment (`DATABASE_*`, `QUIZCTL_*_BIN`)
//! 4. Command-line flags (applied by the command layer)

pub mod env_file;
pub mod stack;

pub use env_file::{EnvFileParser, EnvFileWriter};
pub use stack::{DatabaseConfig, RegistryConfig, StackConfig, ToolPaths};
