//! External tool probing.
//!
//! The status workflow asks each tool for `--version` and pulls a dotted
//! version out of the output for display.

use regex::Regex;
use serde::Serialize;

use crate::exec::{self, CommandOptions};

/// A probed tool with its extracted version.
#[derive(Debug, Clone, Serialize)]
pub struct ToolVersion {
    pub name: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Extract a dotted version from `--version` output.
///
/// Tolerates the formats the stack tools actually print: `Docker version
/// 27.3.1, build ...`, `Docker Compose version v2.29.7`, `Apache Maven
/// 3.9.9`, `psql (PostgreSQL) 16.4`.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}

/// Probe a tool by running `<launcher> --version`.
pub fn probe_tool(name: &str, launcher: &[String]) -> ToolVersion {
    let mut argv: Vec<String> = launcher.to_vec();
    argv.push("--version".to_string());

    match exec::execute(&argv, &CommandOptions::default()) {
        Ok(result) if result.success => ToolVersion {
            name: name.to_string(),
            available: true,
            version: extract_version(&result.combined()),
        },
        _ => ToolVersion {
            name: name.to_string(),
            available: false,
            version: None,
        },
    }
}
