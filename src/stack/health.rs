//! Service health probes.
//!
//! Read-only checks used by `status` and the bring-up summary panels.
//! Nothing here mutates the stack; a failed probe is information, not an
//! error.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::StackConfig;
use crate::exec;

use super::{build_argv, compose};

/// Timeout for a single HTTP health request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const DETAIL_MAX_CHARS: usize = 120;

/// Result of probing one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Endpoint answered with a success status.
    Ready,

    /// Endpoint answered, but not with success. Usually still booting.
    Starting,

    /// Endpoint did not answer at all.
    Unreachable,
}

impl ProbeStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeStatus::Ready)
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProbeStatus::Ready => "Ready",
            ProbeStatus::Starting => "Starting",
            ProbeStatus::Unreachable => "Unreachable",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of an HTTP health probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Probed URL.
    pub url: String,

    /// What the endpoint reported.
    pub status: ProbeStatus,

    /// Response body or status line, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Probe an HTTP health endpoint once.
pub fn probe_http(url: &str, timeout: Duration) -> HealthReport {
    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            return HealthReport {
                url: url.to_string(),
                status: ProbeStatus::Unreachable,
                detail: Some(e.to_string()),
            }
        }
    };

    match client.get(url).send() {
        Ok(response) if response.status().is_success() => {
            let detail = response
                .text()
                .ok()
                .map(|body| truncate(body.trim(), DETAIL_MAX_CHARS))
                .filter(|body| !body.is_empty());
            HealthReport {
                url: url.to_string(),
                status: ProbeStatus::Ready,
                detail,
            }
        }
        Ok(response) => HealthReport {
            url: url.to_string(),
            status: ProbeStatus::Starting,
            detail: Some(format!("HTTP {}", response.status())),
        },
        Err(e) => {
            debug!("health probe against {} failed: {}", url, e);
            HealthReport {
                url: url.to_string(),
                status: ProbeStatus::Unreachable,
                detail: None,
            }
        }
    }
}

/// Status column from `docker ps` for containers matching a name filter.
///
/// `None` means no matching container is running (or Docker itself is
/// unavailable).
pub fn container_status(config: &StackConfig, name_filter: &str) -> Option<String> {
    let filter = format!("name={}", name_filter);
    let argv = build_argv(
        &config.tools.docker,
        &["ps", "--filter", filter.as_str(), "--format", "{{.Status}}"],
    );

    let result = exec::execute_quiet(&argv, None).ok()?;
    if !result.success {
        return None;
    }
    result.first_line()
}

/// Whether the compose database answers `pg_isready`.
pub fn database_ready(config: &StackConfig, compose_file: &Path) -> bool {
    let argv = compose::db_probe_argv(config, compose_file);
    matches!(
        exec::execute_quiet(&argv, Some(&config.project_root)),
        Ok(result) if result.success
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
