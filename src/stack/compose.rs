//! Docker Compose plans and compose file inspection.
//!
//! The development and production bring-ups share the same shape: verify
//! the Docker toolchain, start the stack with the right compose file, give
//! the containers a moment, then probe the database. Production differs
//! only in pulling published images instead of building locally.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::StackConfig;
use crate::error::{QuizctlError, Result};
use crate::sequence::Step;

use super::build_argv;

/// Compose service running PostgreSQL.
pub const DB_SERVICE: &str = "db";

/// Compose service running the Spring Boot backend.
pub const BACKEND_SERVICE: &str = "backend";

/// Container name `docker ps` filters fall back to when the compose file
/// does not pin one for the backend service.
pub const DEFAULT_BACKEND_CONTAINER: &str = "intelliquiz_backend";

/// Options for the development bring-up plan.
#[derive(Debug, Clone)]
pub struct UpOptions {
    /// Run `git pull` before starting the stack.
    pub pull: bool,

    /// Rebuild images as part of `up`.
    pub build: bool,
}

impl Default for UpOptions {
    fn default() -> Self {
        Self {
            pull: false,
            build: true,
        }
    }
}

fn compose_argv(config: &StackConfig, compose_file: &Path, args: &[&str]) -> Vec<String> {
    let mut argv = build_argv(&config.tools.compose, &["-f"]);
    argv.push(compose_file.to_string_lossy().into_owned());
    argv.extend(args.iter().map(ToString::to_string));
    argv
}

/// Argv for the best-effort `pg_isready` probe against the compose database.
pub(crate) fn db_probe_argv(config: &StackConfig, compose_file: &Path) -> Vec<String> {
    compose_argv(
        config,
        compose_file,
        &[
            "exec",
            "-T",
            DB_SERVICE,
            "pg_isready",
            "-U",
            config.compose_database.user.as_str(),
        ],
    )
}

fn preflight_steps(config: &StackConfig) -> Vec<Step> {
    vec![
        Step::new("check-docker", build_argv(&config.tools.docker, &["--version"]))
            .title("Checking Docker installation")
            .show_output(),
        Step::new("check-daemon", build_argv(&config.tools.docker, &["ps"]))
            .title("Checking Docker daemon"),
        Step::new(
            "check-compose",
            build_argv(&config.tools.compose, &["--version"]),
        )
        .title("Checking Docker Compose installation")
        .show_output(),
    ]
}

fn db_probe_step(config: &StackConfig, compose_file: &Path) -> Step {
    Step::new("probe-database", db_probe_argv(config, compose_file))
        .title("Checking database readiness")
        .in_dir(&config.project_root)
        .best_effort()
        .show_output()
}

/// Build the development bring-up plan.
///
/// The `up` itself is streamed so image build output stays visible. The
/// pause after it covers container startup before anything probes.
pub fn up_plan(config: &StackConfig, options: &UpOptions) -> Vec<Step> {
    let compose_file = config.compose_path();
    let mut steps = preflight_steps(config);

    if options.pull {
        steps.push(
            Step::new("pull-source", build_argv(&config.tools.git, &["pull"]))
                .title("Pulling latest code")
                .in_dir(&config.project_root)
                .best_effort()
                .show_output(),
        );
    }

    let mut up_args = vec!["up", "-d"];
    if options.build {
        up_args.push("--build");
    }

    steps.push(
        Step::new("start-stack", compose_argv(config, &compose_file, &up_args))
            .title("Building and starting containers")
            .in_dir(&config.project_root)
            .streamed()
            .pause_after(config.service_wait, "giving services time to initialize"),
    );

    steps.push(db_probe_step(config, &compose_file));
    steps
}

/// Build the production bring-up plan: pull published images, start them.
pub fn prod_plan(config: &StackConfig) -> Vec<Step> {
    let compose_file = config.prod_compose_path();
    let mut steps = preflight_steps(config);

    steps.push(
        Step::new("pull-images", compose_argv(config, &compose_file, &["pull"]))
            .title("Pulling images from Docker Hub")
            .in_dir(&config.project_root),
    );
    steps.push(
        Step::new(
            "start-stack",
            compose_argv(config, &compose_file, &["up", "-d"]),
        )
        .title("Starting containers")
        .in_dir(&config.project_root)
        .pause_after(config.service_wait, "giving services time to initialize"),
    );
    steps.push(db_probe_step(config, &compose_file));
    steps
}

/// Build the shutdown plan.
pub fn down_plan(config: &StackConfig, prod: bool) -> Vec<Step> {
    let compose_file = pick_compose_file(config, prod);
    vec![
        Step::new("stop-stack", compose_argv(config, &compose_file, &["down"]))
            .title("Stopping containers")
            .in_dir(&config.project_root),
    ]
}

/// Build the restart plan.
pub fn restart_plan(config: &StackConfig, prod: bool) -> Vec<Step> {
    let compose_file = pick_compose_file(config, prod);
    vec![
        Step::new(
            "restart-stack",
            compose_argv(config, &compose_file, &["restart"]),
        )
        .title("Restarting containers")
        .in_dir(&config.project_root)
        .pause_after(config.service_wait, "giving services time to settle"),
        db_probe_step(config, &compose_file),
    ]
}

/// Argv for a foreground `logs -f` attach, optionally narrowed to one
/// service. The child owns the terminal until the operator interrupts.
pub fn logs_argv(config: &StackConfig, prod: bool, service: Option<&str>) -> Vec<String> {
    let compose_file = pick_compose_file(config, prod);
    let mut args = vec!["logs", "-f"];
    if let Some(service) = service {
        args.push(service);
    }
    compose_argv(config, &compose_file, &args)
}

/// Argv for `compose ps` against the chosen compose file.
pub fn ps_argv(config: &StackConfig, prod: bool) -> Vec<String> {
    let compose_file = pick_compose_file(config, prod);
    compose_argv(config, &compose_file, &["ps"])
}

fn pick_compose_file(config: &StackConfig, prod: bool) -> PathBuf {
    if prod {
        config.prod_compose_path()
    } else {
        config.compose_path()
    }
}

/// Minimal view of a compose file: enough to list services and find the
/// container names `docker ps` filters need.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeFile {
    #[serde(default)]
    pub services: BTreeMap<String, ComposeService>,
}

/// One service entry in a compose file. Everything except the pinned
/// container name is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposeService {
    #[serde(default)]
    pub container_name: Option<String>,
}

impl ComposeFile {
    /// Parse compose YAML.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| QuizctlError::ConfigError {
            message: format!("invalid compose file: {}", e),
        })
    }

    /// Read and parse a compose file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| QuizctlError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            QuizctlError::ConfigError { message } => QuizctlError::ConfigError {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Service names in sorted order.
    pub fn service_names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Container name configured for a service, if the file pins one.
    pub fn container_name(&self, service: &str) -> Option<&str> {
        self.services
            .get(service)
            .and_then(|s| s.container_name.as_deref())
    }

    /// Backend container name for `docker ps` filters.
    pub fn backend_container(&self) -> &str {
        self.container_name(BACKEND_SERVICE)
            .unwrap_or(DEFAULT_BACKEND_CONTAINER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> StackConfig {
        StackConfig::new("/srv/app")
    }

    fn names(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.name.as_str()).collect()
    }

    fn find<'a>(steps: &'a [Step], name: &str) -> &'a Step {
        steps
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no step named {}", name))
    }

    #[test]
    fn up_plan_checks_toolchain_before_starting() {
        let plan = up_plan(&config(), &UpOptions::default());
        assert_eq!(
            names(&plan),
            vec![
                "check-docker",
                "check-daemon",
                "check-compose",
                "start-stack",
                "probe-database"
            ]
        );
    }

    #[test]
    fn up_plan_with_pull_inserts_git_step() {
        let options = UpOptions {
            pull: true,
            ..Default::default()
        };
        let plan = up_plan(&config(), &options);

        assert_eq!(names(&plan)[3], "pull-source");
        let pull = find(&plan, "pull-source");
        assert!(pull.best_effort);
        assert_eq!(pull.command, vec!["git", "pull"]);
    }

    #[test]
    fn up_uses_the_dev_compose_file_and_builds() {
        let config = config();
        let plan = up_plan(&config, &UpOptions::default());

        let start = find(&plan, "start-stack");
        let expected = vec![
            "docker-compose".to_string(),
            "-f".to_string(),
            config.compose_path().to_string_lossy().into_owned(),
            "up".to_string(),
            "-d".to_string(),
            "--build".to_string(),
        ];
        assert_eq!(start.command, expected);
        assert!(!start.capture);
    }

    #[test]
    fn up_without_build_omits_the_flag() {
        let options = UpOptions {
            build: false,
            ..Default::default()
        };
        let plan = up_plan(&config(), &options);

        let start = find(&plan, "start-stack");
        assert!(!start.command.contains(&"--build".to_string()));
    }

    #[test]
    fn up_pauses_for_the_configured_service_wait() {
        let plan = up_plan(&config(), &UpOptions::default());

        let pause = find(&plan, "start-stack")
            .pause_after
            .clone()
            .unwrap();
        assert_eq!(pause.duration, Duration::from_secs(10));
    }

    #[test]
    fn database_probe_is_best_effort_and_captured() {
        let plan = up_plan(&config(), &UpOptions::default());

        let probe = find(&plan, "probe-database");
        assert!(probe.best_effort);
        assert!(probe.capture);
        assert!(probe.command.contains(&"pg_isready".to_string()));
        assert!(probe.command.contains(&"-T".to_string()));
    }

    #[test]
    fn prod_plan_pulls_images_and_starts_captured() {
        let config = config();
        let plan = prod_plan(&config);

        assert_eq!(
            names(&plan),
            vec![
                "check-docker",
                "check-daemon",
                "check-compose",
                "pull-images",
                "start-stack",
                "probe-database"
            ]
        );

        let prod_file = config.prod_compose_path().to_string_lossy().into_owned();
        let pull = find(&plan, "pull-images");
        assert!(pull.command.contains(&prod_file));
        assert!(pull.capture);

        let start = find(&plan, "start-stack");
        assert!(start.capture);
        assert!(!start.command.contains(&"--build".to_string()));
    }

    #[test]
    fn down_plan_is_a_single_stop() {
        let config = config();
        let plan = down_plan(&config, false);

        assert_eq!(names(&plan), vec!["stop-stack"]);
        let expected = vec![
            "docker-compose".to_string(),
            "-f".to_string(),
            config.compose_path().to_string_lossy().into_owned(),
            "down".to_string(),
        ];
        assert_eq!(plan[0].command, expected);
    }

    #[test]
    fn down_prod_uses_the_prod_compose_file() {
        let config = config();
        let plan = down_plan(&config, true);

        let prod_file = config.prod_compose_path().to_string_lossy().into_owned();
        assert!(plan[0].command.contains(&prod_file));
    }

    #[test]
    fn restart_pauses_then_probes() {
        let plan = restart_plan(&config(), false);

        assert_eq!(names(&plan), vec!["restart-stack", "probe-database"]);
        assert!(plan[0].pause_after.is_some());
    }

    #[test]
    fn logs_argv_attaches_to_everything_by_default() {
        let config = config();
        let argv = logs_argv(&config, false, None);

        assert_eq!(argv[0], "docker-compose");
        assert_eq!(&argv[3..], ["logs", "-f"]);
    }

    #[test]
    fn logs_argv_narrows_to_one_service() {
        let argv = logs_argv(&config(), false, Some("backend"));
        assert_eq!(argv.last().map(String::as_str), Some("backend"));
    }

    #[test]
    fn compose_steps_run_from_the_project_root() {
        let config = config();
        let plan = up_plan(&config, &UpOptions::default());

        let start = find(&plan, "start-stack");
        assert_eq!(start.cwd.as_deref(), Some(Path::new("/srv/app")));
    }

    const SAMPLE_COMPOSE: &str = r#"
services:
  db:
    image: postgres:16
    container_name: intelliquiz_db
    ports:
      - "5434:5432"
  backend:
    image: project-cache-in-backend:latest
    container_name: intelliquiz_backend
    ports:
      - "8090:8090"
"#;

    #[test]
    fn compose_file_lists_services_sorted() {
        let file = ComposeFile::parse(SAMPLE_COMPOSE).unwrap();
        assert_eq!(file.service_names(), vec!["backend", "db"]);
    }

    #[test]
    fn compose_file_exposes_container_names() {
        let file = ComposeFile::parse(SAMPLE_COMPOSE).unwrap();

        assert_eq!(file.container_name("db"), Some("intelliquiz_db"));
        assert_eq!(file.backend_container(), "intelliquiz_backend");
        assert_eq!(file.container_name("missing"), None);
    }

    #[test]
    fn backend_container_falls_back_when_unpinned() {
        let file = ComposeFile::parse("services:\n  backend:\n    image: x\n").unwrap();
        assert_eq!(file.backend_container(), DEFAULT_BACKEND_CONTAINER);
    }

    #[test]
    fn compose_file_load_reports_missing_files() {
        let result = ComposeFile::load(Path::new("/nonexistent/docker-compose.yml"));
        assert!(matches!(result, Err(QuizctlError::FileNotFound { .. })));
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let result = ComposeFile::parse("services: [not, a, map]");
        assert!(matches!(result, Err(QuizctlError::ConfigError { .. })));
    }
}
