//! Local backend build and run plans.
//!
//! Runs Maven directly on the host instead of inside a container. Build
//! phases are streamed because Maven output is the only progress signal
//! the operator gets on a long build.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::StackConfig;
use crate::error::{QuizctlError, Result};
use crate::sequence::Step;

use super::build_argv;

/// Options for the local backend workflow.
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    /// Run the test phase while packaging (skipped by default).
    pub run_tests: bool,

    /// Pass `-o` so Maven resolves from the local repository only.
    pub offline: bool,
}

/// Build the Maven check/clean/resolve/package plan.
pub fn build_plan(config: &StackConfig, options: &BackendOptions) -> Vec<Step> {
    let backend = config.backend_path();

    let mut resolve_args = vec!["dependency:resolve"];
    if options.offline {
        resolve_args.push("-o");
    }

    let mut package_args = vec!["clean", "package"];
    if !options.run_tests {
        package_args.push("-DskipTests");
    }
    if options.offline {
        package_args.push("-o");
    }

    vec![
        Step::new("check-maven", build_argv(&config.tools.mvn, &["--version"]))
            .title("Checking Maven installation")
            .show_output(),
        Step::new("clean", build_argv(&config.tools.mvn, &["clean"]))
            .title("Cleaning previous build")
            .in_dir(&backend)
            .streamed(),
        Step::new("resolve-deps", build_argv(&config.tools.mvn, &resolve_args))
            .title("Resolving dependencies")
            .in_dir(&backend)
            .streamed(),
        Step::new("package", build_argv(&config.tools.mvn, &package_args))
            .title("Packaging application")
            .in_dir(&backend)
            .streamed(),
    ]
}

/// Plan that only removes previous build outputs.
pub fn clean_plan(config: &StackConfig) -> Vec<Step> {
    vec![
        Step::new("check-maven", build_argv(&config.tools.mvn, &["--version"]))
            .title("Checking Maven installation")
            .show_output(),
        Step::new("clean", build_argv(&config.tools.mvn, &["clean"]))
            .title("Cleaning previous build")
            .in_dir(config.backend_path())
            .streamed(),
    ]
}

/// Step running the packaged jar in the foreground until it exits or the
/// operator interrupts it.
pub fn run_step(config: &StackConfig, jar: &Path) -> Step {
    let jar_arg = jar.to_string_lossy().into_owned();
    Step::new(
        "run-backend",
        build_argv(&config.tools.java, &["-jar", jar_arg.as_str()]),
    )
    .title("Starting backend application")
    .in_dir(config.backend_path())
    .streamed()
}

/// Find the newest runnable jar under the Maven target directory.
///
/// Spring Boot repackaging leaves the thin `original-*.jar` behind; only
/// the repackaged artifact is runnable.
pub fn find_runnable_jar(target_dir: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(target_dir).map_err(|_| QuizctlError::JarNotFound {
        dir: target_dir.to_path_buf(),
    })?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jar") {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if name.starts_with("original-") {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if newest.as_ref().map_or(true, |(best, _)| modified > *best) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| QuizctlError::JarNotFound {
            dir: target_dir.to_path_buf(),
        })
}

/// Platform-appropriate Maven install guidance for when the tool is
/// missing.
pub fn maven_install_hint() -> &'static str {
    if cfg!(target_os = "windows") {
        "Install Maven:\n  choco install maven\n  or download from https://maven.apache.org/download.cgi"
    } else if cfg!(target_os = "macos") {
        "Install Maven:\n  brew install maven"
    } else {
        "Install Maven:\n  sudo apt install maven    (Debian/Ubuntu)\n  sudo yum install maven    (CentOS/RHEL)\n  or download from https://maven.apache.org/download.cgi"
    }
}
