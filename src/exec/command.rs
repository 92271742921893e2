//! External command execution.
//!
//! Commands are argv token vectors run directly, never through a shell:
//! the first token is the executable, the rest are its arguments. A missing
//! executable is reported as [`QuizctlError::ToolMissing`] so callers can
//! distinguish "tool not installed" from "tool ran and failed".

use crate::error::{QuizctlError, Result};
use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty when not captured).
    pub stdout: String,

    /// Standard error (empty when not captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stdout and stderr joined in that order, trimmed of trailing whitespace.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text.trim_end().to_string()
    }

    /// First non-empty line of the combined output, if any.
    pub fn first_line(&self) -> Option<String> {
        self.combined()
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(ToString::to_string)
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with the process env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            env: HashMap::new(),
            capture_stdout: true,
            capture_stderr: true,
        }
    }
}

impl CommandOptions {
    /// Options that leave all stdio attached to the terminal.
    pub fn inherited() -> Self {
        Self {
            capture_stdout: false,
            capture_stderr: false,
            ..Self::default()
        }
    }
}

/// Render an argv vector as a display string, quoting tokens with spaces.
pub fn command_line(argv: &[String]) -> String {
    argv.iter()
        .map(|tok| {
            if tok.contains(char::is_whitespace) || tok.is_empty() {
                format!("\"{}\"", tok)
            } else {
                tok.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_error(argv: &[String], err: &std::io::Error) -> QuizctlError {
    if err.kind() == std::io::ErrorKind::NotFound {
        QuizctlError::ToolMissing {
            tool: argv[0].clone(),
            message: format!("command not found: {}", argv[0]),
        }
    } else {
        QuizctlError::CommandFailed {
            command: command_line(argv),
            code: None,
        }
    }
}

fn build_command(argv: &[String], options: &CommandOptions) -> Result<Command> {
    if argv.is_empty() {
        return Err(QuizctlError::ConfigError {
            message: "empty command line".into(),
        });
    }

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    Ok(cmd)
}

/// Execute a command, waiting for it to finish.
///
/// Stdin is closed; stdout/stderr are captured or inherited per the
/// options. A non-zero exit is a normal `Ok` result with `success == false`;
/// only failure to launch the process is an `Err`.
pub fn execute(argv: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = build_command(argv, options)?;
    cmd.stdin(Stdio::null());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| spawn_error(argv, &e))?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command with all stdio attached to the terminal.
///
/// Used for foreground takeovers where the child owns the session until it
/// exits or the operator interrupts: `docker login` password prompts,
/// `docker-compose logs -f`, running the packaged application.
pub fn execute_interactive(argv: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = build_command(argv, options)?;
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    let status = cmd.status().map_err(|e| spawn_error(argv, &e))?;

    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(String::new(), String::new(), duration))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            String::new(),
            String::new(),
            duration,
        ))
    }
}

/// Execute a command with both streams captured and the default options.
pub fn execute_quiet(argv: &[String], cwd: Option<&std::path::Path>) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        ..Default::default()
    };
    execute(argv, &options)
}
