//! Console reporter.

use console::Term;
use std::io::Write;
use std::time::Duration;

use crate::exec::command_line;
use crate::sequence::{format_duration, Step, StepResult};

use super::{should_use_colors, OutputMode, ProgressSpinner, QuizctlTheme, Reporter};

/// Longest output tail echoed after a failed step.
const MAX_OUTPUT_LINES: usize = 20;

/// Reporter that writes to the terminal.
///
/// While a captured step runs on a real terminal a spinner is shown; streamed
/// steps inherit the terminal, so their progress line is printed once and the
/// command's own output follows.
pub struct ConsoleReporter {
    term: Term,
    theme: QuizctlTheme,
    mode: OutputMode,
    spinner: Option<ProgressSpinner>,
}

impl ConsoleReporter {
    /// Create a console reporter, picking colors from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            QuizctlTheme::new()
        } else {
            QuizctlTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            spinner: None,
        }
    }

    /// Create a console reporter without colors.
    pub fn plain(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: QuizctlTheme::plain(),
            mode,
            spinner: None,
        }
    }

    fn step_label(&self, step: &Step, index: usize, total: usize) -> String {
        format!(
            "{} {}",
            self.theme
                .step_number
                .apply_to(format!("[{}/{}]", index + 1, total)),
            self.theme.step_title.apply_to(&step.title)
        )
    }

    fn success_line(&self, step: &Step, result: &StepResult) -> String {
        format!(
            "{} {}",
            self.theme.format_success(&step.title),
            self.theme
                .duration
                .apply_to(format!("({})", format_duration(result.duration)))
        )
    }

    fn finish_spinner(&mut self) -> Option<ProgressSpinner> {
        self.spinner.take()
    }

    fn echo_output_tail(&mut self, output: &str) {
        for line in output_tail(output, MAX_OUTPUT_LINES) {
            writeln!(self.term, "    {}", line).ok();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn info(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_info(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn key_value(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_key_value(key, value)).ok();
        }
    }

    fn step_started(&mut self, step: &Step, index: usize, total: usize) {
        if !self.mode.shows_steps() {
            return;
        }

        let label = self.step_label(step, index, total);
        // A spinner over a streamed step would fight the child for the
        // terminal, so only captured steps get one.
        if step.capture && self.term.is_term() && !self.mode.shows_command_output() {
            self.spinner = Some(ProgressSpinner::new(&format!("{}...", label)));
        } else {
            writeln!(self.term, "{}", label).ok();
        }
    }

    fn step_finished(&mut self, step: &Step, result: &StepResult) {
        let spinner = self.finish_spinner();

        if result.succeeded {
            if !self.mode.shows_steps() {
                if let Some(spinner) = spinner {
                    spinner.clear();
                }
                return;
            }
            let line = self.success_line(step, result);
            match spinner {
                Some(spinner) => {
                    spinner.clear();
                    writeln!(self.term, "{}", line).ok();
                }
                None => {
                    writeln!(self.term, "{}", line).ok();
                }
            }
            if self.mode.shows_command_output() {
                self.echo_output_tail(&result.output);
            } else if step.show_output {
                if let Some(first) = result.output.lines().find(|l| !l.trim().is_empty()) {
                    writeln!(self.term, "    {}", self.theme.dim.apply_to(first.trim())).ok();
                }
            }
            return;
        }

        if result.best_effort {
            if let Some(spinner) = spinner {
                spinner.clear();
            }
            if self.mode.shows_status() {
                writeln!(
                    self.term,
                    "{}",
                    self.theme
                        .format_warning(&format!("{} failed (continuing)", step.title))
                )
                .ok();
                if self.mode.shows_command_output() {
                    self.echo_output_tail(&result.output);
                }
            }
            return;
        }

        if let Some(spinner) = spinner {
            spinner.clear();
        }
        let code = result
            .exit_code
            .map(|c| format!(" (exit code {})", c))
            .unwrap_or_default();
        writeln!(
            self.term,
            "{}",
            self.theme
                .format_error(&format!("{} failed{}", step.title, code))
        )
        .ok();
        self.echo_output_tail(&result.output);
        writeln!(
            self.term,
            "    {}",
            self.theme
                .command
                .apply_to(format!("Command: {}", command_line(&step.command)))
        )
        .ok();
    }

    fn pausing(&mut self, duration: Duration, reason: &str) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "{}",
                self.theme
                    .format_info(&format!("Waiting {} ({})", format_duration(duration), reason))
            )
            .ok();
        }
    }
}

fn output_tail(output: &str, max_lines: usize) -> Vec<&str> {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].to_vec()
}
