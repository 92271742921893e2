//! Sequence execution.
//!
//! The [`Sequencer`] runs an ordered plan of [`Step`]s strictly one after
//! another, fail-fast: the first failure of a non-best-effort step stops the
//! run. Best-effort failures are recorded and the run continues. Results are
//! append-only; nothing is retried and nothing is rolled back, so partial
//! effects of earlier steps (started containers, written files) are left
//! as-is for the operator.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::Result;
use crate::exec::{self, CommandOptions, CommandResult};
use crate::ui::Reporter;

use super::outcome::{SequenceOutcome, StepResult};
use super::step::Step;

/// Launches a step's external command and waits for it.
///
/// The seam exists so sequence logic can be exercised without spawning
/// processes; [`ProcessRunner`] is the real implementation.
pub trait CommandRunner {
    fn run(&self, step: &Step) -> Result<CommandResult>;
}

/// Runs steps as real child processes.
///
/// Captured steps get a closed stdin; streamed steps inherit the full
/// terminal so children that prompt (`docker login`) or run until
/// interrupted (`java -jar`) behave normally.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, step: &Step) -> Result<CommandResult> {
        let options = CommandOptions {
            cwd: step.cwd.clone(),
            env: step.env.clone(),
            capture_stdout: step.capture,
            capture_stderr: step.capture,
        };
        if step.capture {
            exec::execute(&step.command, &options)
        } else {
            exec::execute_interactive(&step.command, &options)
        }
    }
}

/// Fixed-sleep facility used between steps.
pub trait Delay {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the current thread.
pub struct SystemDelay;

impl Delay for SystemDelay {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Runs step plans in declaration order with fail-fast semantics.
pub struct Sequencer<'a> {
    runner: &'a dyn CommandRunner,
    delay: &'a dyn Delay,
}

impl<'a> Sequencer<'a> {
    /// Create a sequencer over the given collaborators.
    pub fn new(runner: &'a dyn CommandRunner, delay: &'a dyn Delay) -> Self {
        Self { runner, delay }
    }

    /// Execute the plan and collect an outcome.
    ///
    /// Every step that runs contributes exactly one result, in order. A
    /// failed launch (missing executable) and a non-zero exit are both
    /// recorded as failed results; the distinction survives in the result's
    /// output text.
    pub fn run(&self, steps: &[Step], reporter: &mut dyn Reporter) -> SequenceOutcome {
        let start = Instant::now();
        let total = steps.len();
        let mut results = Vec::with_capacity(total);
        let mut halted_early = false;

        for (index, step) in steps.iter().enumerate() {
            debug!(
                "running step '{}': {}",
                step.name,
                exec::command_line(&step.command)
            );
            reporter.step_started(step, index, total);

            let launch = Instant::now();
            let result = match self.runner.run(step) {
                Ok(cmd) if cmd.success => StepResult::success(step, cmd.combined(), cmd.duration),
                Ok(cmd) => StepResult::failure(step, cmd.combined(), cmd.exit_code, cmd.duration),
                Err(e) => {
                    warn!("step '{}' could not run: {}", step.name, e);
                    StepResult::failure(step, e.to_string(), None, launch.elapsed())
                }
            };

            reporter.step_finished(step, &result);

            let failed = !result.succeeded;
            results.push(result);

            if failed && !step.best_effort {
                halted_early = true;
                break;
            }

            if let Some(pause) = &step.pause_after {
                reporter.pausing(pause.duration, &pause.reason);
                self.delay.sleep(pause.duration);
            }
        }

        SequenceOutcome {
            results,
            halted_early,
            duration: start.elapsed(),
        }
    }
}

/// Run a plan with the real process runner and system sleeps.
pub fn run_plan(steps: &[Step], reporter: &mut dyn Reporter) -> SequenceOutcome {
    let runner = ProcessRunner;
    let delay = SystemDelay;
    Sequencer::new(&runner, &delay).run(steps, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizctlError;
    use crate::ui::RecordingReporter;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Pops scripted results in order and records which steps were launched.
    struct ScriptedRunner {
        script: RefCell<VecDeque<Result<CommandResult>>>,
        launched: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(script: Vec<Result<CommandResult>>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                launched: RefCell::new(Vec::new()),
            }
        }

        fn launched(&self) -> Vec<String> {
            self.launched.borrow().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, step: &Step) -> Result<CommandResult> {
            self.launched.borrow_mut().push(step.name.clone());
            self.script
                .borrow_mut()
                .pop_front()
                .expect("script exhausted")
        }
    }

    /// Records requested sleeps without sleeping.
    struct RecordingDelay {
        slept: RefCell<Vec<Duration>>,
    }

    impl RecordingDelay {
        fn new() -> Self {
            Self {
                slept: RefCell::new(Vec::new()),
            }
        }
    }

    impl Delay for RecordingDelay {
        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    fn cmd_ok(output: &str) -> Result<CommandResult> {
        Ok(CommandResult::success(
            output.to_string(),
            String::new(),
            Duration::from_millis(3),
        ))
    }

    fn cmd_fail(code: i32, output: &str) -> Result<CommandResult> {
        Ok(CommandResult::failure(
            Some(code),
            String::new(),
            output.to_string(),
            Duration::from_millis(3),
        ))
    }

    fn plain_step(name: &str) -> Step {
        Step::new(name, ["tool", "arg"])
    }

    fn run_scripted(
        steps: &[Step],
        script: Vec<Result<CommandResult>>,
    ) -> (SequenceOutcome, Vec<String>) {
        let runner = ScriptedRunner::new(script);
        let delay = RecordingDelay::new();
        let mut reporter = RecordingReporter::new();
        let outcome = Sequencer::new(&runner, &delay).run(steps, &mut reporter);
        (outcome, runner.launched())
    }

    #[test]
    fn all_ok_runs_every_step() {
        let steps = vec![plain_step("a"), plain_step("b"), plain_step("c")];
        let (outcome, launched) = run_scripted(
            &steps,
            vec![cmd_ok("one"), cmd_ok("two"), cmd_ok("three")],
        );

        assert!(!outcome.halted_early);
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.all_succeeded());
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(launched, vec!["a", "b", "c"]);
    }

    #[test]
    fn failure_halts_at_failing_step() {
        let steps = vec![plain_step("a"), plain_step("b"), plain_step("c")];
        let (outcome, launched) =
            run_scripted(&steps, vec![cmd_ok(""), cmd_fail(1, "broken"), cmd_ok("")]);

        assert!(outcome.halted_early);
        assert_eq!(outcome.results.len(), 2);
        let last = outcome.results.last().unwrap();
        assert!(!last.succeeded);
        assert!(!last.best_effort);
        assert_eq!(launched, vec!["a", "b"]);
    }

    #[test]
    fn later_steps_never_run_after_halt() {
        // [A ok, B ok, C fails, D ok] -> C halts, D never launches.
        let steps = vec![
            plain_step("a"),
            plain_step("b"),
            plain_step("c"),
            plain_step("d"),
        ];
        let (outcome, launched) = run_scripted(
            &steps,
            vec![cmd_ok(""), cmd_ok(""), cmd_fail(2, "nope"), cmd_ok("")],
        );

        assert!(outcome.halted_early);
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.results[0].succeeded);
        assert!(outcome.results[1].succeeded);
        assert!(!outcome.results[2].succeeded);
        assert_eq!(outcome.halted_at().map(|r| r.name.as_str()), Some("c"));
        assert!(!launched.contains(&"d".to_string()));
    }

    #[test]
    fn best_effort_failure_continues() {
        let steps = vec![
            plain_step("a"),
            plain_step("pull").best_effort(),
            plain_step("c"),
        ];
        let (outcome, launched) = run_scripted(
            &steps,
            vec![cmd_ok(""), cmd_fail(1, "no remote"), cmd_ok("")],
        );

        assert!(!outcome.halted_early);
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.results[0].succeeded);
        assert!(!outcome.results[1].succeeded);
        assert!(outcome.results[2].succeeded);
        assert_eq!(launched, vec!["a", "pull", "c"]);
        // A recorded failure still fails the run as a whole.
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn empty_plan_completes_immediately() {
        let (outcome, launched) = run_scripted(&[], vec![]);

        assert!(!outcome.halted_early);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.exit_code(), 0);
        assert!(launched.is_empty());
    }

    #[test]
    fn missing_tool_is_a_failed_result() {
        let steps = vec![plain_step("check-docker"), plain_step("next")];
        let (outcome, launched) = run_scripted(
            &steps,
            vec![
                Err(QuizctlError::ToolMissing {
                    tool: "docker".into(),
                    message: "command not found: docker".into(),
                }),
                cmd_ok(""),
            ],
        );

        assert!(outcome.halted_early);
        assert_eq!(outcome.results.len(), 1);
        assert!(!outcome.results[0].succeeded);
        assert!(outcome.results[0].output.contains("command not found"));
        assert_eq!(launched, vec!["check-docker"]);
    }

    #[test]
    fn pause_runs_through_delay() {
        let steps = vec![
            plain_step("start").pause_after(Duration::from_secs(10), "warming up"),
            plain_step("probe"),
        ];
        let runner = ScriptedRunner::new(vec![cmd_ok(""), cmd_ok("")]);
        let delay = RecordingDelay::new();
        let mut reporter = RecordingReporter::new();

        let outcome = Sequencer::new(&runner, &delay).run(&steps, &mut reporter);

        assert!(outcome.success());
        assert_eq!(*delay.slept.borrow(), vec![Duration::from_secs(10)]);
        assert!(reporter
            .lines()
            .iter()
            .any(|l| l.contains("warming up")));
    }

    #[test]
    fn no_pause_after_halting_failure() {
        let steps = vec![plain_step("start").pause_after(Duration::from_secs(10), "warming up")];
        let runner = ScriptedRunner::new(vec![cmd_fail(1, "boom")]);
        let delay = RecordingDelay::new();
        let mut reporter = RecordingReporter::new();

        let outcome = Sequencer::new(&runner, &delay).run(&steps, &mut reporter);

        assert!(outcome.halted_early);
        assert!(delay.slept.borrow().is_empty());
    }

    #[test]
    fn reporter_sees_each_step_once() {
        let steps = vec![plain_step("a"), plain_step("b")];
        let runner = ScriptedRunner::new(vec![cmd_ok(""), cmd_fail(1, "x")]);
        let delay = RecordingDelay::new();
        let mut reporter = RecordingReporter::new();

        Sequencer::new(&runner, &delay).run(&steps, &mut reporter);

        assert_eq!(reporter.started(), vec!["a", "b"]);
        assert_eq!(reporter.finished(), vec!["a", "b"]);
    }

    #[test]
    fn real_processes_run_through_process_runner() {
        let step = if cfg!(target_os = "windows") {
            Step::new("hello", ["cmd", "/C", "echo hello"])
        } else {
            Step::new("hello", ["echo", "hello"])
        };

        let mut reporter = RecordingReporter::new();
        let outcome = run_plan(&[step], &mut reporter);

        assert!(outcome.success());
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].output.contains("hello"));
    }

    #[test]
    fn real_missing_executable_halts() {
        let steps = vec![
            Step::new("absent", ["quizctl-test-no-such-tool"]),
            Step::new("after", ["echo", "unreachable"]),
        ];

        let mut reporter = RecordingReporter::new();
        let outcome = run_plan(&steps, &mut reporter);

        assert!(outcome.halted_early);
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].output.contains("quizctl-test-no-such-tool"));
    }
}
