//! Ordered, fail-fast execution of external-command plans.

pub mod outcome;
pub mod runner;
pub mod step;

pub use outcome::{format_duration, SequenceOutcome, SequenceState, StepResult};
pub use runner::{run_plan, CommandRunner, Delay, ProcessRunner, Sequencer, SystemDelay};
pub use step::{Pause, Step};
