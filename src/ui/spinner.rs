//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A progress spinner shown while a captured step runs.
///
/// The spinner is transient: the reporter clears it before printing the
/// step's result line, so the final output never goes through the bar.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Clear the spinner without printing a final line.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_clears_without_panicking() {
        let spinner = ProgressSpinner::new("Checking Docker installation...");
        spinner.clear();
    }
}
