//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input};

use crate::error::{QuizctlError, Result};

/// Convert dialoguer errors to QuizctlError.
fn map_dialoguer_err(e: dialoguer::Error) -> QuizctlError {
    QuizctlError::Io(e.into())
}

/// Check whether interactive prompts can be shown at all.
pub fn can_prompt() -> bool {
    Term::stdout().is_term()
}

/// Ask a yes/no question on the terminal.
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    let term = Term::stdout();
    let answer = Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact_on(&term)
        .map_err(map_dialoguer_err)?;

    Ok(answer)
}

/// Ask for a line of text, offering a default the operator can accept with
/// Enter.
pub fn input(question: &str, default: &str) -> Result<String> {
    let term = Term::stdout();
    let answer = Input::<String>::new()
        .with_prompt(question)
        .default(default.to_string())
        .interact_on(&term)
        .map_err(map_dialoguer_err)?;

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_prompt_does_not_panic() {
        // In CI stdout is a pipe, on a dev machine it's a TTY; both are valid.
        let _ = can_prompt();
    }
}
