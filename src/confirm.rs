use std::io::{self, Write};

/// Synchronous yes/no question asked before destructive actions.
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers yes without asking (`--yes`).
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Line based confirmation on stdin for the non-interactive commands.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N]: ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        is_yes(&input)
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
