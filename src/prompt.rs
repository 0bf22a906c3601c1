//! Yes/no confirmation prompts.
//!
//! Section resolution may ask the user whether to create a missing section.
//! The question goes through the [`Confirm`] trait so that non-interactive
//! runs and tests can answer without a terminal.

use crate::errors::AppResult;
use std::io::{self, BufRead, Write};

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Returns the user's answer, or `default` when they just press Enter.
    fn confirm(&self, prompt: &str, default: bool) -> AppResult<bool>;
}

/// Answers every question with its default, without prompting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Confirm for NonInteractive {
    fn confirm(&self, _prompt: &str, default: bool) -> AppResult<bool> {
        Ok(default)
    }
}

/// Prompts on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str, default: bool) -> AppResult<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stderr();
        ask(prompt, default, &mut input, &mut output)
    }
}

/// Asks until a recognizable answer is given. End of input counts as the default.
pub fn ask<R: BufRead, W: Write>(
    question: &str,
    default: bool,
    input: &mut R,
    output: &mut W,
) -> AppResult<bool> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };

    loop {
        write!(output, "{}? {} ", question.trim_end_matches('?'), suffix)?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(default);
        }

        match answer.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer yes or no.")?,
        }
    }
}
