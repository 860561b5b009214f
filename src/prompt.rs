//! Operator interaction for the overwrite confirmation gate.

use crate::error::{Error, Result};
use console::Term;
use dialoguer::Input;
use std::io::{BufRead, Write};

/// Answers accepted as consent, compared case-insensitively.
const AFFIRMATIVE: [&str; 4] = ["y", "yes", "ok", "true"];

/// Trait for asking the operator a yes/no question.
pub trait Prompter {
    /// Asks `question` and blocks until one answer is available.
    ///
    /// # Returns
    /// * `Result<bool>` - Whether the answer was affirmative
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Returns true for `y`, `yes`, `ok` and `true` in any letter case.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    AFFIRMATIVE.iter().any(|accepted| answer.eq_ignore_ascii_case(accepted))
}

/// Line-based prompter over arbitrary streams.
///
/// Writes the question to `output` and reads a single line from `input`.
/// End of input counts as a negative answer.
pub struct LinePrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(is_affirmative(&answer))
    }
}

/// Terminal prompter backed by dialoguer, drawn on stdout.
pub struct DialoguerPrompter {
    term: Term,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer: String = Input::new()
            .with_prompt(format!("{question} [y/N]"))
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(|e| Error::PromptError(e.to_string()))?;

        Ok(is_affirmative(&answer))
    }
}
