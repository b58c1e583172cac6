//! Interactive prompts.
//!
//! The add and delete flows read user input only through `Prompter`, so they
//! can be driven by `ScriptedPrompter` in tests and by `TermPrompter` on a
//! terminal. `None` from either method means the user cancelled.

use crate::error::{AppError, AppResult};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::collections::VecDeque;
use std::io;

/// Source of interactive answers.
pub trait Prompter {
    /// Ask for one line of text. `None` on cancel (Ctrl+D, Ctrl+C, Esc).
    fn input(&mut self, prompt: &str) -> AppResult<Option<String>>;

    /// Pick one of `items`, returning its index. `None` on cancel.
    fn select(&mut self, prompt: &str, items: &[String]) -> AppResult<Option<usize>>;
}

/// Prompter on the controlling terminal.
pub struct TermPrompter {
    theme: ColorfulTheme,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn input(&mut self, prompt: &str) -> AppResult<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(text) => Ok(Some(text.trim().to_string())),
            Err(dialoguer::Error::IO(e)) if is_cancel(&e) => Ok(None),
            Err(e) => Err(prompt_error(e)),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> AppResult<Option<usize>> {
        let answer = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt();

        match answer {
            Ok(choice) => Ok(choice),
            Err(dialoguer::Error::IO(e)) if is_cancel(&e) => Ok(None),
            Err(e) => Err(prompt_error(e)),
        }
    }
}

fn is_cancel(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
    )
}

fn prompt_error(e: dialoguer::Error) -> AppError {
    match e {
        dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::NotConnected => {
            AppError::Prompt("an interactive terminal is required".to_string())
        }
        other => AppError::Prompt(other.to_string()),
    }
}

/// One scripted answer of `ScriptedPrompter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(usize),
    Cancel,
}

/// Prompter replaying canned answers, for tests.
///
/// Running out of answers behaves like a cancel.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> AppResult<Option<String>> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Text(text)) => Ok(Some(text)),
            Some(Answer::Cancel) | None => Ok(None),
            Some(other) => Err(AppError::Prompt(format!(
                "expected text for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> AppResult<Option<usize>> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Choice(index)) if index < items.len() => Ok(Some(index)),
            Some(Answer::Choice(index)) => Err(AppError::Prompt(format!(
                "choice {index} out of range for {} items",
                items.len()
            ))),
            Some(Answer::Cancel) | None => Ok(None),
            Some(other) => Err(AppError::Prompt(format!(
                "expected a choice for '{prompt}', got {other:?}"
            ))),
        }
    }
}
