//! Interactive prompting.
//!
//! A [`Prompter`] asks one question at a time and returns `None` when the
//! user cancels (closes input). [`Prompts`] wraps a prompter with the
//! optional [`AnswerStore`], which pre-fills keyed prompts with the answers
//! given on a previous run. Without a store, answers are simply not
//! remembered; the prompter itself never knows the difference.

pub mod answers;
pub mod terminal;

pub use answers::AnswerStore;
pub use terminal::{TerminalPrompter, parse_selection};

use std::io;

/// A free-text question.
#[derive(Debug, Clone, Default)]
pub struct TextPrompt<'a> {
    pub message: &'a str,

    /// Key under which the answer is remembered across runs.
    pub key: Option<&'a str>,

    /// Shown when the user submits an empty answer; the question repeats.
    /// Without it an empty answer yields `None`.
    pub required: Option<&'a str>,

    /// Answer used when the user submits nothing.
    pub initial: Option<String>,
}

impl<'a> TextPrompt<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            ..Self::default()
        }
    }

    pub fn key(mut self, key: &'a str) -> Self {
        self.key = Some(key);
        self
    }

    pub fn required(mut self, text: &'a str) -> Self {
        self.required = Some(text);
        self
    }

    pub fn initial(mut self, initial: Option<String>) -> Self {
        self.initial = initial;
        self
    }
}

/// One entry of a multi-select question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub selected: bool,
}

/// Capability for asking the user questions.
///
/// Every question returns `Ok(None)` when the user cancels.
pub trait Prompter {
    fn text(&mut self, prompt: &TextPrompt<'_>) -> io::Result<Option<String>>;

    /// Returns the indices of the chosen entries in ascending order.
    fn multiselect(&mut self, message: &str, choices: &[Choice]) -> io::Result<Option<Vec<usize>>>;

    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<Option<bool>>;

    /// Print an informational line.
    fn say(&mut self, message: &str);
}

/// A [`Prompter`] combined with the optional answer memo.
pub struct Prompts<P> {
    prompter: P,
    answers: Option<AnswerStore>,
}

impl<P: Prompter> Prompts<P> {
    pub fn new(prompter: P, answers: Option<AnswerStore>) -> Self {
        Self { prompter, answers }
    }

    /// Ask a text question, pre-filled from and recorded to the memo when
    /// the prompt has a key.
    pub fn text(&mut self, mut prompt: TextPrompt<'_>) -> io::Result<Option<String>> {
        if prompt.initial.is_none() {
            if let (Some(key), Some(store)) = (prompt.key, self.answers.as_ref()) {
                prompt.initial = store.get(key).map(str::to_string);
            }
        }

        let answer = self.prompter.text(&prompt)?;

        if let (Some(key), Some(value), Some(store)) =
            (prompt.key, answer.as_deref(), self.answers.as_mut())
        {
            if !value.is_empty() {
                if let Err(e) = store.remember(key, value) {
                    tracing::warn!("Failed to remember answer for {}: {:#}", key, e);
                }
            }
        }

        Ok(answer)
    }

    pub fn multiselect(&mut self, message: &str, choices: &[Choice]) -> io::Result<Option<Vec<usize>>> {
        self.prompter.multiselect(message, choices)
    }

    pub fn confirm(&mut self, message: &str, initial: bool) -> io::Result<Option<bool>> {
        self.prompter.confirm(message, initial)
    }

    pub fn say(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.prompter.say(message);
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn answers(&self) -> Option<&AnswerStore> {
        self.answers.as_ref()
    }
}
