//! Interactive prompts.
//!
//! Cancellation (ESC, Ctrl-C) is an ordinary outcome and surfaces as `None`.
use anyhow::Result;
use inquire::{InquireError, Select, Text};

/// Source of interactive answers.
pub trait Prompt: std::fmt::Debug {
    /// Ask the user to pick one of `labels`; returns the chosen index.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn select_one(&self, message: &str, labels: &[String]) -> Result<Option<usize>>;

    /// Ask the user for a line of free text. Blank input counts as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn text(&self, message: &str) -> Result<Option<String>>;
}

/// Terminal prompt backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn select_one(&self, message: &str, labels: &[String]) -> Result<Option<usize>> {
        let answer = Select::new(message, labels.to_vec())
            .with_starting_cursor(0)
            .with_page_size(10)
            .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
            .raw_prompt_skippable();
        Ok(cancelled_as_none(answer)?.flatten().map(|choice| choice.index))
    }

    fn text(&self, message: &str) -> Result<Option<String>> {
        let answer = Text::new(message).prompt_skippable();
        Ok(cancelled_as_none(answer)?
            .flatten()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}

/// Map Ctrl-C to `Ok(None)` alongside ESC.
fn cancelled_as_none<T>(answer: Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationInterrupted | InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Prompt with canned answers that records what it was asked.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    selection: Option<usize>,
    text: Option<String>,
    shown: std::sync::Mutex<Vec<Vec<String>>>,
    texts_asked: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl ScriptedPrompt {
    /// Answer every selection with `index`.
    #[must_use]
    pub fn selecting(index: usize) -> Self {
        Self {
            selection: Some(index),
            ..Self::default()
        }
    }

    /// Answer every text prompt with `text`.
    #[must_use]
    pub fn typing(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Label lists shown by each `select_one` call.
    pub fn selections_shown(&self) -> Vec<Vec<String>> {
        self.shown.lock().expect("prompt log poisoned").clone()
    }

    /// Number of `text` calls.
    pub fn texts_asked(&self) -> usize {
        self.texts_asked.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Prompt for ScriptedPrompt {
    fn select_one(&self, _message: &str, labels: &[String]) -> Result<Option<usize>> {
        self.shown
            .lock()
            .expect("prompt log poisoned")
            .push(labels.to_vec());
        Ok(self.selection)
    }

    fn text(&self, _message: &str) -> Result<Option<String>> {
        self.texts_asked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.text.clone())
    }
}
