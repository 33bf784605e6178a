//! ## groundctl-engine::prompt
//! Operator prompts behind a trait so the menus can be driven without a
//! terminal.
//!
//! [`DialoguerPrompter`] renders arrow-key lists and validated text inputs.
//! `ScriptedPrompter` (`test-util` feature) answers from a queue and records
//! what it was asked.

#[cfg(any(test, feature = "test-util"))]
use std::collections::VecDeque;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use thiserror::Error;

use groundctl_core::InputKind;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),

    #[error("no scripted answer left for prompt: {0}")]
    Exhausted(String),

    #[error("scripted answer {choice:?} matches no item of prompt {prompt:?}")]
    UnknownChoice { prompt: String, choice: String },
}

/// Source of operator answers.
pub trait Prompter {
    /// Pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Free text, re-asked until it passes `kind`.
    fn input(&mut self, prompt: &str, kind: InputKind) -> Result<String, PromptError>;
}

/// Interactive terminal prompts.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn input(&mut self, prompt: &str, kind: InputKind) -> Result<String, PromptError> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(move |value: &String| -> Result<(), String> {
                kind.check(value).map_err(|e| e.to_string())
            })
            .interact_text()?;
        Ok(answer)
    }
}

/// Answers prompts from a fixed script.
///
/// A select answer matches the first item equal to it, then the first item
/// starting with it. Input answers failing validation are recorded as
/// rejections and the next answer is tried, the way a terminal re-asks.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    rejections: Vec<String>,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every prompt shown, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Validation messages produced by rejected input answers.
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    /// Answers never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::Exhausted(prompt.to_string()))
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        self.prompts.push(prompt.to_string());
        let choice = self.next_answer(prompt)?;

        items
            .iter()
            .position(|item| *item == choice)
            .or_else(|| items.iter().position(|item| item.starts_with(&choice)))
            .ok_or_else(|| PromptError::UnknownChoice {
                prompt: prompt.to_string(),
                choice,
            })
    }

    fn input(&mut self, prompt: &str, kind: InputKind) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        loop {
            let answer = self.next_answer(prompt)?;
            match kind.check(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => self.rejections.push(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_prefers_exact_then_prefix() {
        let mut p = ScriptedPrompter::new(["Ohio", "Ohio (us"]);
        let list = items(&["Ohio (us-east-2)", "Ohio"]);
        assert_eq!(p.select("region?", &list).unwrap(), 1);
        assert_eq!(p.select("region?", &list).unwrap(), 0);
    }

    #[test]
    fn unknown_choice_is_an_error() {
        let mut p = ScriptedPrompter::new(["Mars"]);
        let err = p.select("region?", &items(&["Ohio"])).unwrap_err();
        assert!(matches!(err, PromptError::UnknownChoice { .. }));
    }

    #[test]
    fn input_skips_rejected_answers() {
        let mut p = ScriptedPrompter::new(["0", "301", "90"]);
        let answer = p.input("duration?", InputKind::Duration).unwrap();
        assert_eq!(answer, "90");
        assert_eq!(p.rejections().len(), 2);
        assert_eq!(p.prompts(), ["duration?".to_string()]);
    }

    #[test]
    fn running_out_of_answers() {
        let mut p = ScriptedPrompter::new(["x"]);
        let err = p.input("eirp?", InputKind::UplinkEirp).unwrap_err();
        assert!(matches!(err, PromptError::Exhausted(_)));
        assert_eq!(p.remaining(), 0);
    }
}
