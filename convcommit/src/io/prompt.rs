//! Prompting for commit answers.
//!
//! The [`Prompter`] trait decouples the commit workflow from the terminal.
//! [`TerminalPrompter`] renders questions with `dialoguer`; tests use scripted
//! prompters that return predetermined answers.

use anyhow::{Context, Result, anyhow};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use crate::core::answers::{AnswerSet, AnswerValue, RawAnswers};
use crate::core::questions::{Question, QuestionKind};

/// Result of asking the convention's questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// All questions answered and accepted.
    Answered(AnswerSet),
    /// The user aborted before answering everything.
    Cancelled,
    /// The convention rejected an answer; carries its user-facing message.
    Rejected(String),
}

/// A single raw reading for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Text(String),
    Flag(bool),
    Cancelled,
}

pub trait Prompter {
    /// Ask `questions` in order and build the answer set.
    fn ask(&self, questions: &[Question]) -> Result<PromptOutcome>;
}

/// Ask each question through `read`, applying filters as answers arrive.
///
/// Stops at the first cancellation or rejection. Answers that pass every filter
/// but still cannot form an [`AnswerSet`] mean the convention's questions are
/// incomplete, which is reported as an error rather than a rejection.
pub fn collect_answers<F>(questions: &[Question], mut read: F) -> Result<PromptOutcome>
where
    F: FnMut(&Question) -> Result<RawInput>,
{
    let mut raw = RawAnswers::new();
    for question in questions {
        let value = match read(question)? {
            RawInput::Cancelled => {
                debug!(key = %question.key, "prompt cancelled");
                return Ok(PromptOutcome::Cancelled);
            }
            RawInput::Flag(flag) => AnswerValue::Flag(flag),
            RawInput::Text(text) => match question.apply_filter(&text) {
                Ok(filtered) => AnswerValue::Text(filtered),
                Err(message) => {
                    debug!(key = %question.key, "answer rejected by convention");
                    return Ok(PromptOutcome::Rejected(message));
                }
            },
        };
        raw.insert(question.key, value);
    }
    let answers = AnswerSet::from_raw(&raw).context("convention questions are incomplete")?;
    Ok(PromptOutcome::Answered(answers))
}

/// Interactive prompter backed by the terminal.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, question: &Question) -> Result<RawInput> {
        match &question.kind {
            QuestionKind::Select(choices) => {
                let labels: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(question.message.as_str())
                    .items(&labels)
                    .default(0)
                    .interact_opt()
                    .with_context(|| format!("prompt for {}", question.key))?;
                match picked {
                    Some(index) => {
                        let choice = choices
                            .get(index)
                            .ok_or_else(|| anyhow!("selection {index} out of range"))?;
                        Ok(RawInput::Text(choice.value.clone()))
                    }
                    None => Ok(RawInput::Cancelled),
                }
            }
            QuestionKind::Text => {
                let text = Input::<String>::with_theme(&self.theme)
                    .with_prompt(question.message.as_str())
                    .allow_empty(true)
                    .interact_text()
                    .with_context(|| format!("prompt for {}", question.key))?;
                Ok(RawInput::Text(text))
            }
            QuestionKind::Confirm { default } => {
                let answer = Confirm::with_theme(&self.theme)
                    .with_prompt(question.message.as_str())
                    .default(*default)
                    .interact_opt()
                    .with_context(|| format!("prompt for {}", question.key))?;
                Ok(answer.map_or(RawInput::Cancelled, RawInput::Flag))
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, questions: &[Question]) -> Result<PromptOutcome> {
        collect_answers(questions, |question| self.read(question))
    }
}
