//! Question schema handed to a prompter.
//!
//! A convention describes what to ask; the prompter decides how to render it.
//! Filters are pure functions so conventions can reject input without any
//! knowledge of the terminal.

use crate::core::answers::AnswerKey;

/// Normalises raw text input, or rejects it with a user-facing message.
pub type InputFilter = fn(&str) -> Result<String, String>;

/// One selectable option of a [`QuestionKind::Select`] question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value stored as the answer.
    pub value: String,
    /// Label shown to the user.
    pub name: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one of a fixed list of choices.
    Select(Vec<Choice>),
    /// Free text (may be empty unless the filter rejects it).
    Text,
    /// Yes/no.
    Confirm { default: bool },
}

#[derive(Debug, Clone)]
pub struct Question {
    pub key: AnswerKey,
    pub message: String,
    pub kind: QuestionKind,
    pub filter: Option<InputFilter>,
}

impl Question {
    pub fn select(key: AnswerKey, message: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Select(choices),
            filter: None,
        }
    }

    pub fn text(key: AnswerKey, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Text,
            filter: None,
        }
    }

    pub fn confirm(key: AnswerKey, message: impl Into<String>, default: bool) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Confirm { default },
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: InputFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Run the question's filter over `input`; unfiltered questions pass it through.
    pub fn apply_filter(&self, input: &str) -> Result<String, String> {
        match self.filter {
            Some(filter) => filter(input),
            None => Ok(input.to_string()),
        }
    }
}
