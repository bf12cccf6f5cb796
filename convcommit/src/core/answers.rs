//! The structured answers collected for one commit attempt.

use std::collections::BTreeMap;
use std::fmt;

/// Recognized answer keys. The set is fixed; conventions only choose which
/// questions to ask and how to phrase them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnswerKey {
    Prefix,
    Scope,
    Subject,
    IsBreakingChange,
    Body,
    Footer,
}

impl AnswerKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Scope => "scope",
            Self::Subject => "subject",
            Self::IsBreakingChange => "is_breaking_change",
            Self::Body => "body",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single raw answer as returned by a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

/// Raw answers keyed by question, in stable key order.
pub type RawAnswers = BTreeMap<AnswerKey, AnswerValue>;

/// Reasons raw answers cannot form an [`AnswerSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("missing required answer '{0}'")]
    Missing(AnswerKey),
    #[error("answer '{0}' must not be empty")]
    Empty(AnswerKey),
    #[error("answer '{key}' has the wrong type (expected {expected})")]
    WrongType {
        key: AnswerKey,
        expected: &'static str,
    },
}

/// Answers for one commit attempt. Immutable once composed into a message.
///
/// Optional text fields never hold an empty string: blank answers are
/// normalised to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub prefix: String,
    pub scope: Option<String>,
    pub subject: String,
    pub is_breaking_change: bool,
    pub body: Option<String>,
    pub footer: Option<String>,
}

impl AnswerSet {
    /// Minimal answer set with only the required fields.
    pub fn new(prefix: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            scope: None,
            subject: subject.into(),
            is_breaking_change: false,
            body: None,
            footer: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = non_empty(scope.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = non_empty(body.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = non_empty(footer.into());
        self
    }

    pub fn breaking(mut self, is_breaking_change: bool) -> Self {
        self.is_breaking_change = is_breaking_change;
        self
    }

    /// Build an answer set from raw prompt answers.
    ///
    /// `prefix` and `subject` are required and must be non-empty. A missing
    /// `is_breaking_change` counts as `false`.
    pub fn from_raw(raw: &RawAnswers) -> Result<Self, AnswerError> {
        let prefix = required_text(raw, AnswerKey::Prefix)?;
        let subject = required_text(raw, AnswerKey::Subject)?;
        let is_breaking_change = match raw.get(&AnswerKey::IsBreakingChange) {
            None => false,
            Some(AnswerValue::Flag(flag)) => *flag,
            Some(AnswerValue::Text(_)) => {
                return Err(AnswerError::WrongType {
                    key: AnswerKey::IsBreakingChange,
                    expected: "a yes/no flag",
                });
            }
        };
        Ok(Self {
            prefix,
            scope: optional_text(raw, AnswerKey::Scope)?,
            subject,
            is_breaking_change,
            body: optional_text(raw, AnswerKey::Body)?,
            footer: optional_text(raw, AnswerKey::Footer)?,
        })
    }
}

fn required_text(raw: &RawAnswers, key: AnswerKey) -> Result<String, AnswerError> {
    optional_text(raw, key)?.ok_or_else(|| {
        if raw.contains_key(&key) {
            AnswerError::Empty(key)
        } else {
            AnswerError::Missing(key)
        }
    })
}

fn optional_text(raw: &RawAnswers, key: AnswerKey) -> Result<Option<String>, AnswerError> {
    match raw.get(&key) {
        None => Ok(None),
        Some(AnswerValue::Text(text)) => Ok(non_empty(text.clone())),
        Some(AnswerValue::Flag(_)) => Err(AnswerError::WrongType {
            key,
            expected: "text",
        }),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> AnswerValue {
        AnswerValue::Text(value.to_string())
    }

    #[test]
    fn from_raw_normalises_blank_optionals() {
        let raw = RawAnswers::from([
            (AnswerKey::Prefix, text("feat")),
            (AnswerKey::Scope, text("")),
            (AnswerKey::Subject, text("user created")),
            (AnswerKey::IsBreakingChange, AnswerValue::Flag(false)),
            (AnswerKey::Body, text("closes #21")),
            (AnswerKey::Footer, text("  ")),
        ]);

        let answers = AnswerSet::from_raw(&raw).expect("answers");
        assert_eq!(
            answers,
            AnswerSet::new("feat", "user created").with_body("closes #21")
        );
    }

    #[test]
    fn from_raw_requires_subject() {
        let raw = RawAnswers::from([(AnswerKey::Prefix, text("fix"))]);
        let err = AnswerSet::from_raw(&raw).unwrap_err();
        assert_eq!(err, AnswerError::Missing(AnswerKey::Subject));
    }

    #[test]
    fn from_raw_rejects_empty_prefix() {
        let raw = RawAnswers::from([
            (AnswerKey::Prefix, text("")),
            (AnswerKey::Subject, text("x")),
        ]);
        let err = AnswerSet::from_raw(&raw).unwrap_err();
        assert_eq!(err.to_string(), "answer 'prefix' must not be empty");
    }

    #[test]
    fn from_raw_rejects_text_for_breaking_flag() {
        let raw = RawAnswers::from([
            (AnswerKey::Prefix, text("fix")),
            (AnswerKey::Subject, text("x")),
            (AnswerKey::IsBreakingChange, text("yes")),
        ]);
        assert!(matches!(
            AnswerSet::from_raw(&raw),
            Err(AnswerError::WrongType {
                key: AnswerKey::IsBreakingChange,
                ..
            })
        ));
    }
}
