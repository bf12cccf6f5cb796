//! Pluggable commit-message conventions.
//!
//! A [`Convention`] supplies the questions to ask and turns the resulting
//! [`AnswerSet`] into the final message. The active convention is picked once at
//! startup through [`by_name`].

use crate::core::answers::AnswerSet;
use crate::core::questions::Question;

mod conventional;

pub use conventional::ConventionalCommits;

/// Name of the convention used when none is configured.
pub const DEFAULT_CONVENTION: &str = ConventionalCommits::NAME;

pub trait Convention {
    /// Registry name (used by `--name` and the `name` config key).
    fn name(&self) -> &'static str;
    /// Questions to ask, in order.
    fn questions(&self) -> Vec<Question>;
    /// Render the final commit message.
    fn format(&self, answers: &AnswerSet) -> String;
    fn example(&self) -> &'static str;
    fn schema(&self) -> &'static str;
    fn info(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConventionError {
    #[error("unknown convention '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}

/// Names of all registered conventions, sorted.
pub fn available() -> Vec<&'static str> {
    vec![ConventionalCommits::NAME]
}

/// Look up a convention by registry name.
pub fn by_name(name: &str) -> Result<Box<dyn Convention>, ConventionError> {
    match name {
        ConventionalCommits::NAME => Ok(Box::new(ConventionalCommits)),
        _ => Err(ConventionError::Unknown {
            name: name.to_string(),
            available: available().join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_resolves_default() {
        let convention = by_name(DEFAULT_CONVENTION).expect("default convention");
        assert_eq!(convention.name(), "cz_conventional_commits");
    }

    #[test]
    fn by_name_lists_available_on_unknown() {
        let err = by_name("cz_nope").err().expect("unknown name");
        assert_eq!(
            err.to_string(),
            "unknown convention 'cz_nope' (available: cz_conventional_commits)"
        );
    }
}
