//! Message composition: answers + convention -> final commit message.

use crate::conventions::Convention;
use crate::core::answers::AnswerSet;

/// Compose the final commit message.
///
/// The convention owns the layout entirely; the full answer set is handed over
/// unmodified and its output is returned as-is.
pub fn compose(answers: &AnswerSet, convention: &dyn Convention) -> String {
    convention.format(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::ConventionalCommits;
    use crate::core::questions::Question;

    /// Echoes a fixed rendering so the test can check nothing is added around it.
    struct Literal;

    impl Convention for Literal {
        fn name(&self) -> &'static str {
            "literal"
        }
        fn questions(&self) -> Vec<Question> {
            Vec::new()
        }
        fn format(&self, answers: &AnswerSet) -> String {
            format!(
                "{}|{:?}|{}|{}|{:?}|{:?}",
                answers.prefix,
                answers.scope,
                answers.subject,
                answers.is_breaking_change,
                answers.body,
                answers.footer
            )
        }
        fn example(&self) -> &'static str {
            ""
        }
        fn schema(&self) -> &'static str {
            ""
        }
        fn info(&self) -> &'static str {
            ""
        }
    }

    #[test]
    fn compose_returns_convention_output_verbatim() {
        let answers = AnswerSet::new("fix", "typo")
            .with_scope("docs")
            .breaking(true)
            .with_footer("old flag removed");
        assert_eq!(
            compose(&answers, &Literal),
            "fix|Some(\"docs\")|typo|true|None|Some(\"old flag removed\")"
        );
    }

    #[test]
    fn compose_is_deterministic() {
        let answers = AnswerSet::new("feat", "user created").with_body("closes #21");
        let first = compose(&answers, &ConventionalCommits);
        let second = compose(&answers, &ConventionalCommits);
        assert_eq!(first, second);
        assert_eq!(first, "feat: user created\n\ncloses #21");
    }
}
