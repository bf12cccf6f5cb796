//! The Conventional Commits convention (<https://www.conventionalcommits.org>).

use std::sync::LazyLock;

use regex::Regex;

use crate::conventions::Convention;
use crate::core::answers::{AnswerKey, AnswerSet};
use crate::core::questions::{Choice, Question};

const EXAMPLE: &str = "fix: correct minor typos in code\n\n\
see the issue for details on the typos fixed\n\n\
closes issue #12";

const SCHEMA: &str = "<type>(<scope>): <subject>\n\
<BLANK LINE>\n\
<body>\n\
<BLANK LINE>\n\
(BREAKING CHANGE: )<footer>";

const INFO: &str = "Conventional Commits is a lightweight convention on top of commit messages.\n\
It provides an easy set of rules for creating an explicit commit history,\n\
which makes it easier to write automated tools on top of.\n\n\
The commit message should be structured as follows:\n\n\
    <type>[optional scope]: <description>\n\n\
    [optional body]\n\n\
    [optional footer]\n\n\
- fix: patches a bug in your codebase (PATCH in semantic versioning).\n\
- feat: introduces a new feature to the codebase (MINOR in semantic versioning).\n\
- BREAKING CHANGE: a footer with this text introduces a breaking API change\n  \
(MAJOR in semantic versioning).\n\
- Other types such as docs, style, refactor, perf, test, build and ci are allowed.";

#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalCommits;

impl ConventionalCommits {
    pub const NAME: &'static str = "cz_conventional_commits";
}

impl Convention for ConventionalCommits {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn questions(&self) -> Vec<Question> {
        vec![
            Question::select(
                AnswerKey::Prefix,
                "Select the type of change you are committing",
                vec![
                    Choice::new("fix", "fix: A bug fix. Correlates with PATCH in SemVer"),
                    Choice::new("feat", "feat: A new feature. Correlates with MINOR in SemVer"),
                    Choice::new("docs", "docs: Documentation only changes"),
                    Choice::new(
                        "style",
                        "style: Changes that do not affect the meaning of the code \
                         (white-space, formatting, missing semi-colons, etc)",
                    ),
                    Choice::new(
                        "refactor",
                        "refactor: A code change that neither fixes a bug nor adds a feature",
                    ),
                    Choice::new("perf", "perf: A code change that improves performance"),
                    Choice::new("test", "test: Adding missing or correcting existing tests"),
                    Choice::new(
                        "build",
                        "build: Changes that affect the build system or external dependencies \
                         (example scopes: cargo, docker, npm)",
                    ),
                    Choice::new("ci", "ci: Changes to CI configuration files and scripts"),
                ],
            ),
            Question::text(
                AnswerKey::Scope,
                "Scope. Could be anything specifying place of the commit change (users, db, poll)",
            )
            .with_filter(parse_scope),
            Question::text(
                AnswerKey::Subject,
                "Subject. Concise description of the changes. Imperative, lower case and no final dot",
            )
            .with_filter(parse_subject),
            Question::confirm(
                AnswerKey::IsBreakingChange,
                "Is this a BREAKING CHANGE? Correlates with MAJOR in SemVer",
                false,
            ),
            Question::text(
                AnswerKey::Body,
                "Body. Motivation for the change and contrast this with previous behavior",
            ),
            Question::text(
                AnswerKey::Footer,
                "Footer. Information about Breaking Changes and reference issues that this commit closes",
            ),
        ]
    }

    fn format(&self, answers: &AnswerSet) -> String {
        let mut message = answers.prefix.clone();
        if let Some(scope) = &answers.scope {
            message.push_str(&format!("({scope})"));
        }
        message.push_str(": ");
        message.push_str(&answers.subject);

        if let Some(body) = &answers.body {
            message.push_str("\n\n");
            message.push_str(body);
        }

        let footer = match (&answers.footer, answers.is_breaking_change) {
            (Some(footer), true) => Some(format!("BREAKING CHANGE: {footer}")),
            (None, true) => Some("BREAKING CHANGE: ".to_string()),
            (Some(footer), false) => Some(footer.clone()),
            (None, false) => None,
        };
        if let Some(footer) = footer {
            message.push_str("\n\n");
            message.push_str(&footer);
        }
        message
    }

    fn example(&self) -> &'static str {
        EXAMPLE
    }

    fn schema(&self) -> &'static str {
        SCHEMA
    }

    fn info(&self) -> &'static str {
        INFO
    }
}

/// Trim the scope and join inner words with `-`.
fn parse_scope(input: &str) -> Result<String, String> {
    static WHITESPACE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));
    Ok(WHITESPACE_RE.replace_all(input.trim(), "-").into_owned())
}

/// Trim the subject and drop trailing dots. An empty subject is rejected.
fn parse_subject(input: &str) -> Result<String, String> {
    let subject = input.trim().trim_end_matches('.').trim_end();
    if subject.is_empty() {
        return Err("Subject is required.".to_string());
    }
    Ok(subject.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_subject_and_body() {
        let answers = AnswerSet::new("feat", "user created").with_body("closes #21");
        assert_eq!(
            ConventionalCommits.format(&answers),
            "feat: user created\n\ncloses #21"
        );
    }

    #[test]
    fn formats_scope_and_footer() {
        let answers = AnswerSet::new("fix", "handle empty input")
            .with_scope("parser")
            .with_footer("closes #3");
        assert_eq!(
            ConventionalCommits.format(&answers),
            "fix(parser): handle empty input\n\ncloses #3"
        );
    }

    #[test]
    fn breaking_change_prefixes_footer() {
        let answers = AnswerSet::new("refactor", "drop v1 api")
            .breaking(true)
            .with_footer("v1 endpoints are gone");
        assert_eq!(
            ConventionalCommits.format(&answers),
            "refactor: drop v1 api\n\nBREAKING CHANGE: v1 endpoints are gone"
        );
    }

    #[test]
    fn breaking_change_without_footer_still_marks_message() {
        let answers = AnswerSet::new("feat", "new config format").breaking(true);
        assert_eq!(
            ConventionalCommits.format(&answers),
            "feat: new config format\n\nBREAKING CHANGE: "
        );
    }

    #[test]
    fn scope_filter_joins_words() {
        assert_eq!(parse_scope("  user  api "), Ok("user-api".to_string()));
        assert_eq!(parse_scope(""), Ok(String::new()));
    }

    #[test]
    fn subject_filter_strips_trailing_dots() {
        assert_eq!(parse_subject(" add login... "), Ok("add login".to_string()));
    }

    #[test]
    fn subject_filter_rejects_empty() {
        assert_eq!(parse_subject(" . "), Err("Subject is required.".to_string()));
    }

    #[test]
    fn questions_cover_every_answer_key() {
        let keys: Vec<AnswerKey> = ConventionalCommits
            .questions()
            .iter()
            .map(|q| q.key)
            .collect();
        assert_eq!(
            keys,
            vec![
                AnswerKey::Prefix,
                AnswerKey::Scope,
                AnswerKey::Subject,
                AnswerKey::IsBreakingChange,
                AnswerKey::Body,
                AnswerKey::Footer,
            ]
        );
    }
}
