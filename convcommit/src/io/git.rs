//! Git adapter for `cz` commands.
//!
//! The commit workflow only needs two things from version control: whether
//! anything is staged, and a way to commit a message. [`Vcs`] is that narrow
//! interface; [`Git`] implements it with `git` subprocess calls.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};

use crate::io::process::run_command_with_timeout;

const DEFAULT_COMMIT_TIMEOUT: Duration = Duration::from_secs(600);
const DEFAULT_OUTPUT_LIMIT_BYTES: usize = 100_000;

/// Flags forwarded to `git commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFlags {
    /// Add a `Signed-off-by` trailer (`git commit -s`).
    pub signoff: bool,
    /// Extra arguments passed through verbatim, before `-F <file>`.
    pub extra_args: Vec<String>,
}

impl CommitFlags {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.signoff {
            args.push("-s".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Outcome of a commit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommitResult {
    /// Text to show the user when the commit failed: stderr, or stdout if stderr is empty.
    pub fn error_text(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        }
    }
}

/// Version-control operations the commit workflow depends on.
pub trait Vcs {
    /// True if nothing is staged for commit.
    fn is_staging_clean(&self) -> Result<bool>;
    /// Commit the staged changes with `message`.
    ///
    /// A commit that git rejects is `Ok` with `success == false`; `Err` is
    /// reserved for failures to run git at all.
    fn commit(&self, message: &str, flags: &CommitFlags) -> Result<CommitResult>;
}

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
    commit_timeout: Duration,
    output_limit_bytes: usize,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            commit_timeout: DEFAULT_COMMIT_TIMEOUT,
            output_limit_bytes: DEFAULT_OUTPUT_LIMIT_BYTES,
        }
    }

    /// Override the `git commit` deadline and per-stream output cap.
    pub fn with_limits(mut self, commit_timeout: Duration, output_limit_bytes: usize) -> Self {
        self.commit_timeout = commit_timeout;
        self.output_limit_bytes = output_limit_bytes;
        self
    }

    /// True if the working directory is inside a git work tree.
    pub fn is_inside_work_tree(&self) -> Result<bool> {
        let out = self.run(&["rev-parse", "--is-inside-work-tree"])?;
        Ok(out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true")
    }

    /// True if there is anything staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let out = self.run_checked(&["diff", "--cached", "--name-only"])?;
        Ok(!String::from_utf8_lossy(&out.stdout).trim().is_empty())
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// Subject and body of the HEAD commit.
    pub fn head_message(&self) -> Result<String> {
        let out = self.run_checked(&["log", "-1", "--format=%B"])?;
        Ok(String::from_utf8_lossy(&out.stdout).trim_end().to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

impl Vcs for Git {
    #[instrument(skip_all)]
    fn is_staging_clean(&self) -> Result<bool> {
        let clean = !self.has_staged_changes()?;
        debug!(clean, "checked staging area");
        Ok(clean)
    }

    /// Write the message to a temp file and run `git commit [flags] -F <file>`.
    ///
    /// Going through a file keeps multi-line messages and leading `#` intact
    /// regardless of shell quoting.
    #[instrument(skip_all, fields(signoff = flags.signoff))]
    fn commit(&self, message: &str, flags: &CommitFlags) -> Result<CommitResult> {
        let mut message_file = tempfile::Builder::new()
            .prefix("cz-commit-")
            .suffix(".txt")
            .tempfile()
            .context("create commit message file")?;
        message_file
            .write_all(message.as_bytes())
            .context("write commit message file")?;
        message_file.flush().context("flush commit message file")?;

        let mut cmd = Command::new("git");
        cmd.arg("commit")
            .args(flags.to_args())
            .arg("-F")
            .arg(message_file.path())
            .current_dir(&self.workdir);

        debug!("running git commit");
        let output = run_command_with_timeout(cmd, self.commit_timeout, self.output_limit_bytes)
            .context("run git commit")?;

        let mut stderr = output.stderr_lossy();
        if output.timed_out {
            warn!(
                timeout_secs = self.commit_timeout.as_secs(),
                "git commit timed out"
            );
            stderr.push_str(&format!(
                "\ngit commit timed out after {}s",
                self.commit_timeout.as_secs()
            ));
        }
        Ok(CommitResult {
            success: output.succeeded(),
            stdout: output.stdout_lossy(),
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;

    #[test]
    fn flags_render_signoff_before_extra_args() {
        let flags = CommitFlags {
            signoff: true,
            extra_args: vec!["--no-verify".to_string()],
        };
        assert_eq!(flags.to_args(), vec!["-s", "--no-verify"]);
    }

    #[test]
    fn default_flags_render_nothing() {
        assert!(CommitFlags::default().to_args().is_empty());
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let result = CommitResult {
            success: false,
            stdout: "nothing added to commit\n".to_string(),
            stderr: "  \n".to_string(),
        };
        assert_eq!(result.error_text(), "nothing added to commit");
    }

    #[test]
    fn error_text_prefers_stderr() {
        let result = CommitResult {
            success: false,
            stdout: "ignored".to_string(),
            stderr: "hook rejected commit\n".to_string(),
        };
        assert_eq!(result.error_text(), "hook rejected commit");
    }

    #[test]
    fn staging_clean_tracks_the_index() {
        let repo = TestRepo::new().expect("repo");
        let git = repo.git_handle();
        repo.write_file("notes.txt", "draft\n").expect("write");
        assert!(git.is_staging_clean().expect("clean check"));

        git.add_all().expect("add");
        assert!(!git.is_staging_clean().expect("clean check"));
    }

    #[test]
    fn commit_uses_message_verbatim() {
        let repo = TestRepo::new().expect("repo");
        repo.stage_file("notes.txt", "draft\n").expect("stage");
        let git = repo.git_handle();

        let result = git
            .commit("feat: user created\n\ncloses #21", &CommitFlags::default())
            .expect("commit");

        assert!(result.success, "{}", result.stderr);
        assert_eq!(
            git.head_message().expect("head"),
            "feat: user created\n\ncloses #21"
        );
        assert!(git.is_staging_clean().expect("clean check"));
    }

    #[cfg(unix)]
    #[test]
    fn commit_timeout_kills_slow_hook() {
        let repo = TestRepo::new().expect("repo");
        repo.stage_file("notes.txt", "draft\n").expect("stage");
        repo.install_sleeping_hook(8).expect("hook");
        let git = repo.git_handle().with_limits(Duration::from_secs(1), 1000);

        let start = std::time::Instant::now();
        let result = git
            .commit("fix: slow hook", &CommitFlags::default())
            .expect("commit");
        let elapsed = start.elapsed();

        assert!(!result.success);
        assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");
        assert!(result.error_text().contains("timed out after 1s"));
        assert!(!git.is_staging_clean().expect("clean check"));
    }

    #[test]
    fn commit_with_nothing_staged_reports_failure() {
        let repo = TestRepo::new().expect("repo");
        let result = repo
            .git_handle()
            .commit("fix: nothing", &CommitFlags::default())
            .expect("commit");
        assert!(!result.success);
        assert!(!result.error_text().is_empty());
    }
}
