//! Test-only fakes for the commit workflow collaborators.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::core::questions::Question;
use crate::io::backup::BackupStore;
use crate::io::config::{CONFIG_FILE_NAME, CzConfig};
use crate::io::git::{CommitFlags, CommitResult, Git, Vcs};
use crate::io::prompt::{PromptOutcome, Prompter};
use crate::io::report::Reporter;

/// Successful commit result with git-like stdout.
pub fn commit_ok() -> CommitResult {
    CommitResult {
        success: true,
        stdout: "[main 1a2b3c4] commit\n 1 file changed".to_string(),
        stderr: String::new(),
    }
}

/// Successful commit result where hooks also wrote to stderr.
pub fn commit_ok_with_stderr(stderr: &str) -> CommitResult {
    CommitResult {
        stderr: stderr.to_string(),
        ..commit_ok()
    }
}

/// Failed commit result with the given stderr.
pub fn commit_err(stderr: &str) -> CommitResult {
    CommitResult {
        success: false,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// In-memory VCS with scripted commit results.
///
/// Results are consumed in order; once exhausted every commit succeeds.
pub struct FakeVcs {
    staging_clean: bool,
    results: RefCell<VecDeque<CommitResult>>,
    commits: RefCell<Vec<(String, CommitFlags)>>,
    staging_checks: Cell<usize>,
}

impl FakeVcs {
    pub fn new(staging_clean: bool, results: Vec<CommitResult>) -> Self {
        Self {
            staging_clean,
            results: RefCell::new(results.into()),
            commits: RefCell::new(Vec::new()),
            staging_checks: Cell::new(0),
        }
    }

    /// Nothing staged.
    pub fn clean() -> Self {
        Self::new(true, Vec::new())
    }

    /// Changes staged; every commit succeeds.
    pub fn staged_ok() -> Self {
        Self::new(false, Vec::new())
    }

    /// Changes staged; the first commit fails with `stderr`.
    pub fn staged_failing(stderr: &str) -> Self {
        Self::new(false, vec![commit_err(stderr)])
    }

    /// Messages and flags passed to `commit`, in call order.
    pub fn commits(&self) -> Vec<(String, CommitFlags)> {
        self.commits.borrow().clone()
    }

    pub fn staging_checks(&self) -> usize {
        self.staging_checks.get()
    }
}

impl Vcs for FakeVcs {
    fn is_staging_clean(&self) -> Result<bool> {
        self.staging_checks.set(self.staging_checks.get() + 1);
        Ok(self.staging_clean)
    }

    fn commit(&self, message: &str, flags: &CommitFlags) -> Result<CommitResult> {
        self.commits
            .borrow_mut()
            .push((message.to_string(), flags.clone()));
        Ok(self
            .results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(commit_ok))
    }
}

/// Prompter that returns queued outcomes. Errors once the queue is empty.
pub struct ScriptedPrompter {
    outcomes: RefCell<VecDeque<PromptOutcome>>,
    calls: Cell<usize>,
}

impl ScriptedPrompter {
    pub fn new(outcomes: Vec<PromptOutcome>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, _questions: &[Question]) -> Result<PromptOutcome> {
        self.calls.set(self.calls.get() + 1);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted prompter exhausted"))
    }
}

/// In-memory backup slot that records every write and clear.
#[derive(Default)]
pub struct MemoryBackup {
    slot: RefCell<Option<String>>,
    writes: RefCell<Vec<String>>,
    clears: Cell<usize>,
}

impl MemoryBackup {
    /// Pre-populate the slot without recording a write.
    pub fn seed(&self, message: &str) {
        *self.slot.borrow_mut() = Some(message.to_string());
    }

    pub fn content(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }
}

impl BackupStore for MemoryBackup {
    fn write(&self, message: &str) -> Result<()> {
        self.writes.borrow_mut().push(message.to_string());
        *self.slot.borrow_mut() = Some(message.to_string());
        Ok(())
    }

    fn read(&self) -> Result<String> {
        self.slot
            .borrow()
            .clone()
            .ok_or_else(|| anyhow!("no backup"))
    }

    fn exists(&self) -> bool {
        self.slot.borrow().is_some()
    }

    fn clear(&self) -> Result<()> {
        self.clears.set(self.clears.get() + 1);
        self.slot
            .borrow_mut()
            .take()
            .map(|_| ())
            .ok_or_else(|| anyhow!("no backup to clear"))
    }
}

/// Reporter that keeps everything it is asked to print.
///
/// Events are stored as `"<kind>:<text>"` in call order.
#[derive(Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn of_kind(&self, kind: &str) -> Vec<String> {
        let prefix = format!("{kind}:");
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.of_kind("success")
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_kind("error")
    }

    pub fn infos(&self) -> Vec<String> {
        self.of_kind("info")
    }

    pub fn writes(&self) -> Vec<String> {
        self.of_kind("write")
    }

    pub fn err_writes(&self) -> Vec<String> {
        self.of_kind("write_err")
    }

    fn push(&self, kind: &str, text: &str) {
        self.events.borrow_mut().push(format!("{kind}:{text}"));
    }
}

impl Reporter for RecordingReporter {
    fn success(&self, text: &str) {
        self.push("success", text);
    }

    fn error(&self, text: &str) {
        self.push("error", text);
    }

    fn info(&self, text: &str) {
        self.push("info", text);
    }

    fn write(&self, text: &str) {
        self.push("write", text);
    }

    fn write_err(&self, text: &str) {
        self.push("write_err", text);
    }
}

/// Throwaway git repository with a committer identity configured.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp repo dir")?;
        let repo = Self { dir };
        repo.git(&["init", "--quiet"])?;
        repo.git(&["config", "user.name", "Test User"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git_handle(&self) -> Git {
        Git::new(self.path())
    }

    /// Write `contents` to `rel` inside the repo.
    pub fn write_file(&self, rel: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write a file and stage everything.
    pub fn stage_file(&self, rel: &str, contents: &str) -> Result<()> {
        self.write_file(rel, contents)?;
        self.git_handle().add_all()
    }

    /// Install an executable hook script under `.git/hooks/<name>`.
    pub fn install_hook(&self, name: &str, script: &str) -> Result<()> {
        let hook = self.write_file(&format!(".git/hooks/{name}"), script)?;
        make_executable(&hook)
    }

    /// Install a `commit-msg` hook that always rejects the commit.
    pub fn install_rejecting_hook(&self, reason: &str) -> Result<()> {
        self.install_hook("commit-msg", &format!("#!/bin/sh\necho \"{reason}\" >&2\nexit 1\n"))
    }

    /// Install a `commit-msg` hook that sleeps before accepting the commit.
    pub fn install_sleeping_hook(&self, secs: u64) -> Result<()> {
        self.install_hook("commit-msg", &format!("#!/bin/sh\nsleep {secs}\nexit 0\n"))
    }

    /// Write `.cz.toml` at the repo root.
    pub fn write_config(&self, cfg: &CzConfig) -> Result<()> {
        cfg.validate()?;
        let contents = toml::to_string_pretty(cfg).context("serialize config toml")?;
        self.write_file(CONFIG_FILE_NAME, &contents)?;
        Ok(())
    }

    pub fn remove_hooks(&self) -> Result<()> {
        let hook = self.path().join(".git/hooks/commit-msg");
        if hook.exists() {
            fs::remove_file(&hook).with_context(|| format!("remove {}", hook.display()))?;
        }
        Ok(())
    }

    pub fn commit_count(&self) -> Result<usize> {
        let out = Command::new("git")
            .args(["rev-list", "--count", "--all"])
            .current_dir(self.path())
            .output()
            .context("spawn git rev-list")?;
        let stdout = String::from_utf8_lossy(&out.stdout);
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(anyhow!("git rev-list failed: {}", stderr.trim()));
        }
        stdout
            .trim()
            .parse()
            .with_context(|| format!("parse commit count {:?}", stdout.trim()))
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .status()
            .with_context(|| format!("spawn git {}", args.join(" ")))?;
        if !status.success() {
            return Err(anyhow!("git {} failed", args.join(" ")));
        }
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
