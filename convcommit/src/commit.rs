//! Orchestration for a single `cz commit` attempt.
//!
//! Flow: staging check → answers (prompt, or the backup on `--retry`) →
//! compose → optional dry-run stop → `git commit` → clear or write the backup.
//!
//! Every expected way out is a [`CommitOutcome`]; `Err` is reserved for
//! failures the workflow cannot recover from (backup I/O, git not runnable,
//! terminal errors).

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::conventions::Convention;
use crate::core::composer::compose;
use crate::exit_codes;
use crate::io::backup::BackupStore;
use crate::io::git::{CommitFlags, Vcs};
use crate::io::prompt::{PromptOutcome, Prompter};
use crate::io::report::Reporter;

pub const NOTHING_STAGED_MESSAGE: &str = "No files added to staging!";
pub const NO_BACKUP_MESSAGE: &str = "No commit backup found";
pub const SUCCESS_MESSAGE: &str = "Commit successful!";

/// Per-invocation options for `cz commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Reuse the backed-up message instead of prompting.
    pub retry: bool,
    /// Show the message and stop before committing.
    pub dry_run: bool,
    /// Flags forwarded to `git commit`.
    pub flags: CommitFlags,
}

/// How a commit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Git accepted the commit; no backup remains.
    Committed { message: String },
    /// `--dry-run`: the message was shown and nothing else happened.
    DryRun { message: String },
    /// Staging area was clean.
    NothingToCommit,
    /// `--retry` without a backup.
    NoBackup,
    /// The user aborted the prompt.
    Cancelled,
    /// The convention rejected an answer.
    Rejected { reason: String },
    /// Git rejected the commit; the message is in the backup.
    CommitFailed { message: String },
}

impl CommitOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Committed { .. } | Self::DryRun { .. } => exit_codes::OK,
            Self::NothingToCommit => exit_codes::NOTHING_TO_COMMIT,
            Self::NoBackup => exit_codes::NO_COMMIT_BACKUP,
            Self::Cancelled => exit_codes::NO_ANSWERS,
            Self::Rejected { .. } => exit_codes::CUSTOM_ERROR,
            Self::CommitFailed { .. } => exit_codes::COMMIT_ERROR,
        }
    }
}

/// Collaborators for one commit attempt.
pub struct CommitContext<'a> {
    pub vcs: &'a dyn Vcs,
    pub prompter: &'a dyn Prompter,
    pub backup: &'a dyn BackupStore,
    pub reporter: &'a dyn Reporter,
    pub convention: &'a dyn Convention,
}

/// Drive one commit attempt end to end.
#[instrument(skip_all, fields(retry = options.retry, dry_run = options.dry_run))]
pub fn run_commit(ctx: &CommitContext<'_>, options: &CommitOptions) -> Result<CommitOutcome> {
    if ctx.vcs.is_staging_clean().context("check staging area")? {
        debug!("staging area is clean");
        ctx.reporter.write(NOTHING_STAGED_MESSAGE);
        return Ok(CommitOutcome::NothingToCommit);
    }

    let message = if options.retry {
        if !ctx.backup.exists() {
            warn!("retry requested without a backup");
            ctx.reporter.error(NO_BACKUP_MESSAGE);
            return Ok(CommitOutcome::NoBackup);
        }
        // Recommit the stored text as-is; it is not recomposed.
        let message = ctx.backup.read()?;
        debug!(bytes = message.len(), "reusing backed-up message");
        message
    } else {
        match ctx.prompter.ask(&ctx.convention.questions())? {
            PromptOutcome::Answered(answers) => compose(&answers, ctx.convention),
            PromptOutcome::Cancelled => {
                debug!("prompt cancelled, no answers");
                return Ok(CommitOutcome::Cancelled);
            }
            PromptOutcome::Rejected(reason) => {
                debug!("convention rejected an answer");
                ctx.reporter.error(&reason);
                return Ok(CommitOutcome::Rejected { reason });
            }
        }
    };

    ctx.reporter.info(&format!("\n{message}\n"));

    if options.dry_run {
        debug!("dry run, skipping commit");
        return Ok(CommitOutcome::DryRun { message });
    }

    let result = ctx
        .vcs
        .commit(&message, &options.flags)
        .context("run commit")?;

    if !result.success {
        warn!("commit failed, saving message to backup");
        // Back up before reporting so a retry can always recover this message.
        ctx.backup.write(&message)?;
        ctx.reporter.error(result.error_text());
        return Ok(CommitOutcome::CommitFailed { message });
    }

    if ctx.backup.exists() {
        debug!("clearing consumed backup");
        ctx.backup.clear()?;
    }
    ctx.reporter.write_err(&result.stderr);
    ctx.reporter.write(&result.stdout);
    ctx.reporter.success(SUCCESS_MESSAGE);
    info!("commit succeeded");
    Ok(CommitOutcome::Committed { message })
}
