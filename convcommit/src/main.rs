//! `cz`: conventional-commit authoring assistant.
//!
//! Prompts for a structured commit message, commits it with git, and keeps a
//! backup of the message when the commit fails so `cz commit --retry` can
//! reuse it.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use convcommit::commit::{CommitContext, CommitOptions, run_commit};
use convcommit::conventions::{self, Convention};
use convcommit::exit_codes;
use convcommit::io::config::{CONFIG_FILE_NAME, CzConfig, load_config};
use convcommit::io::git::{CommitFlags, Git};
use convcommit::io::prompt::TerminalPrompter;
use convcommit::io::report::ConsoleReporter;
use convcommit::logging;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "cz",
    version,
    about = "Write conventional commit messages and commit them with git"
)]
struct Cli {
    /// Convention to use instead of the configured one.
    #[arg(short, long, global = true)]
    name: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new commit from prompted answers.
    #[command(visible_alias = "c")]
    Commit(CommitArgs),
    /// List available conventions.
    Ls,
    /// Show an example message for the active convention.
    Example,
    /// Show the message schema of the active convention.
    Schema,
    /// Describe the active convention.
    Info,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
struct CommitArgs {
    /// Reuse the message from the last failed commit.
    #[arg(long)]
    retry: bool,
    /// Show the message without committing.
    #[arg(long)]
    dry_run: bool,
    /// Add a Signed-off-by trailer.
    #[arg(short, long)]
    signoff: bool,
    /// Extra arguments passed to `git commit` (after `--`).
    #[arg(last = true)]
    git_args: Vec<String>,
}

impl CommitArgs {
    fn options(self) -> CommitOptions {
        CommitOptions {
            retry: self.retry,
            dry_run: self.dry_run,
            flags: CommitFlags {
                signoff: self.signoff,
                extra_args: self.git_args,
            },
        }
    }
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FATAL);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve working directory")?;
    let mut cfg = load_config(&root.join(CONFIG_FILE_NAME))?;
    if let Some(name) = cli.name {
        cfg.name = name;
        cfg.validate()?;
    }
    let convention = conventions::by_name(&cfg.name)?;
    debug!(convention = convention.name(), "convention selected");

    match cli.command {
        Command::Commit(args) => cmd_commit(&root, &cfg, convention.as_ref(), args.options()),
        Command::Ls => {
            for name in conventions::available() {
                println!("{name}");
            }
            Ok(exit_codes::OK)
        }
        Command::Example => {
            println!("{}", convention.example());
            Ok(exit_codes::OK)
        }
        Command::Schema => {
            println!("{}", convention.schema());
            Ok(exit_codes::OK)
        }
        Command::Info => {
            println!("{}", convention.info());
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_commit(
    root: &Path,
    cfg: &CzConfig,
    convention: &dyn Convention,
    options: CommitOptions,
) -> Result<i32> {
    let git = Git::new(root).with_limits(cfg.commit_timeout(), cfg.output_limit_bytes);
    if !git.is_inside_work_tree()? {
        bail!("{} is not a git project", root.display());
    }
    let backup = cfg.backup(root);
    debug!(backup = %backup.path().display(), "backup location");

    let prompter = TerminalPrompter::new();
    let ctx = CommitContext {
        vcs: &git,
        prompter: &prompter,
        backup: &backup,
        reporter: &ConsoleReporter,
        convention,
    };
    let outcome = run_commit(&ctx, &options)?;
    Ok(outcome.exit_code())
}
