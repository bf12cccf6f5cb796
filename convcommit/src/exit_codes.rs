//! Stable exit codes for `cz` commands.

/// Command succeeded (including `--dry-run`).
pub const OK: i32 = 0;
/// Unexpected failure: invalid config, I/O errors, git could not be spawned.
pub const FATAL: i32 = 1;
/// The prompt was cancelled before any answers were collected.
pub const NO_ANSWERS: i32 = 5;
/// `git commit` reported failure; the message was saved to the backup file.
pub const COMMIT_ERROR: i32 = 6;
/// `cz commit --retry` found no backup to reuse.
pub const NO_COMMIT_BACKUP: i32 = 7;
/// Nothing is staged.
pub const NOTHING_TO_COMMIT: i32 = 8;
/// The active convention rejected one of the answers.
pub const CUSTOM_ERROR: i32 = 9;
