//! Single-slot backup of an unsent commit message.
//!
//! The file outlives the process so `cz commit --retry` can pick up a message
//! whose commit failed. There is exactly one slot: a second failure overwrites
//! the first.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// File name of the backup inside the system temp directory.
pub const BACKUP_FILE_NAME: &str = "cz.commit.backup";

/// Durable staging area for one unsent commit message.
pub trait BackupStore {
    /// Overwrite the backup with `message`.
    fn write(&self, message: &str) -> Result<()>;
    /// Return the backup content verbatim. Errors if no backup exists.
    fn read(&self) -> Result<String>;
    fn exists(&self) -> bool;
    /// Delete the backup. Callers check [`BackupStore::exists`] first.
    fn clear(&self) -> Result<()>;
}

/// Backup stored at a fixed path on disk.
#[derive(Debug, Clone)]
pub struct FileBackup {
    path: PathBuf,
}

impl FileBackup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backup at `<system temp dir>/cz.commit.backup`.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join(BACKUP_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackupStore for FileBackup {
    fn write(&self, message: &str) -> Result<()> {
        debug!(path = %self.path.display(), bytes = message.len(), "writing commit backup");
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&self.path, message)
            .with_context(|| format!("write commit backup {}", self.path.display()))
    }

    fn read(&self) -> Result<String> {
        debug!(path = %self.path.display(), "reading commit backup");
        fs::read_to_string(&self.path)
            .with_context(|| format!("read commit backup {}", self.path.display()))
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn clear(&self) -> Result<()> {
        debug!(path = %self.path.display(), "removing commit backup");
        fs::remove_file(&self.path)
            .with_context(|| format!("remove commit backup {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_is_verbatim() {
        let temp = tempfile::tempdir().expect("tempdir");
        let backup = FileBackup::new(temp.path().join("cz.commit.backup"));
        assert!(!backup.exists());

        backup
            .write("feat: user created\n\ncloses #21\n")
            .expect("write");
        assert!(backup.exists());
        assert_eq!(
            backup.read().expect("read"),
            "feat: user created\n\ncloses #21\n"
        );
    }

    #[test]
    fn second_write_overwrites_first() {
        let temp = tempfile::tempdir().expect("tempdir");
        let backup = FileBackup::new(temp.path().join("backup"));
        backup.write("fix: first").expect("write first");
        backup.write("fix: second").expect("write second");
        assert_eq!(backup.read().expect("read"), "fix: second");
    }

    #[test]
    fn write_creates_missing_parent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let backup = FileBackup::new(temp.path().join("nested/dir/backup"));
        backup.write("docs: readme").expect("write");
        assert!(backup.exists());
    }

    #[test]
    fn clear_removes_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let backup = FileBackup::new(temp.path().join("backup"));
        backup.write("chore: x").expect("write");
        backup.clear().expect("clear");
        assert!(!backup.exists());
    }

    #[test]
    fn read_missing_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let backup = FileBackup::new(temp.path().join("absent"));
        let err = backup.read().unwrap_err();
        assert!(format!("{err:#}").contains("read commit backup"));
    }
}
