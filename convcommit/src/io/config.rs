//! `cz` settings stored in `.cz.toml` at the repository root.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::conventions::{self, DEFAULT_CONVENTION};
use crate::io::backup::FileBackup;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".cz.toml";

/// `cz` configuration (TOML).
///
/// Missing fields default to the values below; a missing file is the same as
/// an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CzConfig {
    /// Registry name of the commit convention.
    pub name: String,

    /// Where to keep the unsent-message backup. Defaults to the system temp dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,

    /// Wall-clock budget for `git commit` (hooks included), in seconds.
    pub commit_timeout_secs: u64,

    /// Truncate captured git stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for CzConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONVENTION.to_string(),
            backup_path: None,
            commit_timeout_secs: 10 * 60,
            output_limit_bytes: 100_000,
        }
    }
}

impl CzConfig {
    pub fn validate(&self) -> Result<()> {
        conventions::by_name(&self.name)?;
        if self.commit_timeout_secs == 0 {
            return Err(anyhow!("commit_timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if let Some(path) = &self.backup_path
            && path.as_os_str().is_empty()
        {
            return Err(anyhow!("backup_path must not be empty"));
        }
        Ok(())
    }

    pub fn commit_timeout(&self) -> Duration {
        Duration::from_secs(self.commit_timeout_secs)
    }

    /// Backup store for this config. Relative paths resolve against `root`.
    pub fn backup(&self, root: &Path) -> FileBackup {
        match &self.backup_path {
            Some(path) => FileBackup::new(root.join(path)),
            None => FileBackup::in_temp_dir(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `CzConfig::default()`.
pub fn load_config(path: &Path) -> Result<CzConfig> {
    if !path.exists() {
        let cfg = CzConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CzConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, CzConfig::default());
    }

    #[test]
    fn serialized_config_loads_back() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        let cfg = CzConfig {
            backup_path: Some(PathBuf::from(".git/cz.commit.backup")),
            commit_timeout_secs: 30,
            ..CzConfig::default()
        };
        let contents = toml::to_string_pretty(&cfg).expect("serialize");
        fs::write(&path, contents).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "commit_timeout_secs = 5\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.commit_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.name, DEFAULT_CONVENTION);
    }

    #[test]
    fn unknown_convention_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "name = \"cz_missing\"\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unknown convention 'cz_missing'"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = CzConfig {
            commit_timeout_secs: 0,
            ..CzConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn relative_backup_path_resolves_against_root() {
        let cfg = CzConfig {
            backup_path: Some(PathBuf::from("state/backup")),
            ..CzConfig::default()
        };
        let backup = cfg.backup(Path::new("/repo"));
        assert_eq!(backup.path(), Path::new("/repo/state/backup"));
    }
}
