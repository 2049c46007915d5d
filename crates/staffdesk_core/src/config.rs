//! Runtime settings resolved from the environment.
//!
//! # Responsibility
//! - Resolve database location and logging settings for binaries.
//! - Keep environment access behind a lookup function so tests stay hermetic.
//!
//! # Invariants
//! - `log_dir`, when set, is absolute.
//! - `log_level` is always one of the names accepted by `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "STAFFDESK_DB";
pub const LOG_LEVEL_ENV: &str = "STAFFDESK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STAFFDESK_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "staffdesk.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffdeskConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl StaffdeskConfig {
    /// Reads `STAFFDESK_*` variables from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_ENV)
            .map(|dir| absolutize(Path::new(dir.trim())))
            .transpose()?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, String> {
        self.log_level = normalize_level(level)?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, log_dir: impl AsRef<Path>) -> Result<Self, String> {
        self.log_dir = Some(absolutize(log_dir.as_ref())?);
        Ok(self)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("failed to resolve working directory: {err}"))?;
    Ok(cwd.join(path))
}
