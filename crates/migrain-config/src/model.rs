use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name of the target database when none is configured. Lives directly
/// under the platform configuration directory (`~/.config` on Linux).
pub const DEFAULT_DATABASE_FILE: &str = "surflog.db";
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";
pub const DEFAULT_FILE_PREFIX: &str = "v";
pub const DEFAULT_FILE_EXTENSION: &str = "sql";

/// Everything a migration run needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrainConfig {
    /// SQLite database the migrations are applied to.
    pub database: PathBuf,
    /// Directory holding the change-script files.
    pub migrations_dir: PathBuf,
    /// File names must start with this to be picked up as migrations.
    pub file_prefix: String,
    /// Extension (without the dot) marking a file as a change-script.
    pub file_extension: String,
    /// How long write connections wait on a locked database. Unset keeps
    /// rusqlite's default.
    pub busy_timeout_ms: Option<u64>,
}

impl Default for MigrainConfig {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            busy_timeout_ms: None,
        }
    }
}

impl MigrainConfig {
    pub fn busy_timeout(&self) -> Option<Duration> {
        self.busy_timeout_ms.map(Duration::from_millis)
    }

    /// Glob-style description of the files considered migrations, e.g. `v*.sql`.
    pub fn file_pattern(&self) -> String {
        format!("{}*.{}", self.file_prefix, self.file_extension)
    }
}

pub fn default_database_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATABASE_FILE)
}
