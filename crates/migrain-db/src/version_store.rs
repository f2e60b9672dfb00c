use std::path::{Path, PathBuf};
use std::time::Duration;

use migrain_common::{Error, Result};
use migrain_config::MigrainConfig;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info, warn};

use crate::connection::{open_read_only, open_read_write};
use crate::migrations::MigrationId;

/// Table holding the single "last applied migration" row.
pub const VERSION_TABLE: &str = "current_migrations";

/// Reads and writes the applied-version marker inside the target database.
///
/// Every call opens its own connection and drops it before returning.
pub struct VersionStore {
    db_path: PathBuf,
    busy_timeout: Option<Duration>,
}

impl VersionStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: None,
        }
    }

    pub fn from_config(config: &MigrainConfig) -> Self {
        Self {
            db_path: config.database.clone(),
            busy_timeout: config.busy_timeout(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// The most recently applied migration, or `None` when nothing has been
    /// applied yet. Failures to read the database also yield `None` but are
    /// logged so an unreadable database is distinguishable from a fresh one.
    pub fn current(&self) -> Option<MigrationId> {
        match self.read_current() {
            Ok(version) => version,
            Err(e) => {
                warn!(
                    "could not read applied version from {}, assuming none: {e}",
                    self.db_path.display()
                );
                None
            }
        }
    }

    /// Fallible read behind [`current`](Self::current). A missing database or
    /// a missing version table is `Ok(None)`, not an error.
    pub fn read_current(&self) -> Result<Option<MigrationId>> {
        let exists = self
            .db_path
            .try_exists()
            .map_err(|e| Error::Database(format!("failed to stat database: {e}")))?;
        if !exists {
            debug!("database {} does not exist yet", self.db_path.display());
            return Ok(None);
        }

        let conn = open_read_only(&self.db_path)
            .map_err(|e| Error::Database(format!("failed to open database: {e}")))?;

        let table_exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![VERSION_TABLE],
                |row| row.get(0),
            )
            .map_err(|e| Error::Database(format!("failed to inspect schema: {e}")))?;
        if !table_exists {
            debug!("no {VERSION_TABLE} table in {}", self.db_path.display());
            return Ok(None);
        }

        let version: Option<String> = conn
            .query_row(
                &format!("SELECT * FROM {VERSION_TABLE} LIMIT 1"),
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::Database(format!("failed to read applied version: {e}")))?;

        Ok(version.map(MigrationId::from))
    }

    /// Persist `id` as the applied version, replacing any previous value.
    ///
    /// Only call this after the migration itself has committed. Errors are
    /// reported as [`Error::Record`] and must abort the run.
    pub fn record(&self, id: &MigrationId) -> Result<()> {
        let record_err = |cause: String| Error::Record {
            id: id.to_string(),
            cause,
        };

        let mut conn = open_read_write(&self.db_path, self.busy_timeout)
            .map_err(|e| record_err(format!("failed to open database: {e}")))?;

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {VERSION_TABLE} (version TEXT NOT NULL);"
        ))
        .map_err(|e| record_err(format!("failed to create {VERSION_TABLE}: {e}")))?;

        let tx = conn
            .transaction()
            .map_err(|e| record_err(format!("failed to begin transaction: {e}")))?;
        tx.execute(&format!("DELETE FROM {VERSION_TABLE}"), [])
            .map_err(|e| record_err(format!("failed to clear previous version: {e}")))?;
        // Positional insert so a single-column table created by a migration
        // script is accepted whatever its column is called.
        tx.execute(
            &format!("INSERT INTO {VERSION_TABLE} VALUES (?1)"),
            params![id.as_str()],
        )
        .map_err(|e| record_err(format!("failed to write version: {e}")))?;
        tx.commit()
            .map_err(|e| record_err(format!("failed to commit version: {e}")))?;

        info!("recorded applied version {id}");
        Ok(())
    }
}
