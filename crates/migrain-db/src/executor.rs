use std::path::PathBuf;
use std::time::Duration;

use migrain_common::{Error, Result};
use migrain_config::MigrainConfig;
use tracing::{debug, info};

use crate::connection::open_read_write;
use crate::migrations::MigrationUnit;

/// Runs one change-script against the database inside a single transaction.
pub struct ScriptExecutor {
    db_path: PathBuf,
    busy_timeout: Option<Duration>,
}

impl ScriptExecutor {
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

    /// Apply `unit` atomically: every statement takes effect or none do.
    ///
    /// The applied version is not touched here. Scripts must not issue their
    /// own `BEGIN`/`COMMIT` since they already run inside a transaction.
    pub fn apply(&self, unit: &MigrationUnit) -> Result<()> {
        let exec_err = |cause: String| Error::Execution {
            id: unit.id.to_string(),
            cause,
        };

        let script = std::fs::read_to_string(unit.path()).map_err(|e| {
            exec_err(format!("failed to read {}: {e}", unit.path().display()))
        })?;

        let mut conn = open_read_write(&self.db_path, self.busy_timeout)
            .map_err(|e| exec_err(format!("failed to open database: {e}")))?;

        // Dropping an uncommitted transaction rolls it back.
        let tx = conn
            .transaction()
            .map_err(|e| exec_err(format!("failed to begin transaction: {e}")))?;
        tx.execute_batch(&script).map_err(|e| {
            debug!("rolling back {}", unit.id);
            exec_err(e.to_string())
        })?;
        tx.commit()
            .map_err(|e| exec_err(format!("failed to commit: {e}")))?;

        info!("applied {} successfully", unit.id);
        Ok(())
    }
}
