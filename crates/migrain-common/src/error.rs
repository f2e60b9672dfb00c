use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read migration directory {}: {cause}", .dir.display())]
    Discovery { dir: PathBuf, cause: String },

    #[error("migration {id} failed: {cause}")]
    Execution { id: String, cause: String },

    #[error("migration {id} was applied but its version could not be recorded: {cause}")]
    Record { id: String, cause: String },

    #[error("database error: {0}")]
    Database(String),
}

impl Error {
    /// The database holds effects of a migration that the version marker does
    /// not reflect. Re-running would apply that migration a second time.
    pub fn is_record_failure(&self) -> bool {
        matches!(self, Error::Record { .. })
    }

    /// Identifier of the migration this error is attributed to, if any.
    pub fn migration_id(&self) -> Option<&str> {
        match self {
            Error::Execution { id, .. } | Error::Record { id, .. } => Some(id),
            _ => None,
        }
    }
}
