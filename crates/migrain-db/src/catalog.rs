use std::path::{Path, PathBuf};

use migrain_common::{Error, Result};
use migrain_config::MigrainConfig;
use migrain_config::model::{DEFAULT_FILE_EXTENSION, DEFAULT_FILE_PREFIX};
use tracing::debug;

use crate::migrations::{MigrationId, MigrationUnit};

/// Finds change-script files in a directory and orders them by identifier.
pub struct MigrationCatalog {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl MigrationCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_pattern(dir, DEFAULT_FILE_PREFIX, DEFAULT_FILE_EXTENSION)
    }

    pub fn with_pattern(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &MigrainConfig) -> Self {
        Self::with_pattern(
            &config.migrations_dir,
            &config.file_prefix,
            &config.file_extension,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All migrations in the directory, sorted ascending by identifier.
    ///
    /// Entries not matching `<prefix>*.<extension>` are skipped. The result
    /// does not depend on the order the filesystem lists entries in.
    pub fn discover(&self) -> Result<Vec<MigrationUnit>> {
        let discovery_err = |cause: String| Error::Discovery {
            dir: self.dir.clone(),
            cause,
        };

        let entries = std::fs::read_dir(&self.dir).map_err(|e| discovery_err(e.to_string()))?;

        let mut units = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| discovery_err(e.to_string()))?;
            let path = entry.path();
            match self.identify(&path) {
                Some(id) => units.push(MigrationUnit::new(id, path)),
                None => debug!("ignoring non-migration entry {}", path.display()),
            }
        }

        units.sort_by(|a, b| a.id.cmp(&b.id));
        debug!("found {} migrations in {}", units.len(), self.dir.display());
        Ok(units)
    }

    fn identify(&self, path: &Path) -> Option<MigrationId> {
        if !path.is_file() {
            return None;
        }
        let extension = path.extension()?.to_str()?;
        if extension != self.extension {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if !stem.starts_with(&self.prefix) {
            return None;
        }
        Some(MigrationId::from(stem))
    }
}
