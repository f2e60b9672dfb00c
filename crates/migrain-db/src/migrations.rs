use std::fmt;
use std::path::{Path, PathBuf};

/// Name of a migration, taken from its file stem (e.g. `v0007`).
///
/// Ordering is plain lexical string order, never numeric: `v10` sorts before
/// `v9`. Authors are expected to zero-pad identifiers so that lexical order
/// matches the order they were written in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MigrationId(String);

impl MigrationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MigrationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MigrationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A discovered change-script. The script text stays on disk until the
/// executor reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    pub id: MigrationId,
    pub path: PathBuf,
}

impl MigrationUnit {
    pub fn new(id: impl Into<MigrationId>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
