use std::path::{Path, PathBuf};

use migrain_common::{Error, Result};
use tracing::{debug, info};

use crate::model::MigrainConfig;

const CONFIG_FILE_NAMES: &[&str] = &["config.yml", "config.yaml", "config.toml"];

/// Resolves a [`MigrainConfig`] from an explicit file, the default config
/// location, or built-in defaults, in that order.
pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.config/migrain` on Linux, the platform equivalent elsewhere.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("migrain"))
    }

    /// Load configuration. An explicitly given file must exist; the default
    /// location is optional and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<MigrainConfig> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_default_file() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    MigrainConfig::default()
                }
            },
        };
        Ok(Self::expand_paths(config))
    }

    pub fn from_file(path: &Path) -> Result<MigrainConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = parse_config(path, &contents)?;
        info!("config loaded from {}", path.display());
        Ok(config)
    }

    fn find_default_file() -> Option<PathBuf> {
        let dir = Self::default_config_dir()?;
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    fn expand_paths(mut config: MigrainConfig) -> MigrainConfig {
        config.database = expand_home(&config.database);
        config.migrations_dir = expand_home(&config.migrations_dir);
        config
    }
}

/// Replace a leading `~` with the user's home directory. Paths without one,
/// or hosts without a home directory, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn parse_config(path: &Path, contents: &str) -> Result<MigrainConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yml" | "yaml" => serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(format!("YAML parse error: {e}"))),
        "toml" => {
            toml::from_str(contents).map_err(|e| Error::Config(format!("TOML parse error: {e}")))
        }
        other => Err(Error::Config(format!(
            "unsupported config extension: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_yaml_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "database: /tmp/app.db\nmigrations_dir: /srv/migrations\nbusy_timeout_ms: 250\n",
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/app.db"));
        assert_eq!(config.migrations_dir, PathBuf::from("/srv/migrations"));
        assert_eq!(config.busy_timeout_ms, Some(250));
        // unspecified fields keep their defaults
        assert_eq!(config.file_prefix, "v");
        assert_eq!(config.file_extension, "sql");
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database = \"/tmp/other.db\"\nfile_prefix = \"m\"\nfile_extension = \"sqlite\"\n",
        )
        .unwrap();

        let config = ConfigLoader::from_file(&path).unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.file_pattern(), "m*.sqlite");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "database=/tmp/x.db").unwrap();

        let err = ConfigLoader::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config extension: ini"));
    }

    #[test]
    fn reports_parse_errors_as_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "database: [unterminated").unwrap();

        let err = ConfigLoader::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(ConfigLoader::load(Some(&missing)).is_err());
    }

    #[test]
    fn expand_home_replaces_leading_tilde_only() {
        assert_eq!(
            expand_home(Path::new("/abs/~/db")),
            PathBuf::from("/abs/~/db")
        );
        assert_eq!(expand_home(Path::new("rel/db")), PathBuf::from("rel/db"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/.config/surflog.db")),
                home.join(".config/surflog.db")
            );
        }
    }

    #[test]
    fn loaded_paths_are_home_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "database: ~/data/app.db\n").unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.database, home.join("data/app.db"));
    }
}
