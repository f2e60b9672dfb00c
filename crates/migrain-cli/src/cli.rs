use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use migrain_config::{ConfigLoader, MigrainConfig, expand_home};

/// Apply versioned SQL change-scripts to a local SQLite database, once each.
#[derive(Parser, Debug)]
#[command(name = "migrain", version, about, long_about = None)]
pub struct Cli {
    /// Config file (YAML or TOML). Defaults to ~/.config/migrain/config.yml if present
    #[arg(long, env = "MIGRAIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Target SQLite database
    #[arg(long, env = "DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Directory containing the migration scripts
    #[arg(long, env = "MIGRAIN_MIGRATIONS_DIR", global = true)]
    pub migrations_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply all pending migrations (default)
    Up,

    /// Show the applied version and pending migrations without changing anything
    Status,

    /// Display the effective configuration
    Config,
}

impl Cli {
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or(Command::Up)
    }

    /// Config file values, overridden by flags and environment variables.
    pub fn resolve_config(&self) -> Result<MigrainConfig> {
        let mut config = ConfigLoader::load(self.config.as_deref())
            .context("failed to load configuration")?;
        if let Some(database) = &self.database {
            config.database = expand_home(database);
        }
        if let Some(dir) = &self.migrations_dir {
            config.migrations_dir = expand_home(dir);
        }
        Ok(config)
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
