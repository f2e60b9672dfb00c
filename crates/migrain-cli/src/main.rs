mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use migrain_config::MigrainConfig;
use migrain_db::MigrationRunner;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let config = cli.resolve_config()?;
    debug!("migration directory: {}", config.migrations_dir.display());
    debug!("database path: {}", config.database.display());

    match cli.subcommand() {
        Command::Up => run_up(&config),
        Command::Status => run_status(&config),
        Command::Config => {
            println!("{}", report::config(&config)?);
            Ok(())
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_up(config: &MigrainConfig) -> Result<()> {
    let runner = MigrationRunner::from_config(config);
    match runner.run() {
        Ok(report) => {
            println!("{}", report::run_summary(&report));
            Ok(())
        }
        Err(e) => {
            error!("migration run aborted: {e}");
            if e.is_record_failure() {
                eprintln!(
                    "The migration's changes are committed but {} still holds the previous \
                     version. Update the current_migrations table by hand before re-running, \
                     or the migration will be applied again.",
                    config.database.display()
                );
            }
            Err(e).context("migration run failed")
        }
    }
}

fn run_status(config: &MigrainConfig) -> Result<()> {
    let runner = MigrationRunner::from_config(config);
    let plan = runner
        .plan()
        .context("failed to compute pending migrations")?;
    println!(
        "{}",
        report::status(&plan, runner.store().db_path(), runner.catalog().dir())
    );
    Ok(())
}
