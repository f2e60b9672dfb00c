use std::path::Path;

use anyhow::{Context, Result};
use migrain_config::MigrainConfig;
use migrain_db::{MigrationUnit, PendingPlan, RunReport};

/// Summary printed after `migrain up`.
pub fn run_summary(report: &RunReport) -> String {
    if report.is_up_to_date() {
        return "No migrations to apply; database is up to date.".to_string();
    }

    let count = report.applied_count();
    let mut out = format!(
        "Applied {count} migration{}:",
        if count == 1 { "" } else { "s" }
    );
    for id in &report.applied {
        out.push_str(&format!("\n  {id}"));
    }
    out
}

/// Table printed by `migrain status`.
pub fn status(plan: &PendingPlan, db_path: &Path, migrations_dir: &Path) -> String {
    let current = plan.current.as_ref().map_or("none", |id| id.as_str());
    let pending = if plan.pending.is_empty() {
        "none (up to date)".to_string()
    } else {
        join_ids(&plan.pending)
    };

    let mut out = format!(
        "Database    {}\nMigrations  {}\nCurrent     {current}\nPending     {pending}",
        tilde_path(db_path),
        tilde_path(migrations_dir),
    );
    if !plan.below_watermark.is_empty() {
        out.push_str(&format!(
            "\nAt or below {}",
            join_ids(&plan.below_watermark)
        ));
    }
    out
}

/// Effective configuration as YAML, in the shape `config.yml` accepts.
pub fn config(config: &MigrainConfig) -> Result<String> {
    let yaml = serde_yaml::to_string(config).context("failed to serialize config")?;
    Ok(yaml.trim_end().to_string())
}

fn join_ids(units: &[MigrationUnit]) -> String {
    units
        .iter()
        .map(|u| u.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shorten paths under the home directory to `~/...` for display.
fn tilde_path(path: &Path) -> String {
    let shortened = dirs::home_dir()
        .filter(|home| home != Path::new("/"))
        .and_then(|home| path.strip_prefix(&home).ok().map(|rest| Path::new("~").join(rest)));
    match shortened {
        Some(p) => p.display().to_string(),
        None => path.display().to_string(),
    }
}
