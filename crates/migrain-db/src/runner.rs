use migrain_common::Result;
use migrain_config::MigrainConfig;
use tracing::{debug, info};

use crate::catalog::MigrationCatalog;
use crate::executor::ScriptExecutor;
use crate::migrations::{MigrationId, MigrationUnit};
use crate::version_store::VersionStore;

/// What a run would do, computed without touching the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlan {
    pub current: Option<MigrationId>,
    /// Migrations strictly above the watermark, ascending.
    pub pending: Vec<MigrationUnit>,
    /// Migrations at or below the watermark. These never run again, including
    /// files added after a later migration was applied.
    pub below_watermark: Vec<MigrationUnit>,
}

impl PendingPlan {
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Applied version observed before the run started.
    pub previous: Option<MigrationId>,
    /// Migrations applied and recorded by this run, in order.
    pub applied: Vec<MigrationId>,
}

impl RunReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_up_to_date(&self) -> bool {
        self.applied.is_empty()
    }

    /// Applied version after the run.
    pub fn current(&self) -> Option<&MigrationId> {
        self.applied.last().or(self.previous.as_ref())
    }
}

/// Applies pending migrations in identifier order, recording each one as
/// soon as it commits.
pub struct MigrationRunner {
    store: VersionStore,
    catalog: MigrationCatalog,
    executor: ScriptExecutor,
}

impl MigrationRunner {
    pub fn new(store: VersionStore, catalog: MigrationCatalog, executor: ScriptExecutor) -> Self {
        Self {
            store,
            catalog,
            executor,
        }
    }

    pub fn from_config(config: &MigrainConfig) -> Self {
        Self::new(
            VersionStore::from_config(config),
            MigrationCatalog::from_config(config),
            ScriptExecutor::from_config(config),
        )
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn catalog(&self) -> &MigrationCatalog {
        &self.catalog
    }

    pub fn plan(&self) -> Result<PendingPlan> {
        let current = self.store.current();
        debug!("current migration: {current:?}");

        let all = self.catalog.discover()?;
        let (below_watermark, pending) = split_at_watermark(all, current.as_ref());
        for unit in &below_watermark {
            debug!("older migration already applied: {}", unit.id);
        }

        Ok(PendingPlan {
            current,
            pending,
            below_watermark,
        })
    }

    /// Apply every pending migration. Stops at the first failure, leaving
    /// earlier migrations applied and recorded.
    pub fn run(&self) -> Result<RunReport> {
        let plan = self.plan()?;
        let mut report = RunReport {
            previous: plan.current,
            applied: Vec::with_capacity(plan.pending.len()),
        };

        for unit in plan.pending {
            info!("applying migration {}", unit.id);
            self.executor.apply(&unit)?;
            self.store.record(&unit.id)?;
            report.applied.push(unit.id);
        }

        Ok(report)
    }
}

/// Split a sorted catalog into (at or below `current`, above `current`).
fn split_at_watermark(
    mut units: Vec<MigrationUnit>,
    current: Option<&MigrationId>,
) -> (Vec<MigrationUnit>, Vec<MigrationUnit>) {
    let Some(current) = current else {
        return (Vec::new(), units);
    };
    let boundary = units.partition_point(|u| &u.id <= current);
    let pending = units.split_off(boundary);
    (units, pending)
}
