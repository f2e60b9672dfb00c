pub mod catalog;
mod connection;
pub mod executor;
pub mod migrations;
pub mod runner;
pub mod version_store;

pub use catalog::MigrationCatalog;
pub use executor::ScriptExecutor;
pub use migrations::{MigrationId, MigrationUnit};
pub use runner::{MigrationRunner, PendingPlan, RunReport};
pub use version_store::{VERSION_TABLE, VersionStore};
