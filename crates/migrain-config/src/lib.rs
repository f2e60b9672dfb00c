pub mod loader;
pub mod model;

pub use loader::{ConfigLoader, expand_home};
pub use model::MigrainConfig;
