pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpBatchSink, LoggingSink, RandomPlaceholders};
pub use config::{cli::LocalStorage, MigrationSettings};
pub use core::{etl::MigrationEngine, pipeline::MigrationPipeline};
pub use utils::error::{MigrationError, Result};
