use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_endpoint_path, validate_path, validate_positive_number, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_INPUT_PATH: &str = "mashery-keys.txt";
pub const DEFAULT_MIGRATE_PATH: &str = "/migrate";
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(2);

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSettings {
    pub base_url: String,
    pub input_path: String,
    pub migrate_path: String,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub request_timeout: Option<Duration>,
    pub dry_run: bool,
}

/// Values supplied on the command line. `None` falls through to the settings
/// file, then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_path: Option<String>,
    pub batch_size: Option<usize>,
    pub delay_seconds: Option<u64>,
    pub dry_run: bool,
}

impl MigrationSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            input_path: DEFAULT_INPUT_PATH.to_string(),
            migrate_path: DEFAULT_MIGRATE_PATH.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            request_timeout: None,
            dry_run: false,
        }
    }

    pub fn resolve(base_url: impl Into<String>, file: Option<&TomlConfig>, cli: Overrides) -> Self {
        let mut settings = Self::new(base_url);

        if let Some(file) = file {
            if let Some(path) = &file.source.input_path {
                settings.input_path = path.clone();
            }
            if let Some(path) = &file.destination.migrate_path {
                settings.migrate_path = path.clone();
            }
            settings.request_timeout = file.destination.timeout_seconds.map(Duration::from_secs);
            if let Some(size) = file.upload.batch_size {
                settings.batch_size = size;
            }
            if let Some(secs) = file.upload.delay_seconds {
                settings.batch_delay = Duration::from_secs(secs);
            }
        }

        if let Some(path) = cli.input_path {
            settings.input_path = path;
        }
        if let Some(size) = cli.batch_size {
            settings.batch_size = size;
        }
        if let Some(secs) = cli.delay_seconds {
            settings.batch_delay = Duration::from_secs(secs);
        }
        settings.dry_run = cli.dry_run;

        settings
    }
}

impl Validate for MigrationSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path("input_path", &self.input_path)?;
        validate_endpoint_path("migrate_path", &self.migrate_path)?;
        validate_positive_number("batch_size", self.batch_size, 1)?;
        Ok(())
    }
}
