pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::{MigrationSettings, Overrides};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "key-migrate")]
#[command(about = "Uploads exported API keys, grouped by owner, to the key-management service")]
pub struct CliConfig {
    /// Destination base URL, e.g. http://keys.example.com
    pub base_url: String,

    #[arg(long, help = "Key export file [default: mashery-keys.txt]")]
    pub input: Option<String>,

    #[arg(long, help = "Optional TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "Users per request [default: 10]")]
    pub batch_size: Option<usize>,

    #[arg(long, help = "Pause between batches in seconds [default: 2]")]
    pub delay_secs: Option<u64>,

    #[arg(long, help = "Log the batches instead of sending them")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            input_path: self.input.clone(),
            batch_size: self.batch_size,
            delay_seconds: self.delay_secs,
            dry_run: self.dry_run,
        }
    }
}
