use clap::Parser;
use key_migrate::config::toml_config::TomlConfig;
use key_migrate::core::BatchSink;
use key_migrate::utils::{logger, validation::Validate};
use key_migrate::{
    CliConfig, HttpBatchSink, LocalStorage, LoggingSink, MigrationEngine, MigrationError,
    MigrationPipeline, MigrationSettings, RandomPlaceholders,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Migration failed: {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &CliConfig) -> Result<(), MigrationError> {
    let file = config.config.as_deref().map(TomlConfig::from_file).transpose()?;
    let settings = MigrationSettings::resolve(&config.base_url, file.as_ref(), config.overrides());
    settings.validate()?;
    tracing::debug!("Settings: {:?}", settings);

    let sink: Box<dyn BatchSink> = if settings.dry_run {
        tracing::info!("🔍 Dry run: nothing will be sent to {}", settings.base_url);
        Box::new(LoggingSink)
    } else {
        Box::new(HttpBatchSink::new(
            &settings.base_url,
            &settings.migrate_path,
            settings.request_timeout,
        )?)
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MigrationPipeline::new(storage, RandomPlaceholders, sink, settings);
    let summary = MigrationEngine::new(pipeline).run().await?;

    println!(
        "✅ Migration finished: {} batches, {} users, {} keys",
        summary.batches, summary.users, summary.keys
    );
    Ok(())
}
