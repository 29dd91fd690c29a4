//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::observability::{init_logger, LogFormat};
use crate::seed::seed_directory;
use crate::store::{InMemoryStore, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, seed } => serve(config.as_deref(), seed.as_deref()),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Load configuration, optionally seed the store, and serve until Ctrl-C
pub fn serve(config_path: Option<&Path>, seed_dir: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    init_logger(LogFormat::from_json_flag(config.log_json));

    let geocoder = config.geocoder.build()?;
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::new());
    let state = AppState::from_config(&config, store.clone(), geocoder.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        if let Some(dir) = seed_dir {
            seed_directory(dir, store, geocoder).await?;
        }

        info!(
            upload_dir = %config.upload.file_upload_path.display(),
            max_upload = config.upload.max_file_upload,
            "Starting bootcamp directory"
        );

        HttpServer::new(config, state)
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the resolved configuration as JSON. Secrets are not serialized.
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    config.geocoder.build()?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
