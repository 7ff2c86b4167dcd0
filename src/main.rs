//! ModSync - Interactive mod selection and installation for Beat Saber
//!
//! Main entry point for the terminal application.
//!
//! # Overview
//!
//! This binary wires the library together for one interactive run:
//! - Configuration loading ([`ConfigManager`]) from `ModSync Data/`
//! - Logging infrastructure (daily rotating file, console in debug mode)
//! - A single-threaded tokio runtime; downloads and extractions run one at a time
//! - The interactive [`Session`] over stdin/stdout
//!
//! # Exit Codes
//!
//! - `0`: mods were installed, nothing matched the version, or the user cancelled
//! - `1`: the catalog could not be queried or the terminal failed
//!
//! Failures of individual mods are reported during the run and do not change
//! the exit code.

use anyhow::{Context, Result};
use modsync::prompt::{Prompts, TerminalPrompter};
use modsync::services::{AcquisitionPipeline, BeatModsClient, HttpDownloader, SevenZipArchiver};
use modsync::{APP_NAME, ConfigManager, Session, SessionError, VERSION};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let config_manager = ConfigManager::new("ModSync Data")?;
    config_manager.ensure_settings_file()?;
    let settings = config_manager.load_settings()?;

    let _guard = modsync::logging::setup_logging("logs", "modsync", settings.debug_mode)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::debug!("Settings: {:?}", settings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let client = reqwest::Client::builder()
        .user_agent(format!("{}/{}", APP_NAME, VERSION))
        .build()
        .context("Failed to build HTTP client")?;

    let answers = config_manager.answer_store(&settings)?;
    let prompts = Prompts::new(TerminalPrompter::stdio(), answers);
    let catalog = BeatModsClient::new(client.clone(), settings.catalog_url.as_str());
    let pipeline = AcquisitionPipeline::new(
        HttpDownloader::new(client, settings.catalog_url.as_str()),
        SevenZipArchiver::new(settings.seven_zip_path.as_str()),
        settings.zipped_mods_path.clone(),
        settings.keep_zipped_mods,
    );

    let mut session = Session::new(settings, prompts, catalog, pipeline);
    let result = runtime.block_on(session.run());

    let exit_code = match result {
        Ok(outcome) => {
            tracing::info!("Session finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e @ SessionError::UserAbort(_)) => {
            tracing::info!("Session ended by user: {}", e);
            eprintln!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Session failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    };

    tracing::info!("Application shutdown complete");
    Ok(exit_code)
}
