//! Quantum vs Classical - Main entry point
//!
//! Terminal front end. It handles:
//! - Argument parsing and configuration loading
//! - Directory creation
//! - Application-level logging initialization
//! - Handing over to the run loop

use anyhow::{Context, Result};
use clap::Parser;

use qvc_core::config::{ConfigManager, ConfigSection};
use qvc_core::logging::{init_file_tracing, init_tracing_with_file};

mod app;
mod args;
mod chart;
mod panels;

use args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logs directory path)
    let mut config_manager = ConfigManager::new(&cli.config);
    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    // Ensure all configured directories exist
    if let Err(e) = config_manager.ensure_dirs_exist() {
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    // The chart owns the terminal, so only --json logs to stderr
    let settings = config_manager.settings();
    let level = cli.log_level(settings);
    let logs_dir = config_manager.logs_folder();
    let _log_guard = if cli.json {
        init_tracing_with_file(level, settings.logging.show_timestamps, &logs_dir)
    } else {
        init_file_tracing(level, &logs_dir)
    };

    tracing::info!("Quantum vs Classical starting");
    tracing::info!("Config: {}", config_manager.path().display());
    tracing::info!("Core version: {}", qvc_core::version());

    if cli.save_defaults {
        let run_config = cli.run_config(config_manager.settings());
        config_manager
            .settings_mut()
            .run
            .apply_run_config(&run_config);
        config_manager
            .update_section(ConfigSection::Run)
            .context("Failed to save run defaults")?;
        tracing::info!("Saved run defaults to {}", config_manager.path().display());
    }

    app::run(&cli, &mut config_manager).await
}
