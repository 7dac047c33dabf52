//! Command-line arguments.
//!
//! Flags override the values from the settings file for one invocation.

use std::path::PathBuf;

use clap::Parser;

use qvc_core::config::Settings;
use qvc_core::logging::LogLevel;
use qvc_core::models::RunConfig;

/// Quantum AI vs Classical AI: visualizing drug discovery speed
#[derive(Parser, Debug, Clone)]
#[command(name = "quantum-vs-classical")]
#[command(author, version, about)]
pub struct Cli {
    /// Settings file (created with defaults when missing)
    #[arg(long, value_name = "PATH", default_value = ".config/settings.toml")]
    pub config: PathBuf,

    /// Simulated run length in seconds
    #[arg(short, long, value_name = "SECS")]
    pub duration: Option<f64>,

    /// Candidate cap for both models
    #[arg(short = 'm', long, value_name = "N")]
    pub max_candidates: Option<u64>,

    /// SMILES of the molecule shown on breakthrough
    #[arg(short, long)]
    pub smiles: Option<String>,

    /// Show the molecule on breakthrough
    #[arg(long, conflicts_with = "no_molecule")]
    pub show_molecule: bool,

    /// Do not show the molecule on breakthrough
    #[arg(long)]
    pub no_molecule: bool,

    /// Logarithmic y-axis
    #[arg(long, conflicts_with = "linear")]
    pub log_scale: bool,

    /// Linear y-axis
    #[arg(long)]
    pub linear: bool,

    /// Do not play the breakthrough sound
    #[arg(long)]
    pub no_sound: bool,

    /// Pause between frames in milliseconds
    #[arg(long, value_name = "MS")]
    pub frame_interval_ms: Option<u64>,

    /// Print the final report as JSON instead of drawing the chart
    #[arg(long)]
    pub json: bool,

    /// Exit after one run instead of offering a restart
    #[arg(long)]
    pub once: bool,

    /// Write the effective run settings back to the settings file
    #[arg(long)]
    pub save_defaults: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    /// Run configuration: settings file values overridden by flags.
    pub fn run_config(&self, settings: &Settings) -> RunConfig {
        let mut config = settings.run.to_run_config();
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(max) = self.max_candidates {
            config.max_candidates = max;
        }
        if let Some(smiles) = &self.smiles {
            config.smiles = smiles.clone();
        }
        if self.show_molecule {
            config.show_molecule = true;
        }
        if self.no_molecule {
            config.show_molecule = false;
        }
        if self.log_scale {
            config.log_scale = true;
        }
        if self.linear {
            config.log_scale = false;
        }
        config
    }

    pub fn log_level(&self, settings: &Settings) -> LogLevel {
        self.log_level.unwrap_or(settings.logging.level)
    }

    pub fn sound_enabled(&self, settings: &Settings) -> bool {
        settings.playback.sound_enabled && !self.no_sound
    }

    pub fn frame_interval_ms(&self, settings: &Settings) -> u64 {
        self.frame_interval_ms
            .unwrap_or(settings.playback.frame_interval_ms)
    }
}
