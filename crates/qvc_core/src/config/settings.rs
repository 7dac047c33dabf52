//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::RunConfig;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Defaults for a simulation run.
    #[serde(default)]
    pub run: RunSettings,

    /// Frame pacing and breakthrough sound.
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// Output and log directories.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Default inputs for a run, as shown in the settings panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Simulated run length in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,

    /// Candidate cap for both curves.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u64,

    /// SMILES string of the showcased molecule.
    #[serde(default = "default_smiles")]
    pub smiles: String,

    /// Show the molecule when the breakthrough happens.
    #[serde(default = "default_true")]
    pub show_molecule: bool,

    /// Logarithmic y-axis.
    #[serde(default)]
    pub log_scale: bool,
}

fn default_duration_secs() -> f64 {
    10.0
}

fn default_max_candidates() -> u64 {
    3000
}

fn default_smiles() -> String {
    "CC(=O)OC1=CC=CC=C1C(=O)O".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            max_candidates: default_max_candidates(),
            smiles: default_smiles(),
            show_molecule: true,
            log_scale: false,
        }
    }
}

impl RunSettings {
    /// Build a run configuration from these settings.
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            duration_secs: self.duration_secs,
            max_candidates: self.max_candidates,
            smiles: self.smiles.clone(),
            show_molecule: self.show_molecule,
            log_scale: self.log_scale,
        }
    }

    /// Overwrite these settings with the values of a run configuration.
    pub fn apply_run_config(&mut self, config: &RunConfig) {
        self.duration_secs = config.duration_secs;
        self.max_candidates = config.max_candidates;
        self.smiles = config.smiles.clone();
        self.show_molecule = config.show_molecule;
        self.log_scale = config.log_scale;
    }
}

/// Frame pacing and notification sound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Pause between frames in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Play a sound on breakthrough.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// Sound file played on breakthrough.
    #[serde(default = "default_sound_path")]
    pub sound_path: String,
}

fn default_frame_interval_ms() -> u64 {
    50
}

fn default_sound_path() -> String {
    "uploaded-sound.mp3".to_string()
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            sound_enabled: true,
            sound_path: default_sound_path(),
        }
    }
}

impl PlaybackSettings {
    /// Frame interval as a `Duration`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for molecule images.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_output_folder() -> String {
    "demo_output".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Include timestamps in console output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_timestamps: true,
        }
    }
}

/// Config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Run,
    Playback,
    Paths,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Run => "run",
            ConfigSection::Playback => "playback",
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
        }
    }

    /// All sections, in file order.
    pub fn all() -> [ConfigSection; 4] {
        [
            ConfigSection::Run,
            ConfigSection::Playback,
            ConfigSection::Paths,
            ConfigSection::Logging,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serialize() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("[run]"));
        assert!(toml_str.contains("[playback]"));
        assert!(toml_str.contains("max_candidates = 3000"));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("[run]\nmax_candidates = 500\n").unwrap();
        assert_eq!(settings.run.max_candidates, 500);
        assert_eq!(settings.run.duration_secs, 10.0);
        assert_eq!(settings.playback.frame_interval_ms, 50);
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn run_settings_round_trip_through_run_config() {
        let mut run = RunSettings::default();
        let mut config = run.to_run_config();
        config.max_candidates = 42;
        config.log_scale = true;

        run.apply_run_config(&config);
        assert_eq!(run.max_candidates, 42);
        assert!(run.log_scale);
    }

    #[test]
    fn section_table_names() {
        let names: Vec<_> = ConfigSection::all().iter().map(|s| s.table_name()).collect();
        assert_eq!(names, vec!["run", "playback", "paths", "logging"]);
    }
}
