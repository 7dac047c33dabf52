//! Data models for the demo.
//!
//! This module contains the core data structures:
//! - Run configuration and its validation
//! - Per-frame samples and accumulated series
//! - Final metrics and the run report
//! - Static model score cards

mod metrics;
mod report;
mod run_config;
mod scores;
mod series;

pub use metrics::{round_to, FinalMetrics, MetricsOutcome};
pub use report::{Breakthrough, RunReport, BREAKTHROUGH_FACTOR};
pub use run_config::{RunConfig, RunConfigError, FRAMES_PER_SECOND, MAX_FRAMES};
pub use scores::{model_scores, ModelScores, CLASSICAL_SCORES, QUANTUM_SCORES};
pub use series::{FrameSample, SeriesState};
