//! Run report and breakthrough event.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::metrics::MetricsOutcome;
use super::run_config::RunConfig;
use super::series::{FrameSample, SeriesState};
use crate::molecule::MoleculeCard;

/// Quantum screened more than this many times the classical count.
pub const BREAKTHROUGH_FACTOR: u64 = 3;

/// The one-shot breakthrough notification of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakthrough {
    /// Frame on which the condition first held.
    pub sample: FrameSample,
    /// Molecule to showcase, when enabled for the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecule: Option<MoleculeCard>,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Sequence number of the run within its session (1-based).
    pub run_number: u32,
    /// When the run started.
    pub started_at: DateTime<Local>,
    /// Configuration the run used.
    pub config: RunConfig,
    /// Accumulated series.
    pub series: SeriesState,
    /// Breakthrough event, if the condition was ever met.
    pub breakthrough: Option<Breakthrough>,
    /// Final metrics, or the no-data marker.
    pub metrics: MetricsOutcome,
}

impl RunReport {
    pub fn frame_count(&self) -> usize {
        self.series.len()
    }
}
