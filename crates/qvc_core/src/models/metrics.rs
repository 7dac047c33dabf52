//! Final metrics derived once a run completes.

use serde::{Deserialize, Serialize};

use super::run_config::RunConfig;
use super::series::SeriesState;

/// Totals and ratios shown after a run.
///
/// Ratios are `None` when their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    /// Last quantum value.
    pub quantum_total: u64,
    /// Last classical value.
    pub classical_total: u64,
    /// `quantum_total / classical_total`.
    pub speedup: Option<f64>,
    /// `duration / quantum_total`, seconds per candidate.
    pub time_per_candidate_quantum: Option<f64>,
    /// `duration / classical_total`, seconds per candidate.
    pub time_per_candidate_classical: Option<f64>,
}

impl FinalMetrics {
    /// Derive metrics from the last samples of a run.
    ///
    /// Returns `None` for empty series.
    pub fn derive(series: &SeriesState, config: &RunConfig) -> Option<Self> {
        let last = series.last()?;
        let duration = config.duration_secs;

        Some(Self {
            quantum_total: last.quantum,
            classical_total: last.classical,
            speedup: guarded_div(last.quantum as f64, last.classical),
            time_per_candidate_quantum: guarded_div(duration, last.quantum),
            time_per_candidate_classical: guarded_div(duration, last.classical),
        })
    }

    /// How many times faster quantum screens a single candidate.
    pub fn per_candidate_advantage(&self) -> Option<f64> {
        let quantum = self.time_per_candidate_quantum?;
        let classical = self.time_per_candidate_classical?;
        if quantum == 0.0 {
            return None;
        }
        Some(classical / quantum)
    }
}

/// Outcome of the metrics step of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricsOutcome {
    /// Metrics were derived from the completed series.
    Computed(FinalMetrics),
    /// The run had zero frames.
    NoData,
}

impl MetricsOutcome {
    pub fn metrics(&self) -> Option<&FinalMetrics> {
        match self {
            MetricsOutcome::Computed(metrics) => Some(metrics),
            MetricsOutcome::NoData => None,
        }
    }
}

fn guarded_div(numerator: f64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator / denominator as f64)
    }
}

/// Round to a fixed number of decimal places for display.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrameSample;

    fn config(duration_secs: f64) -> RunConfig {
        RunConfig {
            duration_secs,
            max_candidates: 3000,
            smiles: String::new(),
            show_molecule: false,
            log_scale: false,
        }
    }

    fn series_ending(classical: u64, quantum: u64) -> SeriesState {
        let mut series = SeriesState::default();
        series.push(&FrameSample {
            index: 0,
            time_secs: 0.0,
            classical,
            quantum,
        });
        series
    }

    #[test]
    fn derives_ratios() {
        let metrics = FinalMetrics::derive(&series_ending(2940, 2524), &config(10.0)).unwrap();
        assert_eq!(metrics.quantum_total, 2524);
        assert_eq!(metrics.classical_total, 2940);
        assert!((metrics.speedup.unwrap() - 2524.0 / 2940.0).abs() < 1e-12);
        assert!((metrics.time_per_candidate_quantum.unwrap() - 10.0 / 2524.0).abs() < 1e-12);
        assert!((metrics.time_per_candidate_classical.unwrap() - 10.0 / 2940.0).abs() < 1e-12);
        assert!((metrics.per_candidate_advantage().unwrap() - 2524.0 / 2940.0).abs() < 1e-9);
    }

    #[test]
    fn zero_classical_total_is_undefined() {
        let metrics = FinalMetrics::derive(&series_ending(0, 1), &config(10.0)).unwrap();
        assert_eq!(metrics.speedup, None);
        assert_eq!(metrics.time_per_candidate_classical, None);
        assert_eq!(metrics.time_per_candidate_quantum, Some(10.0));
        assert_eq!(metrics.per_candidate_advantage(), None);
    }

    #[test]
    fn zero_quantum_total_is_undefined() {
        let metrics = FinalMetrics::derive(&series_ending(5, 0), &config(1.0)).unwrap();
        assert_eq!(metrics.speedup, Some(0.0));
        assert_eq!(metrics.time_per_candidate_quantum, None);
    }

    #[test]
    fn empty_series_has_no_metrics() {
        assert!(FinalMetrics::derive(&SeriesState::default(), &config(1.0)).is_none());
    }

    #[test]
    fn rounds_for_display() {
        assert_eq!(round_to(0.858503, 2), 0.86);
        assert_eq!(round_to(0.0039619651, 5), 0.00396);
    }

    #[test]
    fn no_data_serializes_with_status_tag() {
        let json = serde_json::to_string(&MetricsOutcome::NoData).unwrap();
        assert_eq!(json, r#"{"status":"no_data"}"#);
    }
}
