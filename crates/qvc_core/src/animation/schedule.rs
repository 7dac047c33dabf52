//! Closed-form per-frame values for both curves.

use crate::models::{FrameSample, RunConfig};

/// Frame timing and curve formulas for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSchedule {
    frame_count: usize,
    duration_secs: f64,
    max_candidates: u64,
}

impl FrameSchedule {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            frame_count: config.frame_count(),
            duration_secs: config.duration_secs,
            max_candidates: config.max_candidates,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Values for frame `index`. Only meaningful when `frame_count > 0`.
    pub fn sample(&self, index: usize) -> FrameSample {
        FrameSample {
            index,
            time_secs: self.time_at(index),
            classical: self.classical_at(index),
            quantum: self.quantum_at(index),
        }
    }

    /// `i × (duration / frames)`.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * (self.duration_secs / self.frame_count as f64)
    }

    /// Linear growth: `floor(i × (max / frames))`.
    pub fn classical_at(&self, index: usize) -> u64 {
        let per_frame = self.max_candidates as f64 / self.frame_count as f64;
        (index as f64 * per_frame).floor() as u64
    }

    /// Exponential growth: `min(floor(2^(i × log2(max) / frames)), max)`.
    ///
    /// Reaches `max` at `i == frames`; the clamp absorbs float overshoot.
    pub fn quantum_at(&self, index: usize) -> u64 {
        let exponent =
            index as f64 * (self.max_candidates as f64).log2() / self.frame_count as f64;
        let value = exponent.exp2().floor() as u64;
        value.min(self.max_candidates)
    }
}
