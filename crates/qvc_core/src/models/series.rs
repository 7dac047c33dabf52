//! Per-frame samples and the accumulated series.

use serde::{Deserialize, Serialize};

/// Values computed for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Frame index.
    pub index: usize,
    /// Elapsed simulated time in seconds.
    pub time_secs: f64,
    /// Candidates screened by the classical model so far.
    pub classical: u64,
    /// Candidates screened by the quantum model so far.
    pub quantum: u64,
}

/// Append-only time, classical and quantum series.
///
/// All three sequences always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesState {
    times: Vec<f64>,
    classical: Vec<u64>,
    quantum: Vec<u64>,
}

impl SeriesState {
    /// Empty series with room for `frames` samples.
    pub fn with_capacity(frames: usize) -> Self {
        Self {
            times: Vec::with_capacity(frames),
            classical: Vec::with_capacity(frames),
            quantum: Vec::with_capacity(frames),
        }
    }

    /// Append one frame's values.
    pub(crate) fn push(&mut self, sample: &FrameSample) {
        self.times.push(sample.time_secs);
        self.classical.push(sample.classical);
        self.quantum.push(sample.quantum);
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn classical(&self) -> &[u64] {
        &self.classical
    }

    pub fn quantum(&self) -> &[u64] {
        &self.quantum
    }

    /// Number of frames recorded.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Most recent sample, if any.
    pub fn last(&self) -> Option<FrameSample> {
        let index = self.len().checked_sub(1)?;
        Some(FrameSample {
            index,
            time_secs: self.times[index],
            classical: self.classical[index],
            quantum: self.quantum[index],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_lengths_equal() {
        let mut series = SeriesState::with_capacity(2);
        assert!(series.is_empty());
        assert!(series.last().is_none());

        series.push(&FrameSample {
            index: 0,
            time_secs: 0.0,
            classical: 0,
            quantum: 1,
        });
        series.push(&FrameSample {
            index: 1,
            time_secs: 0.2,
            classical: 60,
            quantum: 2,
        });

        assert_eq!(series.len(), 2);
        assert_eq!(series.times().len(), series.classical().len());
        assert_eq!(series.classical().len(), series.quantum().len());

        let last = series.last().unwrap();
        assert_eq!(last.index, 1);
        assert_eq!(last.classical, 60);
        assert_eq!(last.quantum, 2);
    }
}
