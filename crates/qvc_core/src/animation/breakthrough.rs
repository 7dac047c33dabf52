//! One-shot breakthrough detection.

use crate::models::{FrameSample, BREAKTHROUGH_FACTOR};

/// Latches the first frame where quantum exceeds three times classical.
///
/// Once fired it stays fired for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakthroughLatch {
    fired_at: Option<usize>,
}

impl BreakthroughLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame. Returns true only on the frame that fires the latch.
    ///
    /// At frame 0 the classical count is 0, so any positive quantum count
    /// fires immediately.
    pub fn observe(&mut self, sample: &FrameSample) -> bool {
        if self.fired_at.is_some() {
            return false;
        }
        if sample.quantum > sample.classical.saturating_mul(BREAKTHROUGH_FACTOR) {
            self.fired_at = Some(sample.index);
            return true;
        }
        false
    }

    pub fn is_fired(&self) -> bool {
        self.fired_at.is_some()
    }

    /// Frame on which the latch fired.
    pub fn fired_at(&self) -> Option<usize> {
        self.fired_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(index: usize, classical: u64, quantum: u64) -> FrameSample {
        FrameSample {
            index,
            time_secs: index as f64,
            classical,
            quantum,
        }
    }

    #[test]
    fn fires_on_frame_zero() {
        let mut latch = BreakthroughLatch::new();
        assert!(latch.observe(&sample(0, 0, 1)));
        assert_eq!(latch.fired_at(), Some(0));
    }

    #[test]
    fn fires_once_and_stays_fired() {
        let mut latch = BreakthroughLatch::new();
        assert!(!latch.observe(&sample(0, 10, 30)));
        assert!(!latch.is_fired());
        assert!(latch.observe(&sample(1, 10, 31)));
        assert!(!latch.observe(&sample(2, 10, 100)));
        assert!(!latch.observe(&sample(3, 100, 1)));
        assert!(latch.is_fired());
        assert_eq!(latch.fired_at(), Some(1));
    }

    #[test]
    fn equal_to_threshold_does_not_fire() {
        let mut latch = BreakthroughLatch::new();
        assert!(!latch.observe(&sample(4, 5, 15)));
    }
}
