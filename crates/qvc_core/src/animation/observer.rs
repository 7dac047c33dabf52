//! Observer seam between the driver and whatever draws the run.

use crate::models::{Breakthrough, RunReport};

/// Lower bound of the chart's y-axis.
pub const CHART_Y_MIN: u64 = 1;

/// Snapshot handed to the chart renderer after every frame.
#[derive(Debug, Clone, Copy)]
pub struct ChartFrame<'a> {
    /// Index of the frame just computed.
    pub frame_index: usize,
    /// Total frames in the run.
    pub frame_count: usize,
    pub times: &'a [f64],
    pub classical: &'a [u64],
    pub quantum: &'a [u64],
    /// Logarithmic y-axis.
    pub log_scale: bool,
    /// Fixed y-axis lower bound.
    pub y_min: u64,
    /// Fixed y-axis upper bound (the candidate cap).
    pub y_max: u64,
}

/// Receives run events from the driver.
///
/// Called synchronously from the frame loop; implementations should return
/// quickly. Only `on_frame` is required.
pub trait RunObserver: Send {
    /// Redraw over the accumulated series.
    fn on_frame(&mut self, frame: &ChartFrame<'_>);

    /// The one-shot breakthrough fired.
    fn on_breakthrough(&mut self, _event: &Breakthrough) {}

    /// The run finished and its report is ready.
    fn on_complete(&mut self, _report: &RunReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn on_frame(&mut self, _frame: &ChartFrame<'_>) {}
}

/// Observer that records what it saw, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub frames: Vec<(usize, usize, bool, u64)>,
    pub breakthroughs: Vec<Breakthrough>,
    pub completed: usize,
}

#[cfg(test)]
impl RunObserver for RecordingObserver {
    fn on_frame(&mut self, frame: &ChartFrame<'_>) {
        assert_eq!(frame.times.len(), frame.frame_index + 1);
        assert_eq!(frame.classical.len(), frame.times.len());
        assert_eq!(frame.quantum.len(), frame.times.len());
        self.frames
            .push((frame.frame_index, frame.times.len(), frame.log_scale, frame.y_max));
    }

    fn on_breakthrough(&mut self, event: &Breakthrough) {
        self.breakthroughs.push(event.clone());
    }

    fn on_complete(&mut self, _report: &RunReport) {
        self.completed += 1;
    }
}
