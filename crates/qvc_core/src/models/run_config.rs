//! Run configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed sampling rate of the animation.
pub const FRAMES_PER_SECOND: f64 = 5.0;

/// Longest run accepted, in frames (a little over five and a half hours).
pub const MAX_FRAMES: usize = 100_000;

/// Invalid run configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunConfigError {
    #[error("Duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("Duration of {duration_secs}s needs {frames} frames, more than the {max} allowed")]
    TooManyFrames {
        duration_secs: f64,
        frames: f64,
        max: usize,
    },

    #[error("Max candidates must be at least 1")]
    ZeroCandidates,
}

/// Inputs for one run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Simulated run length in seconds.
    pub duration_secs: f64,
    /// Candidate cap; both curves are plotted against it.
    pub max_candidates: u64,
    /// Molecule shown on breakthrough. Not validated here.
    pub smiles: String,
    /// Attach the molecule to the breakthrough event.
    pub show_molecule: bool,
    /// Logarithmic y-axis.
    pub log_scale: bool,
}

impl RunConfig {
    /// Check the numeric inputs.
    pub fn validate(&self) -> Result<(), RunConfigError> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(RunConfigError::InvalidDuration(self.duration_secs));
        }
        let frames = (self.duration_secs * FRAMES_PER_SECOND).round();
        if frames > MAX_FRAMES as f64 {
            return Err(RunConfigError::TooManyFrames {
                duration_secs: self.duration_secs,
                frames,
                max: MAX_FRAMES,
            });
        }
        if self.max_candidates == 0 {
            return Err(RunConfigError::ZeroCandidates);
        }
        Ok(())
    }

    /// Number of frames in the run: `round(duration × 5)`.
    ///
    /// Can be zero for very short durations.
    pub fn frame_count(&self) -> usize {
        (self.duration_secs * FRAMES_PER_SECOND).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(duration_secs: f64, max_candidates: u64) -> RunConfig {
        RunConfig {
            duration_secs,
            max_candidates,
            smiles: "C".to_string(),
            show_molecule: false,
            log_scale: false,
        }
    }

    #[test]
    fn frame_count_is_five_per_second() {
        assert_eq!(config(10.0, 3000).frame_count(), 50);
        assert_eq!(config(5.0, 100).frame_count(), 25);
        assert_eq!(config(0.3, 10).frame_count(), 2);
    }

    #[test]
    fn tiny_duration_has_no_frames() {
        let cfg = config(0.05, 10);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.frame_count(), 0);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_eq!(
            config(0.0, 10).validate(),
            Err(RunConfigError::InvalidDuration(0.0))
        );
        assert!(config(f64::NAN, 10).validate().is_err());
        assert!(config(-1.0, 10).validate().is_err());
        assert_eq!(config(1.0, 0).validate(), Err(RunConfigError::ZeroCandidates));
    }

    #[test]
    fn rejects_runs_longer_than_the_frame_cap() {
        assert!(matches!(
            config(1e18, 10).validate(),
            Err(RunConfigError::TooManyFrames { max: MAX_FRAMES, .. })
        ));

        let longest = config(MAX_FRAMES as f64 / FRAMES_PER_SECOND, 10);
        assert!(longest.validate().is_ok());
        assert_eq!(longest.frame_count(), MAX_FRAMES);
        assert!(config(longest.duration_secs + 1.0, 10).validate().is_err());
    }
}
