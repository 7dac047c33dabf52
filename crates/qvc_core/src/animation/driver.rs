//! Frame loop that drives one run.

use std::time::Duration;

use chrono::Local;

use super::breakthrough::BreakthroughLatch;
use super::observer::{ChartFrame, RunObserver, CHART_Y_MIN};
use super::schedule::FrameSchedule;
use crate::models::{
    Breakthrough, FinalMetrics, FrameSample, MetricsOutcome, RunConfig, RunConfigError, RunReport,
    SeriesState,
};
use crate::molecule::MoleculeCard;
use crate::notify::SoundPlayer;

/// Default pause between frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the fixed-length frame loop.
///
/// The driver is stateless between runs; every call to [`run`](Self::run)
/// starts from empty series and an unfired breakthrough latch.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    frame_interval: Duration,
    sound: Option<SoundPlayer>,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl AnimationDriver {
    /// Driver pausing `frame_interval` after each frame. Zero disables pacing.
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            sound: None,
        }
    }

    /// Play this sound when the breakthrough fires.
    pub fn with_sound(mut self, sound: SoundPlayer) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn sound(&self) -> Option<&SoundPlayer> {
        self.sound.as_ref()
    }

    /// Execute one run.
    ///
    /// Fails only when the configuration is invalid; every collaborator
    /// failure degrades instead. A configuration with zero frames completes
    /// immediately with empty series and [`MetricsOutcome::NoData`].
    pub async fn run(
        &self,
        config: &RunConfig,
        run_number: u32,
        observer: &mut dyn RunObserver,
    ) -> Result<RunReport, RunConfigError> {
        config.validate()?;

        let started_at = Local::now();
        let schedule = FrameSchedule::new(config);
        let frame_count = schedule.frame_count();
        let mut series = SeriesState::with_capacity(frame_count);
        let mut latch = BreakthroughLatch::new();
        let mut breakthrough = None;

        tracing::info!(
            run = run_number,
            frames = frame_count,
            duration_secs = config.duration_secs,
            max_candidates = config.max_candidates,
            log_scale = config.log_scale,
            "Run started"
        );

        for index in 0..frame_count {
            let sample = schedule.sample(index);
            series.push(&sample);
            tracing::trace!(
                frame = index,
                t = sample.time_secs,
                classical = sample.classical,
                quantum = sample.quantum,
                "Frame"
            );

            observer.on_frame(&ChartFrame {
                frame_index: index,
                frame_count,
                times: series.times(),
                classical: series.classical(),
                quantum: series.quantum(),
                log_scale: config.log_scale,
                y_min: CHART_Y_MIN,
                y_max: config.max_candidates,
            });

            if latch.observe(&sample) {
                let event = self.fire_breakthrough(config, sample);
                observer.on_breakthrough(&event);
                breakthrough = Some(event);
            }

            if !self.frame_interval.is_zero() {
                tokio::time::sleep(self.frame_interval).await;
            }
        }

        let metrics = match FinalMetrics::derive(&series, config) {
            Some(metrics) => MetricsOutcome::Computed(metrics),
            None => {
                tracing::warn!(run = run_number, "Run produced no frames, skipping metrics");
                MetricsOutcome::NoData
            }
        };
        if let Some(m) = metrics.metrics() {
            if m.speedup.is_none() {
                tracing::warn!(run = run_number, "Classical total is zero, speedup undefined");
            }
            tracing::info!(
                run = run_number,
                quantum_total = m.quantum_total,
                classical_total = m.classical_total,
                "Run completed"
            );
        }

        let report = RunReport {
            run_number,
            started_at,
            config: config.clone(),
            series,
            breakthrough,
            metrics,
        };
        observer.on_complete(&report);
        Ok(report)
    }

    /// Side effects of the breakthrough: sound and molecule card.
    fn fire_breakthrough(
        &self,
        config: &RunConfig,
        sample: FrameSample,
    ) -> Breakthrough {
        tracing::info!(
            frame = sample.index,
            classical = sample.classical,
            quantum = sample.quantum,
            "Quantum AI breakthrough"
        );

        if let Some(sound) = &self.sound {
            // Detached: the loop never waits on playback
            let _ = sound.play_detached();
        }

        let molecule = config
            .show_molecule
            .then(|| MoleculeCard::prepare(&config.smiles));

        Breakthrough { sample, molecule }
    }
}
