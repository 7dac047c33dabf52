//! Run/restart state machine.
//!
//! A [`Session`] owns the driver and the current configuration and accepts
//! discrete [`Command`]s:
//!
//! ```text
//! NotStarted --Start--> Running --(frames done)--> Completed
//! Completed --Restart--> Running --(frames done)--> Completed
//! ```
//!
//! Anything else is rejected with [`SessionError::InvalidTransition`].

use std::fmt;

use thiserror::Error;

use super::driver::AnimationDriver;
use super::observer::RunObserver;
use crate::models::{RunConfig, RunConfigError, RunReport};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::Running => write!(f, "running"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Commands accepted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Restart => write!(f, "restart"),
        }
    }
}

/// Session command failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The command is not valid in the current state.
    #[error("Cannot {command} while session is {state}")]
    InvalidTransition {
        state: SessionState,
        command: Command,
    },

    /// The configuration was rejected before the run began.
    #[error("Invalid run configuration: {0}")]
    Config(#[from] RunConfigError),
}

impl SessionError {
    pub fn invalid_transition(state: SessionState, command: Command) -> Self {
        Self::InvalidTransition { state, command }
    }
}

/// Owns the run lifecycle.
#[derive(Debug)]
pub struct Session {
    driver: AnimationDriver,
    config: RunConfig,
    state: SessionState,
    last_report: Option<RunReport>,
    runs_started: u32,
}

impl Session {
    pub fn new(driver: AnimationDriver, config: RunConfig) -> Self {
        Self {
            driver,
            config,
            state: SessionState::NotStarted,
            last_report: None,
            runs_started: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Replace the driver (pacing and sound) used by the next run.
    pub fn set_driver(&mut self, driver: AnimationDriver) {
        self.driver = driver;
    }

    /// Replace the configuration used by the next run.
    pub fn set_config(&mut self, config: RunConfig) {
        self.config = config;
    }

    /// Report of the most recent completed run.
    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Number of runs started so far.
    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    /// Apply a command and, when accepted, execute the run to completion.
    ///
    /// Restart discards the previous report before the new run begins.
    pub async fn handle(
        &mut self,
        command: Command,
        observer: &mut dyn RunObserver,
    ) -> Result<&RunReport, SessionError> {
        match (self.state, command) {
            (SessionState::NotStarted, Command::Start)
            | (SessionState::Completed, Command::Restart) => {}
            (state, command) => {
                tracing::warn!(%state, %command, "Rejected session command");
                return Err(SessionError::invalid_transition(state, command));
            }
        }
        self.config.validate()?;

        if command == Command::Restart {
            tracing::info!(previous_run = self.runs_started, "Restarting run");
            self.last_report = None;
        }

        self.state = SessionState::Running;
        self.runs_started += 1;
        let report = self
            .driver
            .run(&self.config, self.runs_started, observer)
            .await?;
        self.state = SessionState::Completed;

        Ok(self.last_report.insert(report))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::observer::RecordingObserver;

    fn session(max_candidates: u64) -> Session {
        Session::new(
            AnimationDriver::new(Duration::ZERO),
            RunConfig {
                duration_secs: 2.0,
                max_candidates,
                smiles: "CCO".to_string(),
                show_molecule: false,
                log_scale: false,
            },
        )
    }

    #[tokio::test]
    async fn start_then_restart() {
        let mut session = session(100);
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.last_report().is_none());

        let mut observer = RecordingObserver::default();
        let first = session.handle(Command::Start, &mut observer).await.unwrap().clone();
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(first.run_number, 1);

        let second = session.handle(Command::Restart, &mut observer).await.unwrap().clone();
        assert_eq!(second.run_number, 2);
        assert_eq!(first.series, second.series);
        assert_eq!(session.runs_started(), 2);
        assert_eq!(observer.completed, 2);
        assert_eq!(observer.breakthroughs.len(), 2);
    }

    #[tokio::test]
    async fn restart_before_start_is_rejected() {
        let mut session = session(100);
        let err = session
            .handle(Command::Restart, &mut RecordingObserver::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::invalid_transition(SessionState::NotStarted, Command::Restart)
        );
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.runs_started(), 0);
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let mut session = session(100);
        let mut observer = RecordingObserver::default();
        session.handle(Command::Start, &mut observer).await.unwrap();

        let err = session.handle(Command::Start, &mut observer).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(err.to_string(), "Cannot start while session is completed");
        assert!(session.last_report().is_some());
    }

    #[tokio::test]
    async fn restart_uses_replaced_config() {
        let mut session = session(100);
        let mut observer = RecordingObserver::default();
        session.handle(Command::Start, &mut observer).await.unwrap();

        let mut config = session.config().clone();
        config.duration_secs = 4.0;
        session.set_config(config);
        let report = session.handle(Command::Restart, &mut observer).await.unwrap();
        assert_eq!(report.frame_count(), 20);
    }

    #[tokio::test]
    async fn restart_uses_replaced_driver() {
        let mut session = session(100);
        let mut observer = RecordingObserver::default();
        session.handle(Command::Start, &mut observer).await.unwrap();

        session.set_driver(AnimationDriver::new(Duration::from_millis(7)));
        assert_eq!(session.driver().frame_interval(), Duration::from_millis(7));
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[tokio::test]
    async fn rejected_restart_config_can_be_corrected() {
        let mut session = session(100);
        let mut observer = RecordingObserver::default();
        session.handle(Command::Start, &mut observer).await.unwrap();

        let mut config = session.config().clone();
        config.max_candidates = 0;
        session.set_config(config.clone());
        let err = session.handle(Command::Restart, &mut observer).await.unwrap_err();
        assert_eq!(err, SessionError::Config(RunConfigError::ZeroCandidates));
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.last_report().is_some());

        config.max_candidates = 100;
        session.set_config(config);
        let report = session.handle(Command::Restart, &mut observer).await.unwrap();
        assert_eq!(report.run_number, 2);
    }

    #[tokio::test]
    async fn invalid_config_leaves_state_untouched() {
        let mut session = session(0);
        let err = session
            .handle(Command::Start, &mut RecordingObserver::default())
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Config(RunConfigError::ZeroCandidates));
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.runs_started(), 0);
    }
}
