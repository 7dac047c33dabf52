//! Frame-by-frame run of both growth curves.
//!
//! - [`FrameSchedule`] computes each frame's time and candidate counts
//! - [`BreakthroughLatch`] detects the one-shot breakthrough
//! - [`AnimationDriver`] runs the paced loop and reports to a [`RunObserver`]
//! - [`Session`] owns the start/restart lifecycle

mod breakthrough;
mod driver;
mod observer;
mod schedule;
mod session;

pub use breakthrough::BreakthroughLatch;
pub use driver::{AnimationDriver, DEFAULT_FRAME_INTERVAL};
pub use observer::{ChartFrame, NullObserver, RunObserver, CHART_Y_MIN};
pub use schedule::FrameSchedule;
pub use session::{Command, Session, SessionError, SessionState};
