//! Tokio timer driver for production use.
//!
//! # Testing
//!
//! See `MockTimer` (in `crate::infrastructure::mocks`) for a controllable
//! virtual-time driver. Available with the `test-helpers` feature or in test
//! builds:
//!
//! ```toml
//! [dev-dependencies]
//! signal-debounce = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::{TimerCallback, TimerDriver, TimerHandle};
use std::time::Duration;

/// Timer driver backed by the Tokio runtime.
///
/// Each scheduled timer is a spawned task that sleeps for the delay and then
/// runs the callback. Cancellation aborts the task, which is synchronous and
/// idempotent; a callback that already woke from its sleep may still run, and
/// callers guard against that (the coordinator uses an epoch counter).
///
/// Scheduling panics outside a Tokio runtime context, matching
/// `tokio::spawn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl TokioTimer {
    /// Create a new Tokio timer driver.
    pub fn new() -> Self {
        Self
    }
}

impl TimerDriver for TokioTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Box<dyn TimerHandle> {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Box::new(TokioTimerHandle { task })
    }
}

#[derive(Debug)]
struct TokioTimerHandle {
    task: tokio::task::JoinHandle<()>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&self) {
        self.task.abort();
    }
}
