//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use std::fmt::Debug;
use std::time::Duration;

/// Callback scheduled through a [`TimerDriver`]. Runs at most once.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Port for the host's timer facility.
///
/// The coordinator arms exactly one timer per pending entry and never touches
/// a concrete timer implementation. Infrastructure provides concrete drivers
/// (`TokioTimer` for production, `MockTimer` for deterministic tests).
pub trait TimerDriver: Send + Sync + Debug {
    /// Schedule `callback` to run once `delay` has elapsed.
    ///
    /// Must not invoke `callback` synchronously, even for a zero delay; the
    /// coordinator may hold its own lock while scheduling.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Box<dyn TimerHandle>;
}

/// Handle owning a scheduled timer.
pub trait TimerHandle: Send {
    /// Cancel the scheduled callback.
    ///
    /// Synchronous and idempotent. A callback that has already started
    /// running is not interrupted; callers needing stronger guarantees guard
    /// the callback itself (the coordinator uses an epoch counter).
    fn cancel(&self);
}
