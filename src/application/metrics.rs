//! Observability metrics for signal coordination.
//!
//! Provides metrics about admission and supersession behavior for monitoring
//! and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking coordination statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads, and
/// can be queried at any time for observability.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total number of signals admitted (leading or deferred)
    signals_admitted: AtomicU64,
    /// Total number of queued signals cancelled by a newer arrival
    signals_superseded: AtomicU64,
    /// Total number of quiet windows that elapsed with nothing queued
    windows_expired: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                signals_admitted: AtomicU64::new(0),
                signals_superseded: AtomicU64::new(0),
                windows_expired: AtomicU64::new(0),
            }),
        }
    }

    /// Record an admitted signal.
    pub(crate) fn record_admitted(&self) {
        self.inner.signals_admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a superseded signal.
    pub(crate) fn record_superseded(&self) {
        self.inner
            .signals_superseded
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a quiet window that closed empty.
    pub(crate) fn record_window_expired(&self) {
        self.inner.windows_expired.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of signals admitted.
    pub fn signals_admitted(&self) -> u64 {
        self.inner.signals_admitted.load(Ordering::Relaxed)
    }

    /// Get the total number of signals superseded.
    pub fn signals_superseded(&self) -> u64 {
        self.inner.signals_superseded.load(Ordering::Relaxed)
    }

    /// Get the total number of empty quiet windows.
    pub fn windows_expired(&self) -> u64 {
        self.inner.windows_expired.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            signals_admitted: self.signals_admitted(),
            signals_superseded: self.signals_superseded(),
            windows_expired: self.windows_expired(),
        }
    }

    /// Reset all metrics to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.signals_admitted.store(0, Ordering::Relaxed);
        self.inner.signals_superseded.store(0, Ordering::Relaxed);
        self.inner.windows_expired.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of signals admitted (leading or deferred)
    pub signals_admitted: u64,
    /// Total number of queued signals cancelled by a newer arrival
    pub signals_superseded: u64,
    /// Total number of quiet windows that elapsed with nothing queued
    pub windows_expired: u64,
}

impl MetricsSnapshot {
    /// Calculate the supersession rate (0.0 to 1.0).
    ///
    /// Returns the ratio of superseded signals to total signals.
    /// Returns 0.0 if no signals have been processed.
    pub fn supersession_rate(&self) -> f64 {
        let total = self.total_signals();
        if total == 0 {
            0.0
        } else {
            self.signals_superseded as f64 / total as f64
        }
    }

    /// Get the total number of signals processed (admitted + superseded).
    pub fn total_signals(&self) -> u64 {
        self.signals_admitted.saturating_add(self.signals_superseded)
    }
}
