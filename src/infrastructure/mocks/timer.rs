//! Mock timer driver for testing.

use crate::application::ports::{TimerCallback, TimerDriver, TimerHandle};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock timer driver for testing.
///
/// Keeps a virtual clock that only moves when a test calls
/// [`MockTimer::advance`], enabling deterministic testing of quiet-window
/// behavior. Due callbacks fire in deadline order (scheduling order breaks
/// ties), and a callback may itself schedule follow-up timers, which fire in
/// the same `advance` call if they come due within it.
///
/// # Examples
///
/// ```
/// use signal_debounce::infrastructure::mocks::MockTimer;
/// use signal_debounce::TimerDriver;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let timer = MockTimer::new();
/// let fired = Arc::new(AtomicUsize::new(0));
/// let probe = Arc::clone(&fired);
///
/// timer.schedule(Duration::from_millis(100), Box::new(move || {
///     probe.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// timer.advance(Duration::from_millis(99));
/// assert_eq!(fired.load(Ordering::SeqCst), 0);
///
/// timer.advance(Duration::from_millis(1));
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
///
/// # Thread Safety
///
/// `MockTimer` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying timeline.
#[derive(Clone)]
pub struct MockTimer {
    inner: Arc<Mutex<MockTimerInner>>,
}

struct MockTimerInner {
    now: Duration,
    next_id: u64,
    scheduled: Vec<ScheduledTimer>,
}

struct ScheduledTimer {
    id: u64,
    deadline: Duration,
    callback: TimerCallback,
}

impl MockTimer {
    /// Create a mock timer with its virtual clock at zero.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTimerInner {
                now: Duration::ZERO,
                next_id: 0,
                scheduled: Vec::new(),
            })),
        }
    }

    /// Advance the virtual clock, firing every due, uncancelled callback in
    /// deadline order.
    ///
    /// Callbacks run without the internal lock held, so they may schedule or
    /// cancel timers themselves. `advance(Duration::ZERO)` fires timers
    /// scheduled with a zero delay.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;

        loop {
            let due = {
                let mut inner = self.lock();
                let next = inner
                    .scheduled
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.deadline <= target)
                    .min_by_key(|(_, timer)| (timer.deadline, timer.id))
                    .map(|(index, _)| index);

                match next {
                    Some(index) => {
                        let timer = inner.scheduled.remove(index);
                        inner.now = timer.deadline;
                        Some(timer.callback)
                    }
                    None => None,
                }
            };

            match due {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.lock().now = target;
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of scheduled, uncancelled timers.
    pub fn pending(&self) -> usize {
        self.lock().scheduled.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockTimerInner> {
        self.inner
            .lock()
            .expect("MockTimer mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("MockTimer")
            .field("now", &inner.now)
            .field("pending", &inner.scheduled.len())
            .finish()
    }
}

impl TimerDriver for MockTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Box<dyn TimerHandle> {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline = inner.now + delay;
        inner.scheduled.push(ScheduledTimer {
            id,
            deadline,
            callback,
        });
        Box::new(MockTimerHandle {
            id,
            inner: Arc::clone(&self.inner),
        })
    }
}

struct MockTimerHandle {
    id: u64,
    inner: Arc<Mutex<MockTimerInner>>,
}

impl TimerHandle for MockTimerHandle {
    fn cancel(&self) {
        let mut inner = self
            .inner
            .lock()
            .expect("MockTimer mutex poisoned - a test thread panicked while holding the lock");
        inner.scheduled.retain(|timer| timer.id != self.id);
    }
}
