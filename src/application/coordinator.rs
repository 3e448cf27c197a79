//! Burst coordination logic.
//!
//! The coordinator decides, per arriving signal, whether to admit it
//! downstream, queue it for the end of the quiet window, or cancel the
//! previously queued signal it supersedes. It owns the pending entry and the
//! single live timer that pairs with it.

use crate::application::metrics::Metrics;
use crate::application::ports::{TimerDriver, TimerHandle};
use crate::domain::config::DebounceConfig;
use crate::domain::state::{ArrivalAction, ChannelState, FireAction};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Capability that lets a signal proceed downstream. Consumed on invocation,
/// so it can never fire twice.
pub type Continuation = Box<dyn FnOnce() + Send + 'static>;

/// Capability that tells a signal's originator it has been superseded and
/// must stop. Consumed on invocation.
pub type Cancellation = Box<dyn FnOnce() + Send + 'static>;

/// The capability pair carried by one incoming signal.
///
/// The two capabilities are stored and cleared as one unit; the coordinator
/// invokes at most one of them, exactly once, per signal.
pub struct SignalOutput {
    continuation: Continuation,
    cancellation: Cancellation,
}

impl SignalOutput {
    /// Create a signal's capability pair.
    pub fn new(continuation: Continuation, cancellation: Cancellation) -> Self {
        Self {
            continuation,
            cancellation,
        }
    }

    /// Convenience constructor from plain closures.
    pub fn from_fns(
        continuation: impl FnOnce() + Send + 'static,
        cancellation: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self::new(Box::new(continuation), Box::new(cancellation))
    }

    fn into_continuation(self) -> Continuation {
        self.continuation
    }

    fn into_cancellation(self) -> Cancellation {
        self.cancellation
    }
}

impl fmt::Debug for SignalOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalOutput").finish_non_exhaustive()
    }
}

/// Output branches the coordinator advertises to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputBranch {
    /// The admitted-signal branch.
    Continue,
    /// The superseded-signal branch.
    Terminate,
}

impl OutputBranch {
    /// The branch name as advertised to the host.
    pub fn name(self) -> &'static str {
        match self {
            OutputBranch::Continue => "continue",
            OutputBranch::Terminate => "terminate",
        }
    }
}

/// Downstream capability a declared output branch is wired to.
pub type BranchCapability = Arc<dyn Fn() + Send + Sync + 'static>;

/// The downstream capabilities the host wired to the declared output
/// branches.
#[derive(Clone)]
pub struct ChainWiring {
    continue_to: BranchCapability,
    terminate_to: BranchCapability,
}

impl ChainWiring {
    /// The capability wired to the given branch.
    pub fn capability(&self, branch: OutputBranch) -> BranchCapability {
        match branch {
            OutputBranch::Continue => Arc::clone(&self.continue_to),
            OutputBranch::Terminate => Arc::clone(&self.terminate_to),
        }
    }
}

impl fmt::Debug for ChainWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainWiring").finish_non_exhaustive()
    }
}

/// Error returned when building a [`Debouncer`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// No downstream capability was wired to the `continue` branch
    MissingContinueBranch,
    /// No timer driver was supplied and no default driver is available
    /// (the `async` feature is disabled)
    MissingTimerDriver,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingContinueBranch => {
                write!(f, "the continue branch must be wired to a downstream capability")
            }
            BuildError::MissingTimerDriver => {
                write!(
                    f,
                    "a timer driver is required when the async feature is disabled"
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Per-instance pending entry.
///
/// Invariant: `timer` is `Some` iff `state` is pending, and every armed timer
/// carries the `epoch` current at arming time so stale fires are ignored.
struct Cell {
    state: ChannelState<SignalOutput>,
    timer: Option<Box<dyn TimerHandle>>,
    epoch: u64,
}

struct Core {
    config: DebounceConfig,
    display_name: String,
    driver: Arc<dyn TimerDriver>,
    metrics: Metrics,
    cell: Mutex<Cell>,
}

impl Core {
    fn lock_cell(&self) -> MutexGuard<'_, Cell> {
        self.cell
            .lock()
            .expect("debouncer state mutex poisoned - a thread panicked while holding the lock")
    }

    /// Arm a fresh quiet-window timer, replacing (and cancelling) any
    /// previous one. The epoch bump invalidates in-flight fires of the
    /// replaced timer.
    fn arm(core: &Arc<Core>, cell: &mut Cell) {
        cell.epoch = cell.epoch.wrapping_add(1);
        let epoch = cell.epoch;
        let weak = Arc::downgrade(core);
        let handle = core.driver.schedule(
            core.config.delay(),
            Box::new(move || {
                if let Some(core) = weak.upgrade() {
                    Core::on_timer_fire(&core, epoch);
                }
            }),
        );
        if let Some(previous) = cell.timer.replace(handle) {
            previous.cancel();
        }
    }

    fn handle_signal(core: &Arc<Core>, output: SignalOutput) {
        let action = {
            let mut cell = core.lock_cell();
            let action = cell.state.on_arrival(
                output,
                core.config.immediate(),
                core.config.clear_pending(),
            );
            match &action {
                ArrivalAction::Admit(_) | ArrivalAction::Queue => Core::arm(core, &mut cell),
                ArrivalAction::Supersede {
                    restart_window: true,
                    ..
                } => Core::arm(core, &mut cell),
                ArrivalAction::Supersede {
                    restart_window: false,
                    ..
                } => {}
            }
            action
        };

        // Capabilities run outside the lock, after all bookkeeping: a panic
        // propagates to the host with the pending entry already consistent.
        match action {
            ArrivalAction::Admit(signal) => {
                core.metrics.record_admitted();
                debug!(name = %core.display_name, "admitting leading signal");
                signal.into_continuation()();
            }
            ArrivalAction::Queue => {
                debug!(name = %core.display_name, "queueing trailing signal");
            }
            ArrivalAction::Supersede {
                previous,
                restart_window,
            } => {
                if restart_window {
                    debug!(name = %core.display_name, "restarting quiet window");
                }
                if let Some(previous) = previous {
                    core.metrics.record_superseded();
                    debug!(name = %core.display_name, "cancelling superseded signal");
                    previous.into_cancellation()();
                }
            }
        }
    }

    fn on_timer_fire(core: &Arc<Core>, epoch: u64) {
        let action = {
            let mut cell = core.lock_cell();
            if epoch != cell.epoch {
                // Stale fire: the timer was restarted or torn down after this
                // callback was already on its way.
                return;
            }
            let action = cell.state.on_timer_fire(core.config.immediate());
            match &action {
                FireAction::AdmitQueued { rearm: true, .. } => Core::arm(core, &mut cell),
                FireAction::AdmitQueued { rearm: false, .. } | FireAction::WindowElapsed => {
                    if let Some(handle) = cell.timer.take() {
                        handle.cancel();
                    }
                }
            }
            action
        };

        match action {
            FireAction::AdmitQueued { payload, .. } => {
                core.metrics.record_admitted();
                debug!(name = %core.display_name, "admitting queued signal");
                payload.into_continuation()();
            }
            FireAction::WindowElapsed => {
                core.metrics.record_window_expired();
                debug!(name = %core.display_name, "quiet window elapsed");
            }
        }
    }
}

/// Signal-chain rate limiter: collapses bursts of signals on one channel
/// according to debounce or throttle semantics.
///
/// Each instance owns its pending entry directly, so two instances can never
/// share or collide on pending state. The instance advertises two output
/// branches ([`Debouncer::OUTPUTS`]) for the host to wire downstream.
///
/// # Example
/// ```
/// use signal_debounce::{Debouncer, SignalOutput};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer = Debouncer::new(Duration::from_millis(100), || {
///     println!("signal admitted");
/// })
/// .unwrap();
///
/// // First signal of a burst is admitted immediately (leading mode).
/// debouncer.handle_signal(SignalOutput::from_fns(
///     || println!("proceeding"),
///     || println!("superseded"),
/// ));
/// # }
/// ```
pub struct Debouncer {
    core: Arc<Core>,
    wiring: ChainWiring,
}

impl Debouncer {
    /// The output branches every instance advertises, in declaration order.
    pub const OUTPUTS: [OutputBranch; 2] = [OutputBranch::Continue, OutputBranch::Terminate];

    /// Create a coordinator with default options (`immediate = true`,
    /// `clear_pending = false`) and the default timer driver, wiring
    /// `continue_to` downstream.
    pub fn new(
        delay: Duration,
        continue_to: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, BuildError> {
        Self::builder(delay).wire_continue(continue_to).build()
    }

    /// Start building a coordinator for the given quiet window.
    pub fn builder(delay: Duration) -> DebouncerBuilder {
        DebouncerBuilder::new(delay)
    }

    /// Handle one incoming signal on this channel.
    ///
    /// Never fails; decides exactly one of admit, queue, or
    /// supersede-and-cancel, invoking at most one of the signal's two
    /// capabilities. A capability that panics propagates to the caller after
    /// the pending entry has already been updated.
    pub fn handle_signal(&self, output: SignalOutput) {
        Core::handle_signal(&self.core, output);
    }

    /// Handle a signal whose capabilities are the wired downstream branches.
    ///
    /// For hosts that do not thread per-signal capabilities: admission runs
    /// the `continue` wiring, supersession runs the `terminate` wiring.
    pub fn signal(&self) {
        let continue_to = self.wiring.capability(OutputBranch::Continue);
        let terminate_to = self.wiring.capability(OutputBranch::Terminate);
        self.handle_signal(SignalOutput::from_fns(
            move || continue_to(),
            move || terminate_to(),
        ));
    }

    /// The downstream wiring of the declared output branches.
    pub fn wiring(&self) -> &ChainWiring {
        &self.wiring
    }

    /// Human-readable label combining the delay value. Tooling only.
    pub fn display_name(&self) -> &str {
        &self.core.display_name
    }

    /// This instance's configuration.
    pub fn config(&self) -> &DebounceConfig {
        &self.core.config
    }

    /// Coordination metrics for this instance.
    pub fn metrics(&self) -> &Metrics {
        &self.core.metrics
    }

    /// Whether a burst is in flight (a quiet-window timer is running).
    pub fn is_pending(&self) -> bool {
        self.core.lock_cell().state.is_pending()
    }
}

impl fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("display_name", &self.core.display_name)
            .field("config", &self.core.config)
            .finish_non_exhaustive()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // Cancel any outstanding timer synchronously; the epoch bump turns an
        // in-flight fire into a no-op. A signal still queued at teardown is
        // dropped without invoking either capability.
        if let Ok(mut cell) = self.core.cell.lock() {
            cell.epoch = cell.epoch.wrapping_add(1);
            if let Some(handle) = cell.timer.take() {
                handle.cancel();
            }
            cell.state = ChannelState::Idle;
        }
    }
}

/// Builder for a [`Debouncer`].
pub struct DebouncerBuilder {
    config: DebounceConfig,
    driver: Option<Arc<dyn TimerDriver>>,
    continue_to: Option<BranchCapability>,
    terminate_to: Option<BranchCapability>,
}

impl DebouncerBuilder {
    fn new(delay: Duration) -> Self {
        Self {
            config: DebounceConfig::new(delay),
            driver: None,
            continue_to: None,
            terminate_to: None,
        }
    }

    /// Leading-edge admission (default true). See
    /// [`DebounceConfig::with_immediate`].
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.config = self.config.with_immediate(immediate);
        self
    }

    /// Restart the window on supersession (default false). See
    /// [`DebounceConfig::with_clear_pending`].
    pub fn clear_pending(mut self, clear_pending: bool) -> Self {
        self.config = self.config.with_clear_pending(clear_pending);
        self
    }

    /// Use a specific timer driver instead of the default Tokio driver.
    pub fn timer(mut self, driver: Arc<dyn TimerDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Wire the `continue` output branch. Required.
    pub fn wire_continue(mut self, capability: impl Fn() + Send + Sync + 'static) -> Self {
        self.continue_to = Some(Arc::new(capability));
        self
    }

    /// Wire the `terminate` output branch. Defaults to a no-op.
    pub fn wire_terminate(mut self, capability: impl Fn() + Send + Sync + 'static) -> Self {
        self.terminate_to = Some(Arc::new(capability));
        self
    }

    /// Build the coordinator.
    ///
    /// # Errors
    /// Returns [`BuildError`] if the `continue` branch is unwired, or if no
    /// timer driver is available.
    pub fn build(self) -> Result<Debouncer, BuildError> {
        let continue_to = self.continue_to.ok_or(BuildError::MissingContinueBranch)?;
        let terminate_to = self.terminate_to.unwrap_or_else(|| Arc::new(|| {}));
        let driver = match self.driver {
            Some(driver) => driver,
            None => default_driver()?,
        };

        let display_name = self.config.display_name();
        Ok(Debouncer {
            core: Arc::new(Core {
                config: self.config,
                display_name,
                driver,
                metrics: Metrics::new(),
                cell: Mutex::new(Cell {
                    state: ChannelState::Idle,
                    timer: None,
                    epoch: 0,
                }),
            }),
            wiring: ChainWiring {
                continue_to,
                terminate_to,
            },
        })
    }
}

#[cfg(feature = "async")]
fn default_driver() -> Result<Arc<dyn TimerDriver>, BuildError> {
    Ok(Arc::new(crate::infrastructure::timer::TokioTimer::new()))
}

#[cfg(not(feature = "async"))]
fn default_driver() -> Result<Arc<dyn TimerDriver>, BuildError> {
    Err(BuildError::MissingTimerDriver)
}
