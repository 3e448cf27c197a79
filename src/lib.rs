//! # signal-debounce
//!
//! Burst-collapsing debounce and throttle coordination for signal chains.
//!
//! This crate provides a [`Debouncer`] that interposes on a named channel of
//! discrete signal invocations and decides, per signal, whether and when to
//! let it continue downstream. Bursts are collapsed according to debounce or
//! throttle semantics, and a queued signal that gets superseded by a newer
//! arrival is cooperatively cancelled through its cancellation capability.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signal_debounce::{Debouncer, SignalOutput};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // Leading-edge coordinator: the first signal of a burst is admitted
//! // immediately, the rest of the burst is collapsed.
//! let debouncer = Debouncer::new(Duration::from_millis(100), || {
//!     println!("downstream chain continues");
//! })
//! .unwrap();
//!
//! // Or customize admission semantics:
//! let debouncer = Debouncer::builder(Duration::from_millis(100))
//!     .immediate(false)      // admit the *last* signal of a burst instead
//!     .clear_pending(true)   // restart the window on supersession
//!     .wire_continue(|| println!("continue"))
//!     .wire_terminate(|| println!("terminate"))
//!     .build()
//!     .unwrap();
//!
//! // One call per incoming signal, carrying that signal's capabilities.
//! debouncer.handle_signal(SignalOutput::from_fns(
//!     || println!("this signal proceeds"),
//!     || println!("this signal was superseded"),
//! ));
//! # }
//! ```
//!
//! ## Semantics
//!
//! Every coordinator owns one channel's pending state and exactly one quiet
//! window timer while a burst is in flight:
//!
//! - **Leading mode** (`immediate = true`, default): the first signal of a
//!   burst is admitted synchronously and opens the quiet window. Signals
//!   arriving inside the window are queued one at a time, each newer arrival
//!   cancelling the queued one. When the window elapses, a queued signal is
//!   admitted and the window re-arms; an empty window returns the channel to
//!   idle.
//! - **Trailing mode** (`immediate = false`): the first signal is queued, and
//!   each newer arrival replaces (and cancels) it. The signal left queued
//!   when the window elapses is the one admitted.
//! - **`clear_pending`**: when a queued signal is superseded, the quiet
//!   window restarts from the arrival moment, converting throttle behavior
//!   into a debounce.
//!
//! Each signal's continuation/cancellation pair is consumed as one unit: the
//! coordinator invokes at most one of the two, exactly once. Arrival order
//! alone determines which signal is admitted.
//!
//! ## Timer Drivers
//!
//! The coordinator talks to the host timer facility through the
//! [`TimerDriver`] port. With the `async` feature (on by default) the
//! default driver is [`TokioTimer`]; tests use the virtual-time `MockTimer`
//! from `infrastructure::mocks` (enabled with the `test-helpers` feature).
//!
//! ## Observability
//!
//! Coordination decisions are logged through `tracing` at debug level, and
//! per-instance counters are available via [`Debouncer::metrics`]:
//!
//! ```rust,no_run
//! # use signal_debounce::Debouncer;
//! # use std::time::Duration;
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! # let debouncer = Debouncer::new(Duration::from_millis(100), || {}).unwrap();
//! let snapshot = debouncer.metrics().snapshot();
//! println!(
//!     "admitted={} superseded={} ({:.0}% collapsed)",
//!     snapshot.signals_admitted,
//!     snapshot.signals_superseded,
//!     snapshot.supersession_rate() * 100.0,
//! );
//! # }
//! ```

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    config::DebounceConfig,
    state::{ArrivalAction, ChannelState, FireAction},
};

pub use application::{
    coordinator::{
        BranchCapability, BuildError, Cancellation, ChainWiring, Continuation, Debouncer,
        DebouncerBuilder, OutputBranch, SignalOutput,
    },
    metrics::{Metrics, MetricsSnapshot},
    ports::{TimerCallback, TimerDriver, TimerHandle},
};

#[cfg(feature = "async")]
pub use infrastructure::timer::TokioTimer;
