//! Per-channel state machine for burst collapsing.
//!
//! The machine is pure: it owns no timer and invokes no capabilities. Each
//! transition returns an action describing what the caller must do (admit a
//! signal, cancel the superseded one, arm or restart the timer), which keeps
//! the state machine auditable and testable independent of timer internals.

use std::mem;

/// State of a single channel.
///
/// A pending state exists if and only if a timer is currently running for the
/// channel; the coordinator maintains that pairing. `T` is the queued payload
/// (in practice the superseded signal's capabilities), kept generic so the
/// machine stays free of capability types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState<T> {
    /// No burst in flight. Initial and terminal state of every burst.
    Idle,
    /// Quiet window open, nothing queued. Only reachable in leading
    /// (`immediate`) mode, right after an admission.
    PendingEmpty,
    /// Quiet window open with the most recent suppressed signal queued.
    PendingQueued(T),
}

/// Decision for an arriving signal. Exactly one is produced per arrival.
#[derive(Debug, PartialEq, Eq)]
pub enum ArrivalAction<T> {
    /// Idle channel, leading mode: admit this signal now and open the window.
    Admit(T),
    /// Idle channel, trailing mode: the signal was queued; open the window.
    Queue,
    /// Burst in progress: the newest signal replaced the queued one.
    /// `previous` is the superseded signal to cancel, if one was queued.
    /// `restart_window` is set when the supersession must restart the timer.
    Supersede {
        previous: Option<T>,
        restart_window: bool,
    },
}

/// Decision when the channel's timer elapses.
#[derive(Debug, PartialEq, Eq)]
pub enum FireAction<T> {
    /// A queued signal is admitted. `rearm` keeps the channel pending with a
    /// fresh window (leading mode); otherwise it returns to idle.
    AdmitQueued { payload: T, rearm: bool },
    /// The window elapsed with nothing queued; the channel returns to idle.
    WindowElapsed,
}

impl<T> ChannelState<T> {
    /// Apply an arriving signal.
    ///
    /// The window restart is deliberately nested under "a queued signal was
    /// superseded": an arrival that merely fills an empty pending entry never
    /// restarts the timer, even with `clear_pending` set.
    pub fn on_arrival(&mut self, payload: T, immediate: bool, clear_pending: bool) -> ArrivalAction<T> {
        match mem::replace(self, ChannelState::Idle) {
            ChannelState::Idle => {
                if immediate {
                    // A leading admit is never stored.
                    *self = ChannelState::PendingEmpty;
                    ArrivalAction::Admit(payload)
                } else {
                    *self = ChannelState::PendingQueued(payload);
                    ArrivalAction::Queue
                }
            }
            ChannelState::PendingEmpty => {
                *self = ChannelState::PendingQueued(payload);
                ArrivalAction::Supersede {
                    previous: None,
                    restart_window: false,
                }
            }
            ChannelState::PendingQueued(previous) => {
                *self = ChannelState::PendingQueued(payload);
                ArrivalAction::Supersede {
                    previous: Some(previous),
                    restart_window: clear_pending,
                }
            }
        }
    }

    /// Apply a timer expiry. A fire on an idle channel is a stale-timer
    /// no-op and reports `WindowElapsed`.
    pub fn on_timer_fire(&mut self, immediate: bool) -> FireAction<T> {
        match mem::replace(self, ChannelState::Idle) {
            ChannelState::Idle | ChannelState::PendingEmpty => FireAction::WindowElapsed,
            ChannelState::PendingQueued(payload) => {
                if immediate {
                    *self = ChannelState::PendingEmpty;
                    FireAction::AdmitQueued {
                        payload,
                        rearm: true,
                    }
                } else {
                    FireAction::AdmitQueued {
                        payload,
                        rearm: false,
                    }
                }
            }
        }
    }

    /// Whether a burst is in flight (a timer should be running).
    pub fn is_pending(&self) -> bool {
        !matches!(self, ChannelState::Idle)
    }

    /// State name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ChannelState::Idle => "idle",
            ChannelState::PendingEmpty => "pending-empty",
            ChannelState::PendingQueued(_) => "pending-queued",
        }
    }
}
