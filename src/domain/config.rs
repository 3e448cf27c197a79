//! Configuration for a debounce coordinator.

use std::time::Duration;

/// Configuration fixed for the lifetime of a coordinator instance.
///
/// `delay` is the quiet window: the duration that must elapse without a new
/// arrival before a queued signal is admitted (or before the channel returns
/// to idle). A negative delay is unrepresentable (`Duration` is unsigned);
/// zero is valid and means the window closes on the next timer turn.
///
/// # Example
/// ```
/// use signal_debounce::DebounceConfig;
/// use std::time::Duration;
///
/// let config = DebounceConfig::new(Duration::from_millis(100));
/// assert!(config.immediate());
/// assert!(!config.clear_pending());
///
/// let trailing = DebounceConfig::new(Duration::from_millis(100))
///     .with_immediate(false)
///     .with_clear_pending(true);
/// assert!(!trailing.immediate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    delay: Duration,
    immediate: bool,
    clear_pending: bool,
}

impl DebounceConfig {
    /// Create a configuration with the given quiet window and default flags
    /// (`immediate = true`, `clear_pending = false`).
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            immediate: true,
            clear_pending: false,
        }
    }

    /// Leading-edge admission: the first signal of a burst is admitted
    /// immediately and the window collapses the rest. When false, the most
    /// recent signal of the burst is admitted once the window elapses.
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Restart the quiet window whenever a queued signal is superseded,
    /// converting throttle behavior into a debounce.
    pub fn with_clear_pending(mut self, clear_pending: bool) -> Self {
        self.clear_pending = clear_pending;
        self
    }

    /// The quiet window duration.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the first signal of a burst is admitted immediately.
    pub fn immediate(&self) -> bool {
        self.immediate
    }

    /// Whether a supersession restarts the quiet window.
    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }

    /// Human-readable label for tooling and logs. Carries no behavioral
    /// contract.
    pub fn display_name(&self) -> String {
        format!("debounce({:?})", self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebounceConfig::new(Duration::from_millis(100));
        assert_eq!(config.delay(), Duration::from_millis(100));
        assert!(config.immediate());
        assert!(!config.clear_pending());
    }

    #[test]
    fn test_flags() {
        let config = DebounceConfig::new(Duration::ZERO)
            .with_immediate(false)
            .with_clear_pending(true);
        assert!(!config.immediate());
        assert!(config.clear_pending());
        assert_eq!(config.delay(), Duration::ZERO);
    }

    #[test]
    fn test_display_name_includes_delay() {
        let config = DebounceConfig::new(Duration::from_millis(250));
        assert_eq!(config.display_name(), "debounce(250ms)");
    }
}
