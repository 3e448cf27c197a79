//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Timer drivers (Tokio for production, mock for tests)

#[cfg(feature = "async")]
pub mod timer;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides controllable test doubles for testing
/// coordination behavior.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// signal-debounce = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
