//! Tests for the host-facing chain surface: declared outputs, downstream
//! wiring, diagnostics, and builder validation.

use signal_debounce::infrastructure::mocks::MockTimer;
use signal_debounce::{BuildError, Debouncer, OutputBranch};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_declares_continue_and_terminate_outputs() {
    let names: Vec<_> = Debouncer::OUTPUTS.iter().map(|branch| branch.name()).collect();
    assert_eq!(names, ["continue", "terminate"]);
}

#[test]
fn test_display_name_combines_the_delay() {
    let timer = Arc::new(MockTimer::new());
    let debouncer = Debouncer::builder(ms(250))
        .timer(timer)
        .wire_continue(|| {})
        .build()
        .unwrap();
    assert_eq!(debouncer.display_name(), "debounce(250ms)");
}

#[test]
fn test_signals_route_through_the_wired_branches() {
    let timer = Arc::new(MockTimer::new());
    let continued = Arc::new(AtomicUsize::new(0));
    let terminated = Arc::new(AtomicUsize::new(0));

    let continue_probe = Arc::clone(&continued);
    let terminate_probe = Arc::clone(&terminated);
    let debouncer = Debouncer::builder(ms(100))
        .timer(timer.clone())
        .wire_continue(move || {
            continue_probe.fetch_add(1, Ordering::SeqCst);
        })
        .wire_terminate(move || {
            terminate_probe.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    // Leading admission runs the continue wiring.
    debouncer.signal();
    assert_eq!(continued.load(Ordering::SeqCst), 1);

    // Second queues, third supersedes it through the terminate wiring.
    debouncer.signal();
    debouncer.signal();
    assert_eq!(terminated.load(Ordering::SeqCst), 1);

    // Window close admits the queued signal through the continue wiring.
    timer.advance(ms(100));
    assert_eq!(continued.load(Ordering::SeqCst), 2);
}

#[test]
fn test_wiring_exposes_branch_capabilities() {
    let timer = Arc::new(MockTimer::new());
    let continued = Arc::new(AtomicUsize::new(0));

    let probe = Arc::clone(&continued);
    let debouncer = Debouncer::builder(ms(100))
        .timer(timer)
        .wire_continue(move || {
            probe.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    // The host can pull a branch's capability out for its own chain
    // assembly.
    let capability = debouncer.wiring().capability(OutputBranch::Continue);
    capability();
    assert_eq!(continued.load(Ordering::SeqCst), 1);

    // The default terminate wiring is a no-op.
    debouncer.wiring().capability(OutputBranch::Terminate)();
}

#[test]
fn test_build_fails_without_a_continue_branch() {
    let timer = Arc::new(MockTimer::new());
    let error = Debouncer::builder(ms(100)).timer(timer).build().unwrap_err();
    assert_eq!(error, BuildError::MissingContinueBranch);
    assert!(error.to_string().contains("continue branch"));
}

#[test]
fn test_config_is_exposed_for_diagnostics() {
    let timer = Arc::new(MockTimer::new());
    let debouncer = Debouncer::builder(ms(100))
        .immediate(false)
        .clear_pending(true)
        .timer(timer)
        .wire_continue(|| {})
        .build()
        .unwrap();

    let config = debouncer.config();
    assert_eq!(config.delay(), ms(100));
    assert!(!config.immediate());
    assert!(config.clear_pending());
}
