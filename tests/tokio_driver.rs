//! End-to-end tests over the real Tokio timer driver.
//!
//! `start_paused` keeps Tokio's clock virtual: `sleep` jumps straight to the
//! next deadline, so these timings are deterministic.

#![cfg(feature = "async")]

use signal_debounce::{Debouncer, SignalOutput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn counted(counter: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static {
    let counter = Arc::clone(counter);
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(start_paused = true)]
async fn test_leading_burst_over_tokio_timers() {
    let debouncer = Debouncer::builder(ms(100)).wire_continue(|| {}).build().unwrap();

    let admitted = Arc::new(AtomicUsize::new(0));
    let cancelled = Arc::new(AtomicUsize::new(0));
    let output = || SignalOutput::from_fns(counted(&admitted), counted(&cancelled));

    debouncer.handle_signal(output());
    assert_eq!(admitted.load(Ordering::SeqCst), 1);

    tokio::time::sleep(ms(30)).await;
    debouncer.handle_signal(output());

    tokio::time::sleep(ms(30)).await;
    debouncer.handle_signal(output());
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);

    // t=105: the window armed at t=0 has fired and admitted the queued
    // signal.
    tokio::time::sleep(ms(45)).await;
    assert_eq!(admitted.load(Ordering::SeqCst), 2);
    assert!(debouncer.is_pending());

    // t=210: the re-armed window has closed empty.
    tokio::time::sleep(ms(105)).await;
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_trailing_mode_over_tokio_timers() {
    let debouncer = Debouncer::builder(ms(100))
        .immediate(false)
        .wire_continue(|| {})
        .build()
        .unwrap();

    let admitted = Arc::new(AtomicUsize::new(0));
    let cancelled = Arc::new(AtomicUsize::new(0));
    let output = || SignalOutput::from_fns(counted(&admitted), counted(&cancelled));

    debouncer.handle_signal(output());
    tokio::time::sleep(ms(40)).await;
    debouncer.handle_signal(output());
    tokio::time::sleep(ms(40)).await;
    debouncer.handle_signal(output());

    assert_eq!(admitted.load(Ordering::SeqCst), 0);
    assert_eq!(cancelled.load(Ordering::SeqCst), 2);

    // t=105: only the most recent signal was admitted.
    tokio::time::sleep(ms(25)).await;
    assert_eq!(admitted.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_clear_pending_restart_aborts_the_old_timer() {
    let debouncer = Debouncer::builder(ms(100))
        .immediate(false)
        .clear_pending(true)
        .wire_continue(|| {})
        .build()
        .unwrap();

    let admitted = Arc::new(AtomicUsize::new(0));
    let output = || SignalOutput::from_fns(counted(&admitted), || {});

    debouncer.handle_signal(output());
    tokio::time::sleep(ms(50)).await;
    debouncer.handle_signal(output());

    // t=110: the aborted original timer (deadline t=100) stayed silent.
    tokio::time::sleep(ms(60)).await;
    assert_eq!(admitted.load(Ordering::SeqCst), 0);

    // t=155: the restarted window (deadline t=150) has admitted the signal.
    tokio::time::sleep(ms(45)).await;
    assert_eq!(admitted.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_coordinator_aborts_its_timer() {
    let admitted = Arc::new(AtomicUsize::new(0));
    {
        let debouncer = Debouncer::builder(ms(100))
            .immediate(false)
            .wire_continue(|| {})
            .build()
            .unwrap();
        debouncer.handle_signal(SignalOutput::from_fns(counted(&admitted), || {}));
    }

    tokio::time::sleep(ms(300)).await;
    assert_eq!(admitted.load(Ordering::SeqCst), 0);
}
