//! Demo walking both admission modes of the debounce coordinator.
//!
//! A "keystroke" burst is fired at the coordinator, first in leading mode
//! (first keystroke admitted, burst collapsed), then in trailing mode (the
//! burst settles and only the final keystroke is admitted).
//!
//! Run with `RUST_LOG=signal_debounce=debug` to see the coordination
//! decisions as tracing events.

use signal_debounce::{Debouncer, SignalOutput};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

async fn burst(debouncer: &Debouncer, presses: usize) {
    for i in 1..=presses {
        debouncer.handle_signal(SignalOutput::from_fns(
            move || println!("  keystroke {i} admitted"),
            move || println!("  keystroke {i} superseded"),
        ));
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    // Let the quiet window settle.
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Leading mode (immediate = true) ===");
    println!("First keystroke passes through, the burst collapses:\n");

    let leading = Debouncer::new(Duration::from_millis(80), || {}).unwrap();
    burst(&leading, 5).await;

    let snapshot = leading.metrics().snapshot();
    println!(
        "\n{}: admitted={} superseded={} ({:.0}% collapsed)\n",
        leading.display_name(),
        snapshot.signals_admitted,
        snapshot.signals_superseded,
        snapshot.supersession_rate() * 100.0,
    );

    println!("=== Trailing mode (immediate = false) ===");
    println!("Nothing passes until the burst settles; the last keystroke wins:\n");

    let trailing = Debouncer::builder(Duration::from_millis(80))
        .immediate(false)
        .wire_continue(|| {})
        .build()
        .unwrap();
    burst(&trailing, 5).await;

    let snapshot = trailing.metrics().snapshot();
    println!(
        "\n{}: admitted={} superseded={} ({:.0}% collapsed)",
        trailing.display_name(),
        snapshot.signals_admitted,
        snapshot.signals_superseded,
        snapshot.supersession_rate() * 100.0,
    );
}
