use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use signal_debounce::infrastructure::mocks::MockTimer;
use signal_debounce::{ChannelState, Debouncer, SignalOutput};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark the arrival hot path (burst in progress: supersede + requeue).
fn bench_arrival_hot_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrival");
    group.throughput(Throughput::Elements(1));

    for mode in ["leading", "trailing"] {
        let timer = Arc::new(MockTimer::new());
        let debouncer = Debouncer::builder(Duration::from_secs(3600))
            .immediate(mode == "leading")
            .timer(timer)
            .wire_continue(|| {})
            .build()
            .unwrap();

        group.bench_function(mode, |b| {
            b.iter(|| {
                debouncer.handle_signal(black_box(SignalOutput::from_fns(|| {}, || {})));
            })
        });
    }

    group.finish();
}

/// Benchmark the pure state machine, isolating it from capability boxing.
fn bench_state_machine(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_machine");
    group.throughput(Throughput::Elements(2));

    group.bench_function("burst_cycle", |b| {
        let mut state: ChannelState<u64> = ChannelState::Idle;
        b.iter(|| {
            black_box(state.on_arrival(black_box(1), true, false));
            black_box(state.on_arrival(black_box(2), true, false));
            black_box(state.on_timer_fire(true));
            black_box(state.on_timer_fire(true));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_arrival_hot_path, bench_state_machine);
criterion_main!(benches);
