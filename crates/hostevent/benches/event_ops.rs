//! Uncontended fast-path cost of each event operation, per backend.

use std::hint;

use criterion::{criterion_group, criterion_main, Criterion};
use hostevent::{futex_available, BackendKind, Event};

fn event_fast_paths(c: &mut Criterion) {
    let mut kinds = vec![BackendKind::Condvar];
    if futex_available() {
        kinds.push(BackendKind::Futex);
    }

    for kind in kinds {
        let mut group = c.benchmark_group(format!("event_{}", kind));

        group.bench_function("set_already_set", |b| {
            let ev = Event::with_backend(true, kind);
            b.iter(|| hint::black_box(&ev).set());
        });

        group.bench_function("reset_set_no_waiter", |b| {
            let ev = Event::with_backend(false, kind);
            b.iter(|| {
                let ev = hint::black_box(&ev);
                ev.reset();
                ev.set();
            });
        });

        group.bench_function("wait_already_set", |b| {
            let ev = Event::with_backend(true, kind);
            b.iter(|| hint::black_box(&ev).wait());
        });

        group.finish();
    }
}

criterion_group!(benches, event_fast_paths);
criterion_main!(benches);
