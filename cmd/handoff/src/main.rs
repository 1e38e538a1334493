//! Handoff demo - I/O thread kicking a vCPU thread
//!
//! The I/O thread posts a request and sets `kick`; the vCPU thread handles
//! it and sets `done`. Prints round-trip latency and how often each side
//! actually had to sleep.
//!
//! Usage: handoff [rounds]
//! Backend: HEV_EVENT_BACKEND=auto|futex|condvar

use hostevent::{default_backend, kinfo, Event};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() {
    println!("=== hostevent Handoff ===\n");

    let rounds: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    let backend = default_backend();
    kinfo!("using {} backend", backend);

    let kick = Arc::new(Event::with_backend(false, backend));
    let done = Arc::new(Event::with_backend(false, backend));
    let request = Arc::new(AtomicU64::new(0));
    let handled = Arc::new(AtomicU64::new(0));

    let vcpu = {
        let kick = Arc::clone(&kick);
        let done = Arc::clone(&done);
        let request = Arc::clone(&request);
        let handled = Arc::clone(&handled);
        thread::Builder::new()
            .name("vcpu".into())
            .spawn(move || {
                for _ in 0..rounds {
                    kick.wait();
                    kick.reset();
                    let r = request.load(Ordering::Acquire);
                    handled.store(r, Ordering::Release);
                    done.set();
                }
            })
    };
    let vcpu = match vcpu {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("failed to spawn vcpu thread: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    for i in 1..=rounds {
        request.store(i, Ordering::Release);
        kick.set();
        done.wait();
        done.reset();
        assert_eq!(handled.load(Ordering::Acquire), i);
    }
    let elapsed = start.elapsed();

    if vcpu.join().is_err() {
        eprintln!("vcpu thread panicked");
        std::process::exit(1);
    }

    let kick_stats = kick.stats();
    let done_stats = done.stats();

    println!("=== Results ===");
    println!("Backend:          {}", backend);
    println!("Rounds:           {}", rounds);
    println!("Total time:       {:?}", elapsed);
    println!("Round trip:       {:.0} ns",
        elapsed.as_nanos() as f64 / rounds.max(1) as f64);
    println!("vCPU sleeps:      {} ({} wakes)", kick_stats.blocks, kick_stats.wakes);
    println!("I/O sleeps:       {} ({} wakes)", done_stats.blocks, done_stats.wakes);
}
