//! Stress test - randomized set/reset/wait storm
//!
//! Each iteration starts a batch of waiters and resetters on one event with
//! random jitter, then sets it once all resetters are done. Every waiter
//! must return; a watchdog fails the run if one does not.
//!
//! Usage: stress [threads] [iterations]

use hostevent::{default_backend, kerror, kinfo, Event};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

const WATCHDOG: Duration = Duration::from_secs(10);

fn main() {
    println!("=== hostevent Stress Test ===\n");

    let mut args = std::env::args().skip(1);
    let threads: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(8).max(2);
    let iterations: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(1_000);

    let backend = default_backend();
    kinfo!("{} threads x {} iterations on {} backend", threads, iterations, backend);

    let woken = Arc::new(AtomicU64::new(0));
    let mut wakes = 0u64;
    let mut blocks = 0u64;
    let mut rng = rand::rng();
    let start = Instant::now();

    for iter in 0..iterations {
        let ev = Arc::new(Event::with_backend(rng.random_bool(0.25), backend));
        let waiters = rng.random_range(1..threads);
        let resetters = threads - waiters;
        let barrier = Arc::new(Barrier::new(resetters + 1));
        let (tx, rx) = mpsc::channel();

        for _ in 0..waiters {
            let ev = Arc::clone(&ev);
            let tx = tx.clone();
            let woken = Arc::clone(&woken);
            let jitter = rng.random_range(0..100u32);
            thread::spawn(move || {
                for _ in 0..jitter {
                    thread::yield_now();
                }
                ev.wait();
                woken.fetch_add(1, Ordering::Relaxed);
                let _ = tx.send(());
            });
        }

        let resetter_handles: Vec<_> = (0..resetters)
            .map(|_| {
                let ev = Arc::clone(&ev);
                let barrier = Arc::clone(&barrier);
                let count = rng.random_range(0..200u32);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..count {
                        ev.reset();
                    }
                })
            })
            .collect();

        barrier.wait();
        for h in resetter_handles {
            let _ = h.join();
        }
        ev.set();

        for _ in 0..waiters {
            if rx.recv_timeout(WATCHDOG).is_err() {
                kerror!("iteration {}: waiter did not return within {:?}", iter, WATCHDOG);
                kerror!("{:?}", ev);
                std::process::exit(1);
            }
        }

        let stats = ev.stats();
        wakes += stats.wakes;
        blocks += stats.blocks;

        if (iter + 1) % 100 == 0 {
            print!("\rIterations: {}/{}", iter + 1, iterations);
        }
    }

    println!("\n\n=== Results ===");
    println!("Backend:          {}", backend);
    println!("Iterations:       {}", iterations);
    println!("Waiters returned: {}", woken.load(Ordering::Relaxed));
    println!("Blocking waits:   {}", blocks);
    println!("Wake-alls:        {}", wakes);
    println!("Total time:       {:?}", start.elapsed());
    println!("\n✓ No missed wakeups");
}
