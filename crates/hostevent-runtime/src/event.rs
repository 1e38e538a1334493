//! Tri-state resettable event
//!
//! A boolean latch for hot signaling paths. `set()` and `reset()` never
//! block, `wait()` blocks until the event is set, and a wake syscall is
//! only issued when a waiter announced itself by moving the state to BUSY.
//!
//! ```text
//!            set()                    set() + wake_all
//!   FREE ------------> SET <------------------------- BUSY
//!     ^  \             |                               ^
//!     |   `------------|-------------------------------'
//!     |      wait()    | reset()              (FREE -> BUSY)
//!     `----------------'
//! ```
//!
//! # Memory ordering
//!
//! `set()` brackets its exchange with two full fences. The first pairs with
//! the acquire load (and the failing CAS) in `wait()` and with the fence in
//! `reset()`. The second pairs with the barrier the blocking backend
//! performs before it sleeps, so a waiter either sees SET or is woken.
//!
//! # Example
//!
//! ```ignore
//! use hostevent_runtime::Event;
//! use std::sync::Arc;
//!
//! let ev = Arc::new(Event::new(false));
//! let ev2 = Arc::clone(&ev);
//! let vcpu = std::thread::spawn(move || ev2.wait());
//! ev.set();
//! vcpu.join().unwrap();
//! ```

use crate::parking::{default_backend, EventBackend};
use hostevent_core::{fatal, BackendKind, ContractViolation, EventState, WaitStrategy};
use hostevent_core::{EV_BUSY, EV_FREE, EV_SET};
use std::fmt;
use std::sync::atomic::{fence, AtomicU32, AtomicU64, Ordering};

/// Snapshot of an event's slow-path counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    /// Wake-all calls issued by `set()`
    pub wakes: u64,

    /// Times `wait()` entered the blocking backend
    pub blocks: u64,
}

/// Tri-state thread synchronization event
pub struct Event {
    /// SET, FREE or BUSY
    value: AtomicU32,

    initialized: bool,

    backend: EventBackend,

    wakes: AtomicU64,
    blocks: AtomicU64,
}

impl Event {
    /// An event that must be [`init`](Self::init)ialized before use.
    pub const fn uninit() -> Self {
        Self {
            value: AtomicU32::new(EV_FREE),
            initialized: false,
            backend: EventBackend::condvar(),
            wakes: AtomicU64::new(0),
            blocks: AtomicU64::new(0),
        }
    }

    /// Create a live event on the process default backend.
    pub fn new(initial_set: bool) -> Self {
        Self::with_backend(initial_set, default_backend())
    }

    /// Create a live event on a specific backend.
    ///
    /// Requesting [`BackendKind::Futex`] where it is unavailable yields
    /// a condvar event.
    pub fn with_backend(initial_set: bool, kind: BackendKind) -> Self {
        let mut ev = Self::uninit();
        ev.init_with(initial_set, kind);
        ev
    }

    /// Initialize caller-managed storage.
    ///
    /// Fatal if the event is already initialized.
    pub fn init(&mut self, initial_set: bool) {
        self.init_with(initial_set, default_backend());
    }

    fn init_with(&mut self, initial_set: bool, kind: BackendKind) {
        if self.initialized {
            fatal(ContractViolation::AlreadyInitialized);
        }
        self.backend = EventBackend::new(kind);
        *self.value.get_mut() = if initial_set { EV_SET } else { EV_FREE };
        *self.wakes.get_mut() = 0;
        *self.blocks.get_mut() = 0;
        self.initialized = true;
    }

    /// Tear down the event. It may be initialized again afterwards.
    ///
    /// Exclusive access guarantees no thread is inside `wait()`.
    /// Fatal if the event is not initialized.
    pub fn destroy(&mut self) {
        self.check_initialized("destroy");
        self.initialized = false;
        self.backend = EventBackend::condvar();
    }

    #[inline]
    #[track_caller]
    fn check_initialized(&self, op: &'static str) {
        if !self.initialized {
            fatal(ContractViolation::NotInitialized { op });
        }
    }

    /// Signal the event, waking every blocked waiter.
    ///
    /// Setting an already-set event is a no-op and issues no wake.
    pub fn set(&self) {
        self.check_initialized("set");

        // set() is a release, but it also loads the state, so a plain
        // release store is not enough here.
        fence(Ordering::SeqCst);
        if self.value.load(Ordering::Acquire) != EV_SET {
            let old = self.value.swap(EV_SET, Ordering::Release);

            // Pairs with the barrier inside the backend's wait.
            fence(Ordering::SeqCst);
            if old == EV_BUSY {
                self.wakes.fetch_add(1, Ordering::Relaxed);
                self.backend.wake_all(&self.value);
            }
        }
    }

    /// Demote SET to FREE. No-op if the event is already FREE or BUSY.
    pub fn reset(&self) {
        self.check_initialized("reset");

        // OR-ing in FREE leaves a concurrent FREE or BUSY untouched, so a
        // waiter that already announced itself is never erased.
        self.value.fetch_or(EV_FREE, Ordering::Relaxed);

        // Order the reset before the caller's next condition check. Pairs
        // with the first fence in set().
        fence(Ordering::SeqCst);
    }

    /// Block until the event is set.
    ///
    /// Returns without a syscall if the event is already set.
    pub fn wait(&self) {
        self.check_initialized("wait");

        loop {
            // Synchronizes with the first fence in set() even when the slow
            // path is never taken.
            let value = self.value.load(Ordering::Acquire);
            if value == EV_SET {
                return;
            }

            if value == EV_FREE {
                // Announce a waiter. No retry: BUSY -> FREE cannot happen,
                // so after this the state is either BUSY or SET. Success
                // needs no ordering; failure observing SET must acquire like
                // the load above.
                match self.value.compare_exchange(EV_FREE, EV_BUSY, Ordering::Relaxed, Ordering::Acquire) {
                    Ok(_) => {}
                    Err(EV_SET) => return,
                    Err(_) => {}
                }
            } else if value != EV_BUSY {
                fatal(ContractViolation::CorruptState(value));
            }

            // Final check for a concurrent set() happens inside the backend,
            // which only sleeps while the word still reads BUSY.
            self.blocks.fetch_add(1, Ordering::Relaxed);
            self.backend.wait_while(&self.value, EV_BUSY);
        }
    }

    /// Backend this event blocks on. Fatal if not initialized.
    pub fn backend(&self) -> BackendKind {
        self.check_initialized("backend");
        self.backend.kind()
    }

    /// Slow-path counters since initialization
    pub fn stats(&self) -> EventStats {
        EventStats {
            wakes: self.wakes.load(Ordering::Relaxed),
            blocks: self.blocks.load(Ordering::Relaxed),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn state(&self) -> Option<EventState> {
        EventState::from_raw(self.value.load(Ordering::Acquire))
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("state", &self.state())
            .field("initialized", &self.initialized)
            .field("backend", &self.backend.kind())
            .field("stats", &self.stats())
            .finish()
    }
}
