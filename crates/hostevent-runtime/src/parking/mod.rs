//! Blocking backends for the event
//!
//! The backend is picked once, at event construction, from a capability
//! probe whose result is cached for the whole process. Both backends
//! implement [`WaitStrategy`], so the event's state machine is identical
//! whichever one is underneath.

use crate::config::EventConfig;
use hostevent_core::{kdebug, kwarn};
use hostevent_core::{BackendKind, WaitStrategy};
use std::sync::atomic::AtomicU32;
use std::sync::OnceLock;

mod fallback;
pub use fallback::CondvarWait;

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        mod futex_linux;
        pub use futex_linux::FutexWait;

        fn probe_futex() -> bool {
            FutexWait::probe()
        }
    } else {
        // No wait-on-address support wired up for this platform yet.
        fn probe_futex() -> bool {
            false
        }
    }
}

static FUTEX_AVAILABLE: OnceLock<bool> = OnceLock::new();
static DEFAULT_BACKEND: OnceLock<BackendKind> = OnceLock::new();

/// Whether the futex backend can be used in this process.
///
/// The kernel is probed on the first call only.
pub fn futex_available() -> bool {
    *FUTEX_AVAILABLE.get_or_init(|| {
        let available = probe_futex();
        kdebug!("futex wait-on-address available: {}", available);
        available
    })
}

/// Backend used by [`Event::new`](crate::Event::new).
///
/// Resolved once from `HEV_EVENT_BACKEND` and the futex probe.
pub fn default_backend() -> BackendKind {
    *DEFAULT_BACKEND.get_or_init(|| {
        let kind = EventConfig::from_env().resolve(futex_available());
        kdebug!("default event backend: {}", kind);
        kind
    })
}

/// Backend owned by a single event
#[derive(Debug)]
pub enum EventBackend {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    Futex(FutexWait),
    Condvar(CondvarWait),
}

impl EventBackend {
    /// Build the requested backend, degrading to condvar if futex is
    /// requested in a process where it is not available.
    pub fn new(kind: BackendKind) -> Self {
        match kind {
            #[cfg(any(target_os = "linux", target_os = "android"))]
            BackendKind::Futex if futex_available() => EventBackend::Futex(FutexWait::new()),
            BackendKind::Futex => {
                kwarn!("futex backend unavailable, using condvar");
                EventBackend::Condvar(CondvarWait::new())
            }
            BackendKind::Condvar => EventBackend::Condvar(CondvarWait::new()),
        }
    }

    /// Condvar backend, usable in `const` context
    pub const fn condvar() -> Self {
        EventBackend::Condvar(CondvarWait::new())
    }
}

impl WaitStrategy for EventBackend {
    #[inline]
    fn wait_while(&self, word: &AtomicU32, expected: u32) {
        match self {
            #[cfg(any(target_os = "linux", target_os = "android"))]
            EventBackend::Futex(futex) => futex.wait_while(word, expected),
            EventBackend::Condvar(cv) => cv.wait_while(word, expected),
        }
    }

    #[inline]
    fn wake_all(&self, word: &AtomicU32) {
        match self {
            #[cfg(any(target_os = "linux", target_os = "android"))]
            EventBackend::Futex(futex) => futex.wake_all(word),
            EventBackend::Condvar(cv) => cv.wake_all(word),
        }
    }

    fn kind(&self) -> BackendKind {
        match self {
            #[cfg(any(target_os = "linux", target_os = "android"))]
            EventBackend::Futex(futex) => futex.kind(),
            EventBackend::Condvar(cv) => cv.kind(),
        }
    }
}

/// Every backend usable in this process, for running tests against each.
#[cfg(test)]
pub(crate) fn available_backends() -> Vec<BackendKind> {
    let mut kinds = vec![BackendKind::Condvar];
    if futex_available() {
        kinds.push(BackendKind::Futex);
    }
    kinds
}
