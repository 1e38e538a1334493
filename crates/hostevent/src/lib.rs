//! # hostevent - tri-state resettable thread event
//!
//! Signaling primitive for hot paths between OS threads, for example an I/O
//! thread kicking a virtual-CPU thread.
//!
//! ## Features
//!
//! - **No-syscall fast paths**: `set()` only wakes when a waiter announced
//!   itself; `wait()` on a set event is a single load
//! - **Futex backend** on Linux, **condvar backend** everywhere else, picked
//!   once per process from a capability probe
//! - **Resettable**: `reset()` can race freely with `set()` and `wait()`
//!   without losing a waiter
//!
//! ## Quick Start
//!
//! ```ignore
//! use hostevent::Event;
//! use std::sync::Arc;
//!
//! let kick = Arc::new(Event::new(false));
//!
//! let vcpu = {
//!     let kick = Arc::clone(&kick);
//!     std::thread::spawn(move || {
//!         kick.wait();
//!         kick.reset();
//!     })
//! };
//!
//! kick.set();
//! vcpu.join().unwrap();
//! ```
//!
//! ## Configuration
//!
//! - `HEV_EVENT_BACKEND` - `auto` (default), `futex`, `condvar`
//! - `HEV_LOG_LEVEL` - off/error/warn/info/debug/trace
//! - `HEV_FLUSH_EPRINT` - flush stderr after each log line

// Re-export core types
pub use hostevent_core::{BackendKind, ContractViolation, EventError, EventState, WaitStrategy};

// Re-export kprint macros for debug logging
pub use hostevent_core::{kerror, kwarn, kinfo, kdebug, ktrace};
pub use hostevent_core::kprint::{LogLevel, init as init_logging, set_log_level};

// Re-export env utilities
pub use hostevent_core::{env_get, env_get_bool, env_get_opt};

// Re-export runtime types
pub use hostevent_runtime::{
    BackendChoice,
    EventConfig,
    Event,
    EventStats,
    default_backend,
    futex_available,
};
