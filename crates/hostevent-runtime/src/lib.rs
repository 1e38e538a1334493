//! # hostevent-runtime
//!
//! Platform-specific half of the hostevent synchronization event.
//!
//! This crate provides:
//! - Blocking backends (Linux futex, portable mutex + condvar)
//! - A once-per-process capability probe choosing between them
//! - Environment-driven backend configuration
//! - The tri-state [`Event`] built on top

pub mod config;
pub mod parking;
pub mod event;

// Re-exports
pub use config::{BackendChoice, EventConfig};
pub use event::{Event, EventStats};
pub use parking::{default_backend, futex_available, CondvarWait, EventBackend};

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use parking::FutexWait;
