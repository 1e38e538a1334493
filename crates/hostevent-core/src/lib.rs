//! # hostevent-core
//!
//! Platform-agnostic pieces of the hostevent synchronization event.
//!
//! This crate contains no OS-specific code. The blocking backends and the
//! `Event` itself are in `hostevent-runtime`.
//!
//! ## Modules
//!
//! - `state` - SET/FREE/BUSY encoding of the event's state word
//! - `traits` - Blocking backend trait and backend kinds
//! - `error` - Fatal error types and the fatal-report path
//! - `kprint` - Kernel-style leveled logging macros
//! - `env` - Environment variable utilities

pub mod state;
pub mod traits;
pub mod error;
pub mod kprint;
pub mod env;

// Re-exports for convenience
pub use state::{EventState, EV_BUSY, EV_FREE, EV_SET};
pub use traits::{BackendKind, WaitStrategy};
pub use error::{fatal, ContractViolation, EventError};
pub use env::{env_get, env_get_bool, env_get_opt};

