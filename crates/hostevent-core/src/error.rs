//! Fatal error types for the event primitive
//!
//! None of these are recoverable. They are carried to [`fatal`], which logs
//! and panics; release builds abort on panic.

use core::fmt;

/// Misuse of the event lifecycle by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// An operation ran on an event that was never initialized or was
    /// already destroyed
    NotInitialized {
        /// Operation that was attempted
        op: &'static str,
    },

    /// `init()` ran on an event that is already live
    AlreadyInitialized,

    /// The state word held a bit pattern outside SET/FREE/BUSY
    CorruptState(u32),
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::NotInitialized { op } => {
                write!(f, "{} on an event that is not initialized", op)
            }
            ContractViolation::AlreadyInitialized => write!(f, "event initialized twice"),
            ContractViolation::CorruptState(raw) => write!(f, "corrupt event state {:#010x}", raw),
        }
    }
}

/// Any fatal condition hit by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// Caller broke the lifecycle contract
    Contract(ContractViolation),

    /// The kernel rejected a wait/wake call with an unexpected errno
    Platform {
        op: &'static str,
        errno: i32,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Contract(v) => write!(f, "event contract violation: {}", v),
            EventError::Platform { op, errno } => write!(f, "{} failed: errno {}", op, errno),
        }
    }
}

impl std::error::Error for EventError {}

impl From<ContractViolation> for EventError {
    fn from(v: ContractViolation) -> Self {
        EventError::Contract(v)
    }
}

/// Report a fatal event error and terminate the caller.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal(err: impl Into<EventError>) -> ! {
    let err = err.into();
    crate::kerror!("{}", err);
    panic!("{}", err);
}
