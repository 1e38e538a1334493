//! Blocking backend traits
//!
//! The event state machine is platform-agnostic. Only the way a thread
//! sleeps on the state word, and the way it is woken, differs per platform.

use core::fmt;
use core::str::FromStr;
use core::sync::atomic::AtomicU32;

/// Blocking mechanism under an event
///
/// Implementations only sleep and wake. They never change the state word;
/// every state transition is done by the event itself.
pub trait WaitStrategy: Send + Sync {
    /// Block while `word` holds `expected`.
    ///
    /// Must return promptly if `word != expected` at call time. May return
    /// spuriously at any point; callers re-check the word in a loop.
    fn wait_while(&self, word: &AtomicU32, expected: u32);

    /// Wake every thread currently blocked in `wait_while` on `word`.
    fn wake_all(&self, word: &AtomicU32);

    /// Which backend this is
    fn kind(&self) -> BackendKind;
}

/// Available blocking backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Kernel wait-on-address (Linux futex)
    Futex,

    /// Mutex + condition variable
    Condvar,
}

impl BackendKind {
    pub const fn name(&self) -> &'static str {
        match self {
            BackendKind::Futex => "futex",
            BackendKind::Condvar => "condvar",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "futex" => Ok(BackendKind::Futex),
            "condvar" | "fallback" => Ok(BackendKind::Condvar),
            _ => Err("unknown event backend (expected futex or condvar)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("futex".parse(), Ok(BackendKind::Futex));
        assert_eq!("Condvar".parse(), Ok(BackendKind::Condvar));
        assert_eq!(" fallback ".parse(), Ok(BackendKind::Condvar));
        assert!("spin".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Futex.to_string(), "futex");
        assert_eq!(BackendKind::Condvar.to_string(), "condvar");
    }
}
