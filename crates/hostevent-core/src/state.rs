//! Event state word encoding
//!
//! The state lives in a single `u32` so the futex backend can sleep on its
//! address directly.
//!
//! ```text
//! SET  = 0x0000_0000
//! FREE = 0x0000_0001
//! BUSY = 0xFFFF_FFFF   (-1 as i32)
//! ```
//!
//! Legal transitions:
//! - FREE -> SET, on `set()`
//! - BUSY -> SET, on `set()`, followed by a wake-all
//! - SET  -> FREE, on `reset()`
//! - FREE -> BUSY, on `wait()`
//!
//! SET -> BUSY is only ever observed as SET -> FREE -> BUSY.
//!
//! BUSY -> FREE cannot happen. `reset()` is a `fetch_or(EV_FREE)`, and with
//! this encoding OR-ing in `EV_FREE` changes SET into FREE and leaves FREE
//! and BUSY exactly as they were.

use core::fmt;

/// Event is signaled; waiters return immediately.
pub const EV_SET: u32 = 0;

/// Event is reset and nobody is blocked on it.
pub const EV_FREE: u32 = 1;

/// Event is reset and at least one waiter may be blocked on it.
pub const EV_BUSY: u32 = u32::MAX;

// The reset algebra, checked at compile time.
const _: () = assert!(EV_SET | EV_FREE == EV_FREE);
const _: () = assert!(EV_FREE | EV_FREE == EV_FREE);
const _: () = assert!(EV_BUSY | EV_FREE == EV_BUSY);

/// Decoded value of an event's state word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EventState {
    Set = EV_SET,
    Free = EV_FREE,
    Busy = EV_BUSY,
}

impl EventState {
    /// All states, in encoding order.
    pub const ALL: [EventState; 3] = [EventState::Set, EventState::Free, EventState::Busy];

    /// Decode a raw state word. Any other bit pattern is corruption.
    #[inline]
    pub const fn from_raw(raw: u32) -> Option<EventState> {
        match raw {
            EV_SET => Some(EventState::Set),
            EV_FREE => Some(EventState::Free),
            EV_BUSY => Some(EventState::Busy),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// State produced by applying `reset()`'s OR to this state
    #[inline]
    pub const fn after_reset(self) -> EventState {
        match EventState::from_raw(self.as_raw() | EV_FREE) {
            Some(state) => state,
            // Unreachable given the const assertions above.
            None => self,
        }
    }

    /// Whether `self -> to` is one of the four transitions the event performs.
    ///
    /// Staying in the same state is not a transition and returns `false`.
    #[inline]
    pub const fn can_transition_to(self, to: EventState) -> bool {
        matches!(
            (self, to),
            (EventState::Free, EventState::Set)
                | (EventState::Busy, EventState::Set)
                | (EventState::Set, EventState::Free)
                | (EventState::Free, EventState::Busy)
        )
    }
}

impl From<EventState> for u32 {
    fn from(state: EventState) -> u32 {
        state.as_raw()
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventState::Set => write!(f, "SET"),
            EventState::Free => write!(f, "FREE"),
            EventState::Busy => write!(f, "BUSY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_demotes_only_set() {
        assert_eq!(EventState::Set.after_reset(), EventState::Free);
        assert_eq!(EventState::Free.after_reset(), EventState::Free);
        assert_eq!(EventState::Busy.after_reset(), EventState::Busy);
    }

    #[test]
    fn test_reset_never_frees_busy() {
        // Applying reset any number of times from any state must never
        // produce an illegal transition.
        for start in EventState::ALL {
            let mut state = start;
            for _ in 0..4 {
                let next = state.after_reset();
                if next != state {
                    assert!(state.can_transition_to(next), "{} -> {}", state, next);
                }
                assert!(!(state == EventState::Busy && next == EventState::Free));
                state = next;
            }
        }
    }

    #[test]
    fn test_raw_roundtrip_is_closed() {
        for state in EventState::ALL {
            assert_eq!(EventState::from_raw(state.as_raw()), Some(state));
        }
        assert_eq!(EventState::from_raw(2), None);
        assert_eq!(EventState::from_raw(0x8000_0000), None);
    }

    #[test]
    fn test_legal_transitions() {
        use EventState::*;
        let legal = [(Free, Set), (Busy, Set), (Set, Free), (Free, Busy)];
        for from in EventState::ALL {
            for to in EventState::ALL {
                assert_eq!(from.can_transition_to(to), legal.contains(&(from, to)), "{} -> {}", from, to);
            }
        }
        assert!(!Busy.can_transition_to(Free));
        assert!(!Set.can_transition_to(Busy));
    }

    #[test]
    fn test_busy_is_minus_one() {
        assert_eq!(EV_BUSY as i32, -1);
        assert_eq!(format!("{}", EventState::Busy), "BUSY");
    }
}
