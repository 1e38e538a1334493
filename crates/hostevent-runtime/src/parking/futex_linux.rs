//! Linux futex backend
//!
//! Sleeps directly on the event's state word. No extra state: the kernel
//! keys the wait queue on the word's address.
//!
//! - `wait_while(word, BUSY)` -> `FUTEX_WAIT`, returns at once if the word
//!   no longer holds BUSY
//! - `wake_all(word)` -> `FUTEX_WAKE` with `i32::MAX`
//!
//! Both calls act as full barriers inside the kernel; the event relies on
//! that for the final SET check before sleeping.

use hostevent_core::kdebug;
use hostevent_core::{fatal, BackendKind, EventError, WaitStrategy};
use nix::errno::Errno;
use std::sync::atomic::AtomicU32;

/// Futex-based blocking
#[derive(Debug, Default, Clone, Copy)]
pub struct FutexWait;

impl FutexWait {
    pub const fn new() -> Self {
        FutexWait
    }

    /// Check that the running kernel accepts futex calls.
    ///
    /// Issues a `FUTEX_WAKE` on a private word nobody waits on. Seccomp
    /// filters and some emulators answer `ENOSYS` here.
    pub fn probe() -> bool {
        let word = AtomicU32::new(0);
        match futex(&word, libc::FUTEX_WAKE, 0) {
            Ok(_) => true,
            Err(errno) => {
                kdebug!("futex probe failed: {}", errno);
                false
            }
        }
    }
}

/// Raw `futex(2)` with no timeout
fn futex(word: &AtomicU32, op: libc::c_int, val: u32) -> Result<libc::c_long, Errno> {
    // Safety: `word` is a live, aligned u32 for the duration of the call and
    // the op does not use the timeout or second-address arguments.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_futex,
            word.as_ptr(),
            op | libc::FUTEX_PRIVATE_FLAG,
            val,
            std::ptr::null::<libc::timespec>(),
            std::ptr::null::<u32>(),
            0u32,
        )
    };
    if ret < 0 {
        Err(Errno::last())
    } else {
        Ok(ret)
    }
}

impl WaitStrategy for FutexWait {
    fn wait_while(&self, word: &AtomicU32, expected: u32) {
        match futex(word, libc::FUTEX_WAIT, expected) {
            Ok(_) => {}
            // EAGAIN: the word already moved on. EINTR: a signal. Either way
            // the caller re-checks the word.
            Err(Errno::EAGAIN) | Err(Errno::EINTR) => {}
            Err(errno) => fatal(EventError::Platform { op: "FUTEX_WAIT", errno: errno as i32 }),
        }
    }

    fn wake_all(&self, word: &AtomicU32) {
        if let Err(errno) = futex(word, libc::FUTEX_WAKE, i32::MAX as u32) {
            fatal(EventError::Platform { op: "FUTEX_WAKE", errno: errno as i32 });
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Futex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostevent_core::{EV_BUSY, EV_SET};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_probe_on_linux() {
        assert!(FutexWait::probe());
    }

    #[test]
    fn test_wait_returns_when_word_differs() {
        let word = AtomicU32::new(EV_SET);
        // Must not sleep: the kernel sees SET != BUSY and reports EAGAIN.
        FutexWait.wait_while(&word, EV_BUSY);
    }

    #[test]
    fn test_wake_all_with_no_waiters() {
        let word = AtomicU32::new(EV_SET);
        FutexWait.wake_all(&word);
    }

    #[test]
    fn test_wake_releases_sleeper() {
        let word = Arc::new(AtomicU32::new(EV_BUSY));
        let word2 = Arc::clone(&word);

        let handle = thread::spawn(move || {
            while word2.load(Ordering::Acquire) == EV_BUSY {
                FutexWait.wait_while(&word2, EV_BUSY);
            }
        });

        thread::sleep(Duration::from_millis(20));
        word.store(EV_SET, Ordering::Release);
        FutexWait.wake_all(&word);

        handle.join().unwrap();
    }
}
