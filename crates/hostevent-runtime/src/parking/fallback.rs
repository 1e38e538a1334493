//! Fallback blocking using std::sync::Condvar
//!
//! Used where the kernel has no wait-on-address facility.
//! Every wake takes the lock, so it is slower than futex but portable.

use hostevent_core::{BackendKind, WaitStrategy};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Mutex + condvar pair owned by one event
#[derive(Debug, Default)]
pub struct CondvarWait {
    /// Serializes the waiter's final check against the waker's broadcast
    lock: Mutex<()>,

    cond: Condvar,
}

impl CondvarWait {
    pub const fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            cond: Condvar::new(),
        }
    }

    // The lock guards no data, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WaitStrategy for CondvarWait {
    fn wait_while(&self, word: &AtomicU32, expected: u32) {
        let mut guard = self.lock();
        // A waker changes the word before taking the lock, so seeing
        // `expected` here means its broadcast is still to come.
        while word.load(Ordering::Acquire) == expected {
            guard = self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn wake_all(&self, _word: &AtomicU32) {
        let _guard = self.lock();
        self.cond.notify_all();
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Condvar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostevent_core::{EV_BUSY, EV_FREE, EV_SET};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_returns_when_word_differs() {
        let cv = CondvarWait::new();
        let word = AtomicU32::new(EV_FREE);
        cv.wait_while(&word, EV_BUSY);
    }

    #[test]
    fn test_wake_all_releases_every_sleeper() {
        let cv = Arc::new(CondvarWait::new());
        let word = Arc::new(AtomicU32::new(EV_BUSY));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cv = Arc::clone(&cv);
                let word = Arc::clone(&word);
                thread::spawn(move || cv.wait_while(&word, EV_BUSY))
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        word.store(EV_SET, Ordering::Release);
        cv.wake_all(&word);

        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    fn test_poisoned_lock_still_works() {
        let cv = Arc::new(CondvarWait::new());
        let cv2 = Arc::clone(&cv);
        let _ = thread::spawn(move || {
            let _guard = cv2.lock();
            panic!("poison the lock");
        })
        .join();

        let word = AtomicU32::new(EV_SET);
        cv.wait_while(&word, EV_BUSY);
        cv.wake_all(&word);
    }
}
