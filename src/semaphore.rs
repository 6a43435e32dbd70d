//! Counting semaphore implementation.
//!
//! This module provides the one blocking wait/signal primitive the whole
//! simulation is built from. It is a classic counting semaphore over
//! `parking_lot`'s `Mutex` and `Condvar`: `acquire` blocks while the count is
//! zero and then decrements; `release` increments and wakes one waiter.
//!
//! # Guarantees
//!
//! - N releases permit N acquires before anyone blocks again.
//! - `release` is safe with no waiter present; the count simply grows.
//! - Releases issued in a tight loop are each individually observable, which
//!   is what the shutdown broadcast relies on.
//!
//! # Examples
//!
//! ```
//! use facility_sim::Semaphore;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let gate = Arc::new(Semaphore::new(2));
//! let mut handles = vec![];
//!
//! for _ in 0..4 {
//!     let gate = Arc::clone(&gate);
//!     handles.push(thread::spawn(move || {
//!         gate.acquire();
//!         // at most two threads are in here at once
//!         gate.release();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

use parking_lot::{Condvar, Mutex};

/// A counting semaphore.
///
/// Unlike `std::sync::Condvar`-based hand-rolled variants, this type does not
/// implement poisoning: a panic while blocked leaves the count consistent.
#[derive(Debug, Default)]
pub struct Semaphore {
    permits: Mutex<usize>,
    wakeup: Condvar,
}

impl Semaphore {
    /// Creates a semaphore with an initial number of permits.
    ///
    /// # Examples
    ///
    /// ```
    /// use facility_sim::Semaphore;
    ///
    /// let sem = Semaphore::new(10);
    /// assert_eq!(sem.permits(), 10);
    /// ```
    #[must_use]
    pub const fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            wakeup: Condvar::new(),
        }
    }

    /// Blocks until a permit is available, then takes it.
    ///
    /// The wait loop re-checks the count after every wake, so spurious
    /// wakeups and lost races against other waiters are handled.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.wakeup.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Takes a permit without blocking.
    ///
    /// Returns `true` if a permit was available.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Returns a permit and wakes one waiter.
    ///
    /// Safe to call with no waiter present; the count simply increments.
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        drop(permits);
        self.wakeup.notify_one();
    }

    /// Current permit count.
    ///
    /// Snapshot only; the value may be stale by the time the caller looks at
    /// it. Useful for diagnostics and tests.
    #[must_use]
    pub fn permits(&self) -> usize {
        *self.permits.lock()
    }
}
