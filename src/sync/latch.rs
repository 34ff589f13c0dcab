use std::sync::{Condvar, Mutex};

/// One-shot count-down gate.
///
/// Created with the number of participants. Every participant either calls
/// [`Latch::wait`] (arrive and block) or [`Latch::count_down`] (arrive and
/// continue). When the count reaches zero all blocked threads are released
/// together, and any later `wait` returns immediately. The latch never
/// re-arms.
pub struct Latch {
    count: Mutex<usize>,
    condvar: Condvar,
}

impl Latch {
    pub fn new(count: usize) -> Self {
        Self {
            count: Mutex::new(count),
            condvar: Condvar::new(),
        }
    }

    /// Arrive without waiting for the others
    pub fn count_down(&self) {
        let mut count = self.lock();
        if *count > 0 {
            *count -= 1;
            if *count == 0 {
                self.condvar.notify_all();
            }
        }
    }

    /// Arrive, then block until every participant has arrived
    pub fn wait(&self) {
        self.count_down();
        self.wait_released();
    }

    /// Block until released, without counting as a participant
    pub fn wait_released(&self) {
        let mut count = self.lock();
        while *count > 0 {
            count = self
                .condvar
                .wait(count)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    pub fn is_released(&self) -> bool {
        *self.lock() == 0
    }

    /// Participants still expected
    pub fn count(&self) -> usize {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, usize> {
        self.count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Latch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Latch").field("count", &self.count()).finish()
    }
}
