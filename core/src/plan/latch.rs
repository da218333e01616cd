//! A down-counting latch used to gate one instruction pack on the previous
//! one's completion.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

#[derive(Clone)]
pub(super) struct Latch {
    inner: Arc<Inner>,
}

struct Inner {
    remaining: Mutex<usize>,
    done: Condvar,
}

impl Latch {
    pub(super) fn new(count: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                remaining: Mutex::new(count),
                done: Condvar::new(),
            }),
        }
    }

    /// Decrements the latch. Wakes waiters once it reaches zero.
    pub(super) fn count_down(&self) {
        let mut remaining = self.inner.remaining.lock();
        if *remaining == 0 {
            return;
        }
        *remaining -= 1;
        if *remaining == 0 {
            self.inner.done.notify_all();
        }
    }

    /// Blocks until the latch reaches zero. Returns immediately if it was
    /// constructed with a count of zero (an empty pack never produces a
    /// latch in practice, since `ExecutionPlan` skips empty packs, but a
    /// zero count is still handled correctly here).
    pub(super) fn wait(&self) {
        let mut remaining = self.inner.remaining.lock();
        while *remaining > 0 {
            self.inner.done.wait(&mut remaining);
        }
    }
}
