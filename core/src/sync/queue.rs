//! The single hand-off point between producers and the worker pool.
//!
//! Follows the design note's strategy directly: "pair a FIFO buffer with a
//! mutex and two condition variables (not-empty, now-empty); the release
//! flag is a separate atomic that callers of `dequeue` observe after each
//! wake."

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Condvar, Mutex};

/// An unbounded FIFO queue with blocking dequeue, supporting multi-producer
/// enqueue and single-consumer-at-a-time blocking dequeue (any number of
/// consumers may call `dequeue` concurrently; each item goes to exactly one
/// of them).
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    now_empty: Condvar,
    released: AtomicBool,
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
            now_empty: Condvar::new(),
            released: AtomicBool::new(false),
        }
    }

    /// Pushes an item at the tail and wakes one waiter.
    ///
    /// Silently accepted even after [`release`](Self::release); the caller
    /// (the scheduler) is responsible for not enqueuing after shutdown if
    /// that matters to it. This queue only guarantees released dequeues
    /// never observe an item, not that enqueue rejects late arrivals.
    pub fn enqueue(&self, item: T) {
        let mut items = self.items.lock();
        items.push_back(item);
        self.not_empty.notify_one();
    }

    /// Blocks until an item is available or until [`release`](Self::release)
    /// has been called. Returns `false` without touching `out` if the queue
    /// was released before an item arrived.
    pub fn dequeue(&self) -> Option<T> {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                if items.is_empty() {
                    self.now_empty.notify_all();
                }
                return Some(item);
            }
            if self.released.load(Ordering::Acquire) {
                return None;
            }
            self.not_empty.wait(&mut items);
        }
    }

    /// Instantaneous check; may race with concurrent enqueue/dequeue.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Blocks the caller until the queue becomes empty.
    pub fn wait_until_empty(&self) {
        let mut items = self.items.lock();
        while !items.is_empty() {
            self.now_empty.wait(&mut items);
        }
    }

    /// Discards all pending items and wakes empty-waiters. May be called
    /// concurrently with `enqueue`; some suffix of enqueues may survive.
    pub fn clear(&self) {
        let mut items = self.items.lock();
        items.clear();
        self.now_empty.notify_all();
    }

    /// Permanently releases the queue: all current and future `dequeue`
    /// calls return `None` once the backlog is drained, and all waiters are
    /// woken immediately.
    pub fn release(&self) {
        self.released.store(true, Ordering::Release);
        let items = self.items.lock();
        self.not_empty.notify_all();
        self.now_empty.notify_all();
        drop(items);
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}
