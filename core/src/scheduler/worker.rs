//! A single worker thread's drain loop.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::Job;
use crate::sync::BlockingQueue;

pub(super) struct Worker {
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(super) fn spawn(
        index: usize,
        labeled: bool,
        queue: Arc<BlockingQueue<Job>>,
        running: Arc<AtomicBool>,
    ) -> Self {
        let body = move || loop {
            let Some(job) = queue.dequeue() else {
                break;
            };
            if !running.load(Ordering::Acquire) {
                break;
            }
            // A job that panics must not poison the scheduler: catch it at
            // the worker boundary, log it, and keep draining.
            if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(job)) {
                let message = panic_message(&payload);
                log::error!("scheduler worker {index} caught a panicking job: {message}");
            }
        };

        let handle = if labeled {
            std::thread::Builder::new()
                .name(format!("stratum-worker-{index}"))
                .spawn(body)
                .expect("failed to spawn scheduler worker thread")
        } else {
            std::thread::spawn(body)
        };

        Self { handle: Some(handle) }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Detach rather than join: in-flight jobs finish on their own time,
        // the scheduler does not wait for them on shutdown.
        if let Some(handle) = self.handle.take() {
            drop(handle);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
