//! A fixed pool of worker threads draining the job queue.
//!
//! Grounded on the pack's executor patterns: `dynec::scheduler::executor`
//! owns a thread pool and runs jobs to completion per cycle; this module
//! generalizes the idea to the spec's plain fire-and-forget job queue,
//! replacing dynec's `rayon::ThreadPool` (which schedules by work-stealing
//! over a DAG it builds itself) with a hand-rolled pool over
//! [`crate::sync::BlockingQueue`], per spec §4.3 and §9 ("cooperative
//! async/coroutines: not used in the core. The execution plan is the
//! coordination primitive").

mod worker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::sync::BlockingQueue;

/// A nullary, fire-and-forget unit of work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Owns a fixed-size worker pool and the FIFO job queue they drain.
///
/// The scheduler exclusively owns its workers and its job queue (per the
/// ownership section of the data model); nothing outside this module
/// touches either directly.
pub struct Scheduler {
    queue: Arc<BlockingQueue<Job>>,
    running: Arc<AtomicBool>,
    workers: Vec<worker::Worker>,
}

impl Scheduler {
    /// Builds a scheduler with `worker_count` workers, or
    /// `hardware_concurrency - 1` if `worker_count` is `0`. If
    /// `config.multithread_enabled` is `false`, no workers are spawned
    /// regardless of `worker_count`.
    pub fn new(worker_count: usize, config: &Config) -> Self {
        let queue = Arc::new(BlockingQueue::new());
        let running = Arc::new(AtomicBool::new(true));

        let worker_count = if !config.multithread_enabled {
            0
        } else if worker_count == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1))
                .unwrap_or(0)
        } else {
            worker_count
        };

        let workers = (0..worker_count)
            .map(|index| {
                worker::Worker::spawn(
                    index,
                    config.thread_labels_enabled,
                    Arc::clone(&queue),
                    Arc::clone(&running),
                )
            })
            .collect();

        Self { queue, running, workers }
    }

    /// Enqueues `job`, unless shutdown has already started.
    pub fn schedule(&self, job: Job) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }
        self.queue.enqueue(job);
    }

    /// Blocks until the queue reports empty.
    ///
    /// This does not guarantee all *running* jobs have completed — only
    /// that every *queued* job has been picked up by some worker. Callers
    /// that need full quiescence should drive an [`crate::plan::ExecutionPlan`]
    /// whose final pack's latch they can wait on instead.
    pub fn wait_for_queued_tasks(&self) {
        self.queue.wait_until_empty();
    }

    /// Idempotent. Clears the running flag, releases the queue (so blocked
    /// workers wake and exit), and detaches the worker threads: this method
    /// does not join them, so in-flight jobs are allowed to run to
    /// completion in the background rather than being killed.
    pub fn shutdown(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        self.queue.release();
        // Workers are detached, not joined: dropping the `JoinHandle`s lets
        // the OS threads keep running until they notice `running` is clear.
        self.workers.clear();
    }

    /// Number of worker threads currently owned by this scheduler.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub(crate) fn queue(&self) -> &Arc<BlockingQueue<Job>> {
        &self.queue
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
