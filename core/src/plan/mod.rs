//! A build-once / execute-many phased job DAG.
//!
//! An [`ExecutionPlan`] is an ordered list of instruction packs: every job in
//! pack *i* must finish before any job in pack *i+1* starts. It can run on
//! the caller thread or be handed to a [`crate::scheduler::Scheduler`].
//!
//! Grounded on the latch-based cross-pack barrier `dynec::scheduler::
//! executor` builds per cycle (a `Condvar`-guarded countdown gates each
//! node on its dependencies) and on spec §4.4's own implementation
//! guidance: "one down-counting latch per pack... each scheduled job first
//! waits on the previous pack's latch then runs its instruction, then
//! counts down its own latch."

mod latch;

use std::sync::Arc;

use latch::Latch;

use crate::scheduler::{Job, Scheduler};

/// A nullary instruction added to the plan's current pack.
///
/// Stored behind an `Arc` rather than a plain `Box` so that
/// `execute_asynchronously` can hand each scheduled job its own owned
/// reference to the instruction without borrowing from `self` — the
/// scheduler's jobs are `'static`, and packaging instructions as `Box<dyn
/// FnOnce>` per dispatch would require either cloning the closure's
/// captures or an unsafe lifetime extension; the shared, ref-counted
/// closure sidesteps both.
pub type Instruction = Arc<dyn Fn() + Send + Sync + 'static>;

/// An ordered list of instruction packs. All instructions in pack *i*
/// complete before any instruction in pack *i+1* starts.
#[derive(Default)]
pub struct ExecutionPlan {
    packs: Vec<Vec<Instruction>>,
    current: Vec<Instruction>,
}

impl ExecutionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instruction to the current pack.
    pub fn add_instruction<F>(&mut self, job: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.current.push(Arc::new(job));
    }

    /// Closes the current pack and starts a new one. No-op if the current
    /// pack is empty, so that `end_instruction_pack` called twice in a row
    /// (or with nothing added since the last call) never creates an empty
    /// pack.
    pub fn end_instruction_pack(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.packs.push(std::mem::take(&mut self.current));
    }

    /// Discards all instructions and packs.
    pub fn reset_plan(&mut self) {
        self.packs.clear();
        self.current.clear();
    }

    fn all_packs(&self) -> Vec<&[Instruction]> {
        let mut packs: Vec<&[Instruction]> = self.packs.iter().map(Vec::as_slice).collect();
        if !self.current.is_empty() {
            packs.push(self.current.as_slice());
        }
        packs
    }

    /// Runs every instruction in order on the calling thread.
    ///
    /// An empty plan returns immediately.
    pub fn execute_synchronously(&self) {
        for pack in self.all_packs() {
            for instruction in pack {
                instruction();
            }
        }
    }

    /// For each pack *i*, schedules all its instructions on `scheduler`
    /// such that no instruction in pack *i* starts until every instruction
    /// in pack *i-1* has completed. Blocks the caller until the final pack
    /// has completed.
    ///
    /// Latches are allocated fresh for this call and dropped at the end, so
    /// re-executing the same plan after this call returns is safe; a second
    /// concurrent call while the first is still outstanding is undefined
    /// behavior (the spec leaves re-entrant execution unspecified — this
    /// crate documents the hazard rather than guarding against it with a
    /// runtime lock, which would need to be fallible in its own right).
    pub fn execute_asynchronously(&self, scheduler: &Scheduler) {
        let packs = self.all_packs();
        if packs.is_empty() {
            return;
        }

        // A scheduler with no workers (`multithread_enabled: false`, per
        // spec §6) never dequeues anything, so scheduling jobs and waiting
        // on their latches would deadlock the caller forever. Degrade to
        // running every pack inline instead, in order, on this thread —
        // pack barriers hold trivially since nothing else is executing.
        if scheduler.worker_count() == 0 {
            for pack in &packs {
                for instruction in *pack {
                    instruction();
                }
            }
            return;
        }

        // One latch per pack, each initialized to that pack's instruction
        // count. `latches[0]` is never waited on, only counted down, since
        // pack 0 has no predecessor.
        let latches: Vec<Latch> = packs.iter().map(|pack| Latch::new(pack.len())).collect();

        for (i, pack) in packs.iter().enumerate() {
            let previous = if i == 0 { None } else { Some(latches[i - 1].clone()) };
            let own = latches[i].clone();

            for instruction in pack.iter() {
                let previous = previous.clone();
                let own = own.clone();
                let instruction = Arc::clone(instruction);

                let job: Job = Box::new(move || {
                    if let Some(previous) = &previous {
                        previous.wait();
                    }
                    instruction();
                    own.count_down();
                });
                scheduler.schedule(job);
            }
        }

        latches[packs.len() - 1].wait();
    }
}
