//! Thread-safety primitives: a value-and-lock pair with RAII access tokens,
//! and an unbounded blocking queue used as the scheduler's hand-off point.

mod queue;
mod synchronized;

pub use queue::BlockingQueue;
pub use synchronized::{ReadToken, Synchronized, UnsafeToken, WriteToken};
