//! Scheduler Module
//!
//! Bounded-concurrency execution of async tasks with advisory timeouts.
//!
//! Admission is FIFO and limited to a fixed number of running tasks. Each
//! task receives an [`AbortSignal`] that fires when its timeout elapses;
//! tasks that never look at the signal simply keep running.

mod signal;
mod task_scheduler;

pub use signal::{AbortController, AbortSignal};
pub use task_scheduler::TaskScheduler;
