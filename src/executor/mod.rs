//! Execution contexts for event dispatch.
//!
//! A machine can be bound to an [`Executor`]. Each `handle_event` call is
//! then submitted as one unit of work, so transitions never interleave and
//! the action plus the notification callback for an event run on the same
//! context, in that order, before the next unit starts.
//!
//! - [`Immediate`] runs every job inline on the calling thread.
//! - [`SerialQueue`] runs jobs in submission order on a dedicated worker thread.

mod error;
mod serial;

pub use error::ExecutorError;
pub use serial::SerialQueue;

/// A unit of work submitted to an executor.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Task-submission capability a machine dispatches through.
///
/// Implementations must run submitted jobs one at a time, in submission
/// order.
pub trait Executor: Send + Sync {
    /// Queue `job` for execution.
    fn submit(&self, job: Job);

    /// Check whether the calling thread is this executor's context.
    ///
    /// Machines dispatch inline when this returns `true`, which is what lets
    /// an action re-enter `handle_event` without deadlocking the queue.
    fn is_current(&self) -> bool;
}

/// Executor that runs jobs inline on the caller's thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl Executor for Immediate {
    fn submit(&self, job: Job) {
        job();
    }

    fn is_current(&self) -> bool {
        true
    }
}
