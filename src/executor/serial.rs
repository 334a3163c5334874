//! Serial queue backed by a dedicated worker thread.

use super::{Executor, ExecutorError, Job};
use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle, ThreadId};
use tracing::{error, trace, warn};

/// Executor that runs jobs one at a time, in submission order, on its own
/// named worker thread.
///
/// Dropping the queue closes it; jobs already submitted still run, and the
/// drop waits for the worker to finish them unless it happens on the worker
/// itself.
///
/// # Example
///
/// ```rust
/// use statewise::executor::{Executor, SerialQueue};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let queue = SerialQueue::new("docs.queue").unwrap();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// for _ in 0..3 {
///     let hits = Arc::clone(&hits);
///     queue.submit(Box::new(move || {
///         hits.fetch_add(1, Ordering::SeqCst);
///     }));
/// }
///
/// queue.drain();
/// assert_eq!(hits.load(Ordering::SeqCst), 3);
/// ```
pub struct SerialQueue {
    label: String,
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    worker_id: ThreadId,
}

impl SerialQueue {
    /// Start a queue whose worker thread is named `label`.
    pub fn new(label: impl Into<String>) -> Result<Self, ExecutorError> {
        let label = label.into();
        let (sender, receiver) = unbounded::<Job>();
        let worker_label = label.clone();

        let worker = thread::Builder::new()
            .name(label.clone())
            .spawn(move || run_worker(&worker_label, receiver))
            .map_err(|source| ExecutorError::Spawn {
                label: label.clone(),
                source,
            })?;
        let worker_id = worker.thread().id();

        Ok(Self {
            label,
            sender: Some(sender),
            worker: Some(worker),
            worker_id,
        })
    }

    /// Name of the queue and its worker thread.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Id of the worker thread jobs run on.
    pub fn thread_id(&self) -> ThreadId {
        self.worker_id
    }

    /// Block until every job submitted before this call has run.
    ///
    /// Returns immediately when called from the queue's own worker, since
    /// waiting there could never complete.
    pub fn drain(&self) {
        if self.is_current() {
            return;
        }
        let (done, wait) = bounded::<()>(1);
        self.submit(Box::new(move || {
            let _ = done.send(());
        }));
        if wait.recv().is_err() {
            warn!(queue = %self.label, "queue stopped before drain completed");
        }
    }
}

fn run_worker(label: &str, receiver: Receiver<Job>) {
    trace!(queue = %label, "serial queue started");
    for job in receiver.iter() {
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!(queue = %label, "job panicked; continuing with next job");
        }
    }
    trace!(queue = %label, "serial queue stopped");
}

impl Executor for SerialQueue {
    fn submit(&self, job: Job) {
        let Some(sender) = &self.sender else {
            error!(queue = %self.label, "job submitted to a closed queue");
            return;
        };
        if sender.send(job).is_err() {
            error!(queue = %self.label, "worker is gone; job dropped");
        }
    }

    fn is_current(&self) -> bool {
        thread::current().id() == self.worker_id
    }
}

impl Drop for SerialQueue {
    fn drop(&mut self) {
        self.sender.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        if self.is_current() {
            return;
        }
        if worker.join().is_err() {
            warn!(queue = %self.label, "worker thread terminated abnormally");
        }
    }
}

impl fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialQueue")
            .field("label", &self.label)
            .field("worker_id", &self.worker_id)
            .finish()
    }
}
