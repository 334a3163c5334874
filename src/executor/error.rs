//! Executor error types.

use thiserror::Error;

/// Errors that can occur when creating an executor.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The worker thread backing a serial queue could not be started
    #[error("Failed to spawn worker thread for queue '{label}': {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },
}
