//! Single-consumer background work queues.
//!
//! Patch generation produces many small outputs that do not need to block
//! the caller. A [`WorkQueue`] runs submitted closures one at a time, in
//! submission order, on a dedicated worker thread. [`FileWriter`] builds on
//! it to write files in the background.
//!
//! # Architecture
//!
//! ```text
//! producer ─┐
//! producer ─┼─► submit() ─► VecDeque (Mutex) ─► worker thread ─► item()
//! producer ─┘                  │ Condvar
//!                              └─ wakes the worker when work arrives
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Running ──shutdown()──► Draining ──queue empty──► Stopped
//! ```
//!
//! Items already queued when [`WorkQueue::shutdown`] is called still run.
//! Submissions after that point are rejected with [`QueueError::ShutDown`].

mod file_writer;
mod handle;
mod work_queue;

use thiserror::Error;

pub use file_writer::{FailureCallback, FileWriter, WriteFailure, WriteHandle};
pub use handle::WorkHandle;
pub use work_queue::{QueueConfig, QueueState, WorkQueue};

/// Errors submitting work to a queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue is shutting down or stopped.
    #[error("Work queue has been shut down")]
    ShutDown,

    /// The worker thread could not be started.
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Errors retrieving the result of a work item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    /// The work item panicked.
    #[error("Work item panicked: {0}")]
    Panicked(String),

    /// The work item was dropped without running.
    #[error("Work item was dropped before completing")]
    Abandoned,
}
