//! Background file writer.
//!
//! Generated outputs are handed to a [`FileWriter`] and written by its worker
//! thread while the caller moves on. Failures are never silent: each write
//! gets a [`WriteHandle`], failures are logged and counted, and an optional
//! callback sees every failure.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{trace, warn};

use super::handle::WorkHandle;
use super::work_queue::{QueueConfig, WorkQueue};
use super::QueueError;

/// Callback invoked on the worker thread for each failed write.
pub type FailureCallback = Arc<dyn Fn(&WriteFailure) + Send + Sync>;

/// A write that did not complete.
#[derive(Debug)]
pub struct WriteFailure {
    /// Target file.
    pub path: PathBuf,
    /// Underlying I/O error.
    pub error: io::Error,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to write {}: {}", self.path.display(), self.error)
    }
}

/// A pending file write.
struct WriteTask {
    data: Vec<u8>,
    path: PathBuf,
}

impl WriteTask {
    /// Create or truncate the target and write all bytes.
    ///
    /// Parent directories are not created.
    fn run(&self) -> io::Result<()> {
        fs::write(&self.path, &self.data)
    }
}

/// Handle to the outcome of a queued write.
#[derive(Debug)]
pub struct WriteHandle {
    path: PathBuf,
    inner: WorkHandle<io::Result<()>>,
}

impl WriteHandle {
    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the write has run and return its outcome.
    pub fn wait(self) -> io::Result<()> {
        self.inner
            .wait()
            .unwrap_or_else(|e| Err(io::Error::new(io::ErrorKind::Other, e)))
    }

    /// Block for at most `timeout`. Returns `None` if still pending.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<io::Result<()>> {
        self.inner
            .wait_timeout(timeout)
            .map(|r| r.unwrap_or_else(|e| Err(io::Error::new(io::ErrorKind::Other, e))))
    }
}

/// Writes files on a background thread, in submission order.
///
/// # Example
///
/// ```
/// use pgcore::queue::FileWriter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let writer = FileWriter::new().unwrap();
///
/// let handle = writer.enqueue_write(b"hello".to_vec(), dir.path().join("out.txt")).unwrap();
/// handle.wait().unwrap();
/// writer.shutdown();
/// ```
pub struct FileWriter {
    queue: WorkQueue,
    failures: Arc<AtomicUsize>,
    on_failure: Option<FailureCallback>,
}

impl FileWriter {
    /// Start a writer with the default queue name.
    pub fn new() -> Result<Self, QueueError> {
        Self::with_config(QueueConfig::new("file-writer"))
    }

    /// Start a writer with a custom queue configuration.
    pub fn with_config(config: QueueConfig) -> Result<Self, QueueError> {
        Ok(Self {
            queue: WorkQueue::new(config)?,
            failures: Arc::new(AtomicUsize::new(0)),
            on_failure: None,
        })
    }

    /// Call `callback` on the worker thread for each failed write.
    ///
    /// Applies to writes enqueued after this call.
    pub fn with_failure_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&WriteFailure) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(callback));
        self
    }

    /// Queue `data` to be written to `path`.
    ///
    /// The file is created or truncated. Missing parent directories are a
    /// write failure, not created.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ShutDown`] after [`shutdown`](Self::shutdown).
    pub fn enqueue_write(
        &self,
        data: impl Into<Vec<u8>>,
        path: impl Into<PathBuf>,
    ) -> Result<WriteHandle, QueueError> {
        let task = WriteTask {
            data: data.into(),
            path: path.into(),
        };
        let path = task.path.clone();
        let failures = Arc::clone(&self.failures);
        let on_failure = self.on_failure.clone();

        let inner = self.queue.submit_with_result(move || {
            let result = task.run();
            match result {
                Ok(()) => {
                    trace!(path = %task.path.display(), bytes = task.data.len(), "Wrote file");
                    Ok(())
                }
                Err(error) => {
                    failures.fetch_add(1, Ordering::SeqCst);
                    let failure = WriteFailure {
                        path: task.path,
                        error,
                    };
                    warn!("{}", failure);
                    if let Some(callback) = on_failure {
                        callback(&failure);
                    }
                    Err(failure.error)
                }
            }
        })?;

        Ok(WriteHandle { path, inner })
    }

    /// Returns true while a write is executing.
    pub fn is_busy(&self) -> bool {
        self.queue.is_busy()
    }

    /// Number of writes waiting to run.
    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Returns true if a write is running or waiting.
    pub fn is_working(&self) -> bool {
        self.queue.is_working()
    }

    /// Number of writes that failed.
    pub fn failed_count(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// Block until all queued writes have run.
    pub fn wait_for_completion(&self) {
        self.queue.wait_for_completion();
    }

    /// Block until all queued writes have run or `timeout` elapses.
    pub fn wait_for_completion_timeout(&self, timeout: Duration) -> bool {
        self.queue.wait_for_completion_timeout(timeout)
    }

    /// Drain queued writes and stop the worker.
    pub fn shutdown(&self) {
        self.queue.shutdown();
    }
}

impl fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWriter")
            .field("queue", &self.queue)
            .field("failed", &self.failed_count())
            .finish()
    }
}
