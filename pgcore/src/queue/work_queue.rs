//! FIFO work queue with a single worker thread.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, warn};

use super::handle::WorkHandle;
use super::{QueueError, WorkError};

/// How often `wait_for_completion` re-checks the queue.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Configuration for a [`WorkQueue`].
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Queue name, used for the worker thread name and log messages.
    pub name: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "work-queue".to_string(),
        }
    }
}

impl QueueConfig {
    /// Create a configuration with the given queue name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn thread_name(&self) -> String {
        format!("pgcore-{}", self.name)
    }
}

/// Lifecycle state of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Accepting and running work.
    Running,
    /// No longer accepting work; running what is already queued.
    Draining,
    /// The worker has exited.
    Stopped,
}

struct Inner {
    jobs: VecDeque<Job>,
    state: QueueState,
}

/// State shared with the worker thread.
struct Shared {
    name: String,
    inner: Mutex<Inner>,
    available: Condvar,
    pending: AtomicUsize,
    busy: AtomicBool,
    failed: AtomicUsize,
}

/// Runs submitted work items one at a time on a background thread.
///
/// Items run in submission order and never overlap. A panicking item is
/// logged and counted; the worker keeps going. There is no per-item timeout,
/// so an item that blocks forever stalls the queue.
///
/// Dropping the queue shuts it down: queued items are drained, then the
/// worker is joined.
///
/// # Example
///
/// ```
/// use pgcore::queue::{QueueConfig, WorkQueue};
///
/// let queue = WorkQueue::new(QueueConfig::new("example")).unwrap();
/// let handle = queue.submit_with_result(|| 2 + 2).unwrap();
/// assert_eq!(handle.wait(), Ok(4));
/// queue.shutdown();
/// ```
pub struct WorkQueue {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl WorkQueue {
    /// Start a queue and its worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Spawn`] if the thread cannot be created.
    pub fn new(config: QueueConfig) -> Result<Self, QueueError> {
        let shared = Arc::new(Shared {
            name: config.name.clone(),
            inner: Mutex::new(Inner {
                jobs: VecDeque::new(),
                state: QueueState::Running,
            }),
            available: Condvar::new(),
            pending: AtomicUsize::new(0),
            busy: AtomicBool::new(false),
            failed: AtomicUsize::new(0),
        });

        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(config.thread_name())
            .spawn(move || Self::worker_loop(worker_shared))
            .map_err(QueueError::Spawn)?;

        debug!(queue = %config.name, "Work queue started");

        Ok(Self {
            shared,
            worker_id: handle.thread().id(),
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Queue a work item.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ShutDown`] once [`shutdown`](Self::shutdown) has
    /// been called. The item is dropped without running.
    pub fn submit<F>(&self, work: F) -> Result<(), QueueError>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut inner = self.shared.inner.lock();
            if inner.state != QueueState::Running {
                return Err(QueueError::ShutDown);
            }
            inner.jobs.push_back(Box::new(work));
            self.shared.pending.fetch_add(1, Ordering::SeqCst);
        }
        self.shared.available.notify_one();
        Ok(())
    }

    /// Queue a work item and get a handle to its return value.
    ///
    /// If the item panics the handle yields [`WorkError::Panicked`]; the
    /// panic is still counted by [`failed_count`](Self::failed_count).
    pub fn submit_with_result<F, T>(&self, work: F) -> Result<WorkHandle<T>, QueueError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        self.submit(move || match panic::catch_unwind(AssertUnwindSafe(work)) {
            Ok(value) => {
                let _ = sender.send(Ok(value));
            }
            Err(payload) => {
                let _ = sender.send(Err(WorkError::Panicked(panic_message(payload.as_ref()))));
                panic::resume_unwind(payload);
            }
        })?;

        Ok(WorkHandle::new(receiver))
    }

    /// Queue name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> QueueState {
        self.shared.inner.lock().state
    }

    /// Returns true while an item is executing.
    pub fn is_busy(&self) -> bool {
        self.shared.busy.load(Ordering::SeqCst)
    }

    /// Number of items waiting to run (not counting the running one).
    pub fn pending_count(&self) -> usize {
        self.shared.pending.load(Ordering::SeqCst)
    }

    /// Returns true if an item is running or waiting.
    pub fn is_working(&self) -> bool {
        // Load pending before busy. The worker raises busy before lowering
        // pending, so an item popped between the two loads is still seen.
        let pending = self.pending_count() > 0;
        pending || self.is_busy()
    }

    /// Number of items that panicked.
    pub fn failed_count(&self) -> usize {
        self.shared.failed.load(Ordering::SeqCst)
    }

    /// Block until the queue is idle.
    ///
    /// Polls every 10 ms. Must not be called from a work item on the same
    /// queue, since the queue is busy for as long as that item runs.
    pub fn wait_for_completion(&self) {
        while self.is_working() {
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Block until the queue is idle or `timeout` elapses.
    ///
    /// Returns true if the queue became idle.
    pub fn wait_for_completion_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_working() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
        true
    }

    /// Stop accepting work, drain queued items and join the worker.
    ///
    /// Safe to call more than once. When called from one of this queue's own
    /// work items the worker is not joined; it exits after draining.
    pub fn shutdown(&self) {
        {
            let mut inner = self.shared.inner.lock();
            if inner.state == QueueState::Running {
                inner.state = QueueState::Draining;
                debug!(queue = %self.shared.name, pending = inner.jobs.len(), "Work queue draining");
            }
        }
        self.shared.available.notify_all();

        if thread::current().id() == self.worker_id {
            return;
        }

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.join() {
                warn!(queue = %self.shared.name, "Work queue thread panicked: {:?}", e);
            }
        }
    }

    fn worker_loop(shared: Arc<Shared>) {
        loop {
            let job = {
                let mut inner = shared.inner.lock();
                loop {
                    if let Some(job) = inner.jobs.pop_front() {
                        // Raise busy before lowering pending; is_working reads them in reverse
                        shared.busy.store(true, Ordering::SeqCst);
                        shared.pending.fetch_sub(1, Ordering::SeqCst);
                        break Some(job);
                    }
                    if inner.state != QueueState::Running {
                        inner.state = QueueState::Stopped;
                        break None;
                    }
                    shared.available.wait(&mut inner);
                }
            };

            let Some(job) = job else {
                break;
            };

            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                shared.failed.fetch_add(1, Ordering::SeqCst);
                error!(
                    queue = %shared.name,
                    "Work item panicked: {}",
                    panic_message(payload.as_ref())
                );
            }

            shared.busy.store(false, Ordering::SeqCst);
        }

        debug!(queue = %shared.name, "Work queue stopped");
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WorkQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkQueue")
            .field("name", &self.shared.name)
            .field("pending", &self.pending_count())
            .field("busy", &self.is_busy())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
