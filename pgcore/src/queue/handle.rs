//! Result handles for queued work.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use super::WorkError;

/// Receives the result of a single work item.
///
/// The result can be taken once. Dropping the handle does not cancel the
/// item; it still runs and its result is discarded.
#[derive(Debug)]
pub struct WorkHandle<T> {
    receiver: Receiver<Result<T, WorkError>>,
}

impl<T> WorkHandle<T> {
    pub(crate) fn new(receiver: Receiver<Result<T, WorkError>>) -> Self {
        Self { receiver }
    }

    /// Block until the item has run.
    pub fn wait(self) -> Result<T, WorkError> {
        self.receiver.recv().unwrap_or(Err(WorkError::Abandoned))
    }

    /// Block for at most `timeout`.
    ///
    /// Returns `None` if the item has not finished yet.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<T, WorkError>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(WorkError::Abandoned)),
        }
    }

    /// Return the result if the item has finished, without blocking.
    pub fn try_wait(&self) -> Option<Result<T, WorkError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WorkError::Abandoned)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_dropped_sender_is_abandoned() {
        let (tx, rx) = mpsc::channel::<Result<u32, WorkError>>();
        drop(tx);
        assert_eq!(WorkHandle::new(rx).wait(), Err(WorkError::Abandoned));
    }

    #[test]
    fn test_try_wait_before_and_after() {
        let (tx, rx) = mpsc::channel();
        let handle = WorkHandle::new(rx);
        assert_eq!(handle.try_wait(), None);

        tx.send(Ok(7)).unwrap();
        assert_eq!(handle.try_wait(), Some(Ok(7)));
    }

    #[test]
    fn test_wait_timeout_expires() {
        let (_tx, rx) = mpsc::channel::<Result<(), WorkError>>();
        let handle = WorkHandle::new(rx);
        assert_eq!(handle.wait_timeout(Duration::from_millis(10)), None);
    }
}
