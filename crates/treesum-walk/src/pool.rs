//! Bounded pool of file-handle permits.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use treesum_core::WalkError;

/// Fixed-capacity permit pool bounding concurrently open file handles.
///
/// Clones share the same permits.
#[derive(Debug, Clone)]
pub struct HandlePool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl HandlePool {
    /// Create a pool with `capacity` permits. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a permit, giving up with [`WalkError::Aborted`] once `cancel`
    /// fires.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<HandlePermit, WalkError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(WalkError::Aborted),
            permit = Arc::clone(&self.permits).acquire_owned() => permit
                .map(|permit| HandlePermit { _permit: permit })
                .map_err(|_| WalkError::Aborted),
        }
    }
}

/// One held permit. Returned to the pool when dropped.
#[derive(Debug)]
pub struct HandlePermit {
    _permit: OwnedSemaphorePermit,
}

impl HandlePermit {
    /// Return the permit to the pool.
    pub fn release(self) {
        drop(self);
    }
}
