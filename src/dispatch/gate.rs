use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting-semaphore admission gate bounding in-flight sends for a single
/// dispatch run. One permit per outstanding send; closed exactly once after
/// the run settles.
#[derive(Debug)]
pub(super) struct ConcurrencyGate {
    permits: Arc<Semaphore>,
}

impl ConcurrencyGate {
    pub(super) fn new(concurrency: NonZeroUsize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(concurrency.get())),
        }
    }

    /// Waits for an admission slot. Returns `None` once the gate is closed.
    pub(super) async fn admit(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.permits).acquire_owned().await.ok()
    }

    pub(super) fn close(&self) {
        self.permits.close();
    }

    #[cfg(test)]
    pub(super) fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}
