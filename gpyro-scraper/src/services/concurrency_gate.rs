//! Bounded-concurrency admission control for outbound lookups

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Gate allowing at most `max_concurrent` permits at once
///
/// Waiters are served in FIFO order (tokio's semaphore is fair). There is no
/// acquisition timeout; stuck holders are bounded by the HTTP client's own
/// request timeout.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

/// Scoped permit, released on drop (success, error or task abort)
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    /// `max_concurrent` is clamped to at least 1
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Wait for a free slot
    pub async fn acquire(&self) -> GatePermit {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            // The semaphore is never closed
            .expect("concurrency gate semaphore closed");

        GatePermit { _permit: permit }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_permits_released_on_drop() {
        let gate = ConcurrencyGate::new(2);
        assert_eq!(gate.available(), 2);

        let first = gate.acquire().await;
        let second = gate.acquire().await;
        assert_eq!(gate.available(), 0);

        drop(first);
        assert_eq!(gate.available(), 1);
        drop(second);
        assert_eq!(gate.available(), 2);
    }

    #[tokio::test]
    async fn test_acquire_blocks_when_full() {
        let gate = ConcurrencyGate::new(1);
        let held = gate.acquire().await;

        let blocked = tokio::time::timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(blocked.is_err(), "second acquire should wait while the permit is held");

        drop(held);
        let acquired = tokio::time::timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn test_permit_released_when_task_aborted() {
        let gate = ConcurrencyGate::new(1);
        let task_gate = gate.clone();

        let handle = tokio::spawn(async move {
            let _permit = task_gate.acquire().await;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        // Let the task take the permit
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(gate.available(), 0);

        handle.abort();
        let _ = handle.await;
        assert_eq!(gate.available(), 1);
    }

    #[test]
    fn test_zero_clamped_to_serial() {
        let gate = ConcurrencyGate::new(0);
        assert_eq!(gate.max_concurrent(), 1);
    }
}
