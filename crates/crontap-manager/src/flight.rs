//! In-flight execution tracking for bounded shutdown drain.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Notify;

/// Counts executions in flight so shutdown can wait for drain.
pub(crate) struct FlightTracker {
    active: AtomicU64,
    drained: Notify,
}

impl FlightTracker {
    pub(crate) fn new() -> Self {
        Self {
            active: AtomicU64::new(0),
            drained: Notify::new(),
        }
    }

    /// Register one execution. The returned guard deregisters on drop.
    pub(crate) fn begin(self: &Arc<Self>) -> FlightGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        FlightGuard {
            tracker: self.clone(),
        }
    }

    pub(crate) fn active(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait until no executions are in flight.
    pub(crate) async fn wait_idle(&self) {
        loop {
            if self.active.load(Ordering::SeqCst) == 0 {
                return;
            }
            // Register interest before re-checking so a guard dropped in
            // between cannot produce a lost wakeup.
            let notified = self.drained.notified();
            if self.active.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// RAII registration of one in-flight execution.
pub(crate) struct FlightGuard {
    tracker: Arc<FlightTracker>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if self.tracker.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tracker.drained.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_idle_returns_immediately_when_idle() {
        let tracker = Arc::new(FlightTracker::new());
        tracker.wait_idle().await;
    }

    #[tokio::test]
    async fn active_tracks_live_guards() {
        let tracker = Arc::new(FlightTracker::new());
        let first = tracker.begin();
        let second = tracker.begin();
        assert_eq!(tracker.active(), 2);

        drop(first);
        assert_eq!(tracker.active(), 1);
        drop(second);
        assert_eq!(tracker.active(), 0);
    }

    #[tokio::test]
    async fn guard_drop_releases_waiters() {
        let tracker = Arc::new(FlightTracker::new());
        let guard = tracker.begin();

        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.wait_idle().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish after drain")
            .unwrap();
    }
}
