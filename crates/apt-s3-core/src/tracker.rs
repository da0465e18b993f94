//! Completion accounting.
//!
//! The method may only exit once every outstanding unit of protocol work
//! has finished: the input stream itself (one unit, held from startup),
//! plus one unit per message framed off it. The tracker is a shared
//! counter with a wakeup, not an inference from channel closure.

use tokio::sync::watch;

/// Counter of outstanding work units with an awaitable idle condition.
#[derive(Debug)]
pub struct WorkTracker {
    count: watch::Sender<usize>,
}

impl WorkTracker {
    /// Create a tracker holding one unit for the open input stream.
    #[must_use]
    pub fn new() -> Self {
        let (count, _) = watch::channel(1);
        Self { count }
    }

    /// Account for one more outstanding unit.
    pub fn add(&self) {
        self.count.send_modify(|n| *n += 1);
    }

    /// Release one outstanding unit.
    pub fn done(&self) {
        self.count.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Current number of outstanding units.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        *self.count.borrow()
    }

    /// Wait until no units remain outstanding.
    pub async fn wait_idle(&self) {
        let mut rx = self.count.subscribe();
        // The sender lives in self, so wait_for cannot observe a closed
        // channel while we are borrowed.
        let _ = rx.wait_for(|count| *count == 0).await;
    }
}

impl Default for WorkTracker {
    fn default() -> Self {
        Self::new()
    }
}
