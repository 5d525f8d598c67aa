//! Progress notifications and stop signals exchanged with the caller.

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Snapshot delivered to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Counter position reached (sequential scans) or orderings scanned so far
    /// (sharded scans), in `0..=total`.
    pub current_index: u64,
    /// Size of the search space.
    pub total: u64,
    /// Solutions collected so far.
    pub solutions: usize,
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current_index as f64 / self.total as f64
        }
    }
}

/// Receives progress snapshots. Notifications are fire-and-forget.
pub trait ProgressSink: Send {
    /// Called once per batch (sequential) or once per finished shard.
    fn report(&mut self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress) + Send,
{
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Sink that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: Progress) {}
}

/// Caller-initiated stop request, polled once per batch.
pub trait StopSignal: Sync {
    /// Returns true when the scan should stop before scanning `next_index`.
    fn should_stop(&self, next_index: u64) -> bool;
}

/// Signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&self, _next_index: u64) -> bool {
        false
    }
}

/// Fires once the counter reaches a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAt(pub u64);

impl StopSignal for StopAt {
    fn should_stop(&self, next_index: u64) -> bool {
        next_index >= self.0
    }
}

/// Shared cancellation flag that can be raised from any thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, AtomicOrdering::SeqCst);
    }

    /// Returns true once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(AtomicOrdering::SeqCst)
    }
}

impl StopSignal for CancelToken {
    fn should_stop(&self, _next_index: u64) -> bool {
        self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |progress: Progress| seen.push(progress.current_index);
            sink.report(Progress {
                current_index: 3,
                total: 24,
                solutions: 0,
            });
        }
        assert_eq!(seen, vec![3]);
    }

    #[test]
    fn cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.should_stop(0));
        clone.cancel();
        assert!(token.should_stop(0));
    }

    #[test]
    fn stop_at_fires_at_threshold() {
        let stop = StopAt(10);
        assert!(!stop.should_stop(9));
        assert!(stop.should_stop(10));
    }
}
