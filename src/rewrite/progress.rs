//! Progress reporting for rewrite runs.

use serde::Serialize;
use tokio::sync::mpsc;

/// Completion state after a chunk has been attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Chunks attempted so far.
    pub completed: usize,
    /// Total chunks in the run.
    pub total: usize,
}

impl Progress {
    /// Fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Receives progress updates from the engine.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: Progress);
}

impl<F> ProgressReporter for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn report(&self, progress: Progress) {
        self(progress)
    }
}

/// Discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _progress: Progress) {}
}

/// Forwards updates over a channel, for display on another task.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<Progress>,
}

impl ChannelReporter {
    pub fn new(tx: mpsc::UnboundedSender<Progress>) -> Self {
        Self { tx }
    }

    /// Create a reporter together with its receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Progress>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, progress: Progress) {
        // Receiver gone means nobody is watching.
        let _ = self.tx.send(progress);
    }
}
