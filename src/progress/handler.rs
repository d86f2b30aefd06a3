//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while a merge runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Merge started
    Started { project: String },

    /// Phase started
    PhaseStarted { phase: String },

    /// Phase finished without error
    PhaseComplete { phase: String, duration: Duration },

    /// Merge completed successfully
    Completed {
        components: usize,
        shared: usize,
        files_changed: usize,
        total_time: Duration,
    },

    /// Merge aborted
    Failed { phase: String, error: String },
}

/// Receives progress events from the pipeline
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
