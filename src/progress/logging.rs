//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { project } => {
                info!(project = %project, "Starting theme merge");
            }
            ProgressEvent::PhaseStarted { phase } => {
                info!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                info!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::Completed {
                components,
                shared,
                files_changed,
                total_time,
            } => {
                info!(
                    components,
                    shared,
                    files_changed,
                    total_time_ms = total_time.as_millis(),
                    "Theme merge complete"
                );
            }
            ProgressEvent::Failed { phase, error } => {
                error!(phase = %phase, error = %error, "Theme merge failed");
            }
        }
    }
}
