use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use tracing::debug;

/// Checks run before anything is written
pub struct PreflightPhase;

impl MergePhase for PreflightPhase {
    fn name(&self) -> &'static str {
        "preflight"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        if context.config.update_workspace_config {
            crate::workspace::preflight(&*context.tree, context.config)?;
        }
        if !context.tree.is_dir(&context.layout.active_theme) {
            debug!(
                theme = %context.layout.active_theme.display(),
                "No active theme directory, nothing will be migrated"
            );
        }
        Ok(())
    }
}
