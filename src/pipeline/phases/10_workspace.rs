use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use crate::workspace::update_workspace_config;

pub struct WorkspaceConfigPhase;

impl MergePhase for WorkspaceConfigPhase {
    fn name(&self) -> &'static str {
        "update-workspace-config"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        context.report.workspace_updated =
            update_workspace_config(context.tree, context.config, &context.layout)?;
        Ok(())
    }
}
