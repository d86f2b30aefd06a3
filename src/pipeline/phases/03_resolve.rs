use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use crate::shared::resolve;
use tracing::info;

pub struct ResolvePhase;

impl MergePhase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        context.shared = resolve(&context.descriptors);
        info!(shared = context.shared.len(), "Resolved shared references");
        Ok(())
    }
}
