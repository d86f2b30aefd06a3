use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use crate::rewrite::rewrite;
use tracing::info;

pub struct RewritePhase;

impl MergePhase for RewritePhase {
    fn name(&self) -> &'static str {
        "rewrite"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        let rewritten = rewrite(
            context.tree,
            &context.descriptors,
            &context.shared,
            &context.layout,
        )?;
        info!(components = rewritten.len(), "Rewrote component references");
        context.report.rewritten = rewritten;
        Ok(())
    }
}
