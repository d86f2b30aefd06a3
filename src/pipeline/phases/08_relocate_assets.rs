use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use crate::relocate::relocate_assets;

pub struct RelocateAssetsPhase;

impl MergePhase for RelocateAssetsPhase {
    fn name(&self) -> &'static str {
        "relocate-assets"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        let written = relocate_assets(context.tree, &context.layout)?;
        context.report.written.extend(written);
        Ok(())
    }
}
