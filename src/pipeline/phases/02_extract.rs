use crate::component::extract_all;
use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use tracing::info;

pub struct ExtractPhase;

impl MergePhase for ExtractPhase {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        context.descriptors = extract_all(&*context.tree, &context.layout.src_root);
        info!(
            components = context.descriptors.len(),
            "Found components referencing the active theme"
        );
        Ok(())
    }
}
