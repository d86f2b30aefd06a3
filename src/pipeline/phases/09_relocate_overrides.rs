use crate::error::MergeError;
use crate::migrate::destinations;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use crate::relocate::relocate_overrides;

pub struct RelocateOverridesPhase;

impl MergePhase for RelocateOverridesPhase {
    fn name(&self) -> &'static str {
        "relocate-overrides"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        let referenced = destinations(&context.descriptors, &context.shared, &context.layout);
        let (written, deleted) = relocate_overrides(context.tree, &context.layout, &referenced)?;
        context.report.written.extend(written);
        context.report.deleted.extend(deleted);
        Ok(())
    }
}
