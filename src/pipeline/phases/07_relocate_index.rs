use crate::error::MergeError;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;
use crate::relocate::relocate_index;

pub struct RelocateIndexPhase;

impl MergePhase for RelocateIndexPhase {
    fn name(&self) -> &'static str {
        "relocate-index"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        let written = relocate_index(context.tree, &context.layout)?;
        context.report.written.extend(written);
        Ok(())
    }
}
