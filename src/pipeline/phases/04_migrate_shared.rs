use crate::error::MergeError;
use crate::migrate::migrate_shared;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;

pub struct MigrateSharedPhase;

impl MergePhase for MigrateSharedPhase {
    fn name(&self) -> &'static str {
        "migrate-shared"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        let outcome = migrate_shared(context.tree, &context.shared, &context.layout)?;
        context.report.written.extend(outcome.written);
        context.report.skipped.extend(outcome.skipped);
        Ok(())
    }
}
