use crate::error::MergeError;
use crate::migrate::migrate_private;
use crate::pipeline::context::MergeContext;
use crate::pipeline::phase_trait::MergePhase;

pub struct MigratePrivatePhase;

impl MergePhase for MigratePrivatePhase {
    fn name(&self) -> &'static str {
        "migrate-private"
    }

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError> {
        let outcome = migrate_private(context.tree, &context.descriptors, &context.shared)?;
        context.report.written.extend(outcome.written);
        context.report.skipped.extend(outcome.skipped);
        Ok(())
    }
}
