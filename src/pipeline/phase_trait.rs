use super::context::MergeContext;
use crate::error::MergeError;

/// One step of the merge. Phases run in a fixed order and share state
/// through the context.
pub trait MergePhase {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut MergeContext<'_>) -> Result<(), MergeError>;
}
