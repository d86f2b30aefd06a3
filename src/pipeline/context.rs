use super::report::MergeReport;
use crate::component::ComponentDescriptor;
use crate::config::{MergeConfig, ProjectLayout};
use crate::fs::FileTree;
use crate::shared::SharedSet;

/// State threaded through the phases of one run.
///
/// The tree is the single writer handle for the whole run.
pub struct MergeContext<'a> {
    pub tree: &'a mut dyn FileTree,
    pub config: &'a MergeConfig,
    pub layout: ProjectLayout,
    pub descriptors: Vec<ComponentDescriptor>,
    pub shared: SharedSet,
    pub report: MergeReport,
}

impl<'a> MergeContext<'a> {
    pub fn new(tree: &'a mut dyn FileTree, config: &'a MergeConfig) -> Self {
        Self {
            tree,
            layout: config.layout(),
            config,
            descriptors: Vec::new(),
            shared: SharedSet::default(),
            report: MergeReport::default(),
        }
    }

    /// Moves the accumulated results into the report
    pub fn into_report(self) -> MergeReport {
        MergeReport {
            components: self.descriptors,
            shared: self.shared,
            ..self.report
        }
    }
}
