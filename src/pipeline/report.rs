use crate::component::ComponentDescriptor;
use crate::migrate::SkippedReference;
use crate::shared::SharedSet;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a merge or scan run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    /// Components referencing the active theme
    pub components: Vec<ComponentDescriptor>,
    pub shared: SharedSet,
    /// Files created or overwritten by migration and relocation
    pub written: Vec<PathBuf>,
    /// Component sources whose references were rewritten
    pub rewritten: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
    /// References whose source file was absent
    pub skipped: Vec<SkippedReference>,
    pub workspace_updated: bool,
}

impl MergeReport {
    /// Distinct paths touched by the run
    pub fn files_changed(&self) -> usize {
        let mut paths: Vec<&PathBuf> = self
            .written
            .iter()
            .chain(&self.rewritten)
            .chain(&self.deleted)
            .collect();
        paths.sort();
        paths.dedup();
        paths.len() + usize::from(self.workspace_updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_changed_counts_distinct_paths() {
        let report = MergeReport {
            written: vec![PathBuf::from("src/a.scss"), PathBuf::from("src/a.scss")],
            rewritten: vec![PathBuf::from("src/app/a.ts")],
            deleted: vec![PathBuf::from("src/b.custom.scss")],
            workspace_updated: true,
            ..Default::default()
        };
        assert_eq!(report.files_changed(), 4);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(MergeReport::default()).unwrap();
        assert!(json["components"].as_array().unwrap().is_empty());
        assert!(json["shared"].as_array().unwrap().is_empty());
        assert_eq!(json["workspace_updated"], false);
    }
}
