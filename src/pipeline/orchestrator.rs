use super::context::MergeContext;
use super::phase_trait::MergePhase;
use super::phases::{
    extract::ExtractPhase, migrate_private::MigratePrivatePhase,
    migrate_shared::MigrateSharedPhase, preflight::PreflightPhase,
    relocate_assets::RelocateAssetsPhase, relocate_index::RelocateIndexPhase,
    relocate_overrides::RelocateOverridesPhase, resolve::ResolvePhase, rewrite::RewritePhase,
    workspace::WorkspaceConfigPhase,
};
use super::report::MergeReport;
use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::fs::FileTree;
use crate::progress::{ProgressEvent, ProgressHandler};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Runs the merge phases in order against one file tree.
///
/// The first failing phase aborts the run. Nothing written before the failure
/// is rolled back; callers working on a staged tree simply discard it.
pub struct PipelineOrchestrator {
    progress: Option<Arc<dyn ProgressHandler>>,
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PipelineOrchestrator {
    pub fn new(progress: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self { progress }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress {
            handler.on_progress(&event);
        }
    }

    /// Phases for a full merge under `config`
    pub fn merge_phases(config: &MergeConfig) -> Vec<Box<dyn MergePhase>> {
        let mut phases: Vec<Box<dyn MergePhase>> = vec![
            Box::new(PreflightPhase),
            Box::new(ExtractPhase),
            Box::new(ResolvePhase),
            Box::new(MigrateSharedPhase),
            Box::new(MigratePrivatePhase),
            Box::new(RewritePhase),
        ];
        if config.relocate_bulk {
            phases.push(Box::new(RelocateIndexPhase));
            phases.push(Box::new(RelocateAssetsPhase));
            phases.push(Box::new(RelocateOverridesPhase));
        }
        if config.update_workspace_config {
            phases.push(Box::new(WorkspaceConfigPhase));
        }
        phases
    }

    /// Read-only phases: extraction and shared resolution
    pub fn scan_phases() -> Vec<Box<dyn MergePhase>> {
        vec![Box::new(ExtractPhase), Box::new(ResolvePhase)]
    }

    /// Full theme merge
    pub fn execute(
        &self,
        tree: &mut dyn FileTree,
        config: &MergeConfig,
    ) -> Result<MergeReport, MergeError> {
        self.run(tree, config, Self::merge_phases(config))
    }

    /// Reports what a merge would act on without writing anything
    pub fn scan(
        &self,
        tree: &mut dyn FileTree,
        config: &MergeConfig,
    ) -> Result<MergeReport, MergeError> {
        self.run(tree, config, Self::scan_phases())
    }

    fn run(
        &self,
        tree: &mut dyn FileTree,
        config: &MergeConfig,
        phases: Vec<Box<dyn MergePhase>>,
    ) -> Result<MergeReport, MergeError> {
        let start = Instant::now();
        info!(src_root = %config.src_root.display(), "Starting theme merge pipeline");
        self.emit(ProgressEvent::Started {
            project: config.src_root.display().to_string(),
        });

        let mut context = MergeContext::new(tree, config);

        for phase in phases {
            let phase_name = phase.name();
            self.emit(ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            if let Err(e) = phase.execute(&mut context) {
                self.emit(ProgressEvent::Failed {
                    phase: phase_name.to_string(),
                    error: e.to_string(),
                });
                return Err(MergeError::in_phase(phase_name, e));
            }

            self.emit(ProgressEvent::PhaseComplete {
                phase: phase_name.to_string(),
                duration: phase_start.elapsed(),
            });
        }

        let report = context.into_report();
        self.emit(ProgressEvent::Completed {
            components: report.components.len(),
            shared: report.shared.len(),
            files_changed: report.files_changed(),
            total_time: start.elapsed(),
        });
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryTree;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<String>>,
    }

    impl ProgressHandler for RecordingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            let label = match event {
                ProgressEvent::Started { .. } => "started".to_string(),
                ProgressEvent::PhaseStarted { phase } => format!("start:{}", phase),
                ProgressEvent::PhaseComplete { phase, .. } => format!("done:{}", phase),
                ProgressEvent::Completed { .. } => "completed".to_string(),
                ProgressEvent::Failed { phase, .. } => format!("failed:{}", phase),
            };
            self.events.lock().unwrap().push(label);
        }
    }

    fn names(phases: &[Box<dyn MergePhase>]) -> Vec<&'static str> {
        phases.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_phase_order() {
        let phases = PipelineOrchestrator::merge_phases(&MergeConfig::default());
        assert_eq!(
            names(&phases),
            vec![
                "preflight",
                "extract",
                "resolve",
                "migrate-shared",
                "migrate-private",
                "rewrite",
                "relocate-index",
                "relocate-assets",
                "relocate-overrides",
                "update-workspace-config",
            ]
        );
    }

    #[test]
    fn test_switches_drop_phases() {
        let config = MergeConfig::default()
            .with_bulk_relocation(false)
            .with_workspace_update(false);
        let phases = PipelineOrchestrator::merge_phases(&config);
        assert_eq!(phases.len(), 6);
        assert_eq!(names(&phases).last(), Some(&"rewrite"));
    }

    #[test]
    fn test_failure_is_wrapped_and_reported() {
        let handler = Arc::new(RecordingHandler::default());
        let orchestrator = PipelineOrchestrator::new(Some(handler.clone()));
        let mut tree = MemoryTree::new();
        tree.add_file("src/themes/_active/index.html", "<html></html>");

        let err = orchestrator
            .execute(&mut tree, &MergeConfig::default())
            .unwrap_err();

        match &err {
            MergeError::Phase { phase, .. } => assert_eq!(phase, "preflight"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(err.root_cause(), MergeError::MissingWorkspaceConfig(_)));
        assert!(tree.changes().is_empty());
        assert_eq!(
            *handler.events.lock().unwrap(),
            vec!["started", "start:preflight", "failed:preflight"]
        );
    }

    #[test]
    fn test_scan_does_not_write() {
        let mut tree = MemoryTree::new();
        tree.add_file(
            "src/app/a/a.ts",
            "import { Component } from '@angular/core';\n@Component({ templateUrl: '../../themes/_active/a.html' })\nexport class A {}\n",
        );
        tree.add_file("src/themes/_active/a.html", "<p></p>");

        let report = PipelineOrchestrator::default()
            .scan(&mut tree, &MergeConfig::default())
            .unwrap();

        assert_eq!(report.components.len(), 1);
        assert!(report.written.is_empty());
        assert!(tree.changes().is_empty());
    }
}
