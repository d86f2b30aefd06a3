//! Phase-based merge pipeline

pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod report;

pub use context::MergeContext;
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::MergePhase;
pub use report::MergeReport;
