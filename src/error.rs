//! Error taxonomy for tree operations and the merge pipeline
//!
//! Only conditions that abort a run live here. Per-item conditions (a file that
//! is not a component, a reference whose content is missing) are skips: they
//! are logged and recorded in the report, never surfaced as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single virtual file tree operation
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Path already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal pipeline errors
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Workspace configuration not found at {}. Run from the root of the project", .0.display())]
    MissingWorkspaceConfig(PathBuf),

    #[error("Workspace configuration at {} is not valid: {source}", path.display())]
    InvalidWorkspaceConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tree operation failed: {0}")]
    Tree(#[from] TreeError),

    #[error("Phase {phase} failed: {source}")]
    Phase {
        phase: String,
        #[source]
        source: Box<MergeError>,
    },
}

impl MergeError {
    /// Wraps an error with the name of the phase it escaped from.
    pub fn in_phase(phase: &str, source: MergeError) -> Self {
        MergeError::Phase {
            phase: phase.to_string(),
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, unwrapping phase context.
    pub fn root_cause(&self) -> &MergeError {
        match self {
            MergeError::Phase { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_display() {
        let err = TreeError::AlreadyExists(PathBuf::from("src/app/a.scss"));
        assert_eq!(err.to_string(), "Path already exists: src/app/a.scss");
    }

    #[test]
    fn test_phase_wrapping_keeps_root_cause() {
        let inner = MergeError::MissingWorkspaceConfig(PathBuf::from("angular.json"));
        let err = MergeError::in_phase("PreflightPhase", inner);

        assert!(err.to_string().contains("PreflightPhase"));
        assert!(matches!(
            err.root_cause(),
            MergeError::MissingWorkspaceConfig(_)
        ));
    }

    #[test]
    fn test_tree_error_converts() {
        let err: MergeError = TreeError::NotFound(PathBuf::from("x")).into();
        assert!(matches!(err, MergeError::Tree(TreeError::NotFound(_))));
    }

    #[test]
    fn test_io_failure_surfaces_as_tree_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MergeError = TreeError::Io {
            path: PathBuf::from("src/app/a.scss"),
            source: io,
        }
        .into();

        assert!(matches!(err, MergeError::Tree(TreeError::Io { .. })));
        assert!(err.to_string().contains("src/app/a.scss"));
        assert!(err.to_string().contains("denied"));
    }
}
