//! Bridge between a project directory on disk and a [`MemoryTree`]
//!
//! The pipeline never touches the disk. A host loads the project into memory,
//! runs the pipeline, then commits the net changes back.

use super::memory::{ChangeKind, FileChange, MemoryTree};
use crate::error::TreeError;
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", ".angular"];

fn io_error(path: &Path, source: std::io::Error) -> TreeError {
    TreeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Loads every file below `root` into a clean [`MemoryTree`].
///
/// Honours `.gitignore` files and skips dependency/build directories.
pub fn load(root: &Path) -> Result<MemoryTree, TreeError> {
    if !root.is_dir() {
        return Err(TreeError::NotFound(root.to_path_buf()));
    }

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .require_git(false)
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| !SKIPPED_DIRS.contains(&name))
                .unwrap_or(true)
        })
        .build();

    let mut tree = MemoryTree::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            io_error(
                root,
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            )
        })?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let content = fs::read(path).map_err(|e| io_error(path, e))?;
        trace!(path = %relative.display(), bytes = content.len(), "Loaded file");
        tree.add_bytes(relative, content);
    }

    debug!(root = %root.display(), files = tree.len(), "Loaded project tree");
    Ok(tree)
}

/// Writes the tree's net changes below `root` and returns what was applied.
pub fn commit(tree: &MemoryTree, root: &Path) -> Result<Vec<FileChange>, TreeError> {
    let changes = tree.changes();
    let contents: std::collections::BTreeMap<&Path, &[u8]> = tree.files().collect();

    for change in &changes {
        let target = root.join(&change.path);
        match change.kind {
            ChangeKind::Created | ChangeKind::Modified => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
                }
                let content = contents
                    .get(change.path.as_path())
                    .ok_or_else(|| TreeError::NotFound(change.path.clone()))?;
                fs::write(&target, content).map_err(|e| io_error(&target, e))?;
            }
            ChangeKind::Deleted => match fs::remove_file(&target) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(&target, e)),
            },
        }
        debug!(path = %change.path.display(), kind = ?change.kind, "Committed change");
    }

    Ok(changes)
}
