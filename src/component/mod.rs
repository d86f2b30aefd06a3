//! Component discovery and descriptor extraction

pub mod decorator;
mod descriptor;

pub use descriptor::{canonical_path, ComponentDescriptor, ComponentReference};

use crate::config::{DECLARATION_SUFFIX, SOURCE_EXTENSION, TEST_SUFFIX};
use crate::fs::FileTree;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Builds the descriptor for one source file.
///
/// Returns `None` for unreadable or binary content, files without the
/// component decorator, and decorators carrying neither `templateUrl` nor
/// `styleUrls`. Never mutates the tree.
pub fn extract(tree: &dyn FileTree, path: &Path) -> Option<ComponentDescriptor> {
    let content = tree.read_to_string(path)?;
    let Some(metadata) = decorator::component_metadata(&content) else {
        trace!(path = %path.display(), "Not a component");
        return None;
    };
    if metadata.is_empty() {
        trace!(path = %path.display(), "Component has no template or style references");
        return None;
    }

    Some(ComponentDescriptor::new(
        path,
        metadata.template_url,
        metadata.style_urls.unwrap_or_default(),
    ))
}

/// True for TypeScript sources that are neither tests nor declaration files
pub fn is_component_candidate(path: &Path) -> bool {
    let Some(name) = crate::fs::path::file_name(path) else {
        return false;
    };
    name.ends_with(SOURCE_EXTENSION)
        && !name.ends_with(TEST_SUFFIX)
        && !name.ends_with(DECLARATION_SUFFIX)
}

/// Candidate component files below `src_root`, in sorted order
pub fn discover(tree: &dyn FileTree, src_root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = tree
        .visit(src_root)
        .into_iter()
        .filter(|p| is_component_candidate(p))
        .collect();
    paths.sort();
    paths
}

/// Descriptors of every component below `src_root` that references the
/// active theme. Components with inline or only local templates/styles are
/// left out.
pub fn extract_all(tree: &dyn FileTree, src_root: &Path) -> Vec<ComponentDescriptor> {
    let candidates = discover(tree, src_root);
    debug!(candidates = candidates.len(), "Scanning component candidates");

    candidates
        .iter()
        .filter_map(|path| extract(tree, path))
        .filter(|descriptor| !descriptor.all_refs().is_empty())
        .collect()
}
