//! Lexical path helpers for tree paths
//!
//! Tree paths are relative to the project root, contain no `.` or `..`
//! components and are rendered with `/` separators whenever they end up
//! inside source text.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path lexically: drops roots and `.`, resolves `..` against
/// preceding components. `..` past the root is clamped.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut out: Vec<String> = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(part) => out.push(part.to_string_lossy().to_string()),
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out.iter().collect()
}

/// Joins `rest` onto `base` and normalizes the result.
pub fn join(base: impl AsRef<Path>, rest: impl AsRef<Path>) -> PathBuf {
    normalize(base.as_ref().join(rest.as_ref()))
}

/// Renders a path with `/` separators.
pub fn to_slash(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative path from directory `from` to `to`, `/`-separated.
///
/// Returns an empty string when both resolve to the same location.
pub fn relative(from: impl AsRef<Path>, to: impl AsRef<Path>) -> String {
    let from = normalize(from);
    let to = normalize(to);
    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat("..".to_string()).take(from_parts.len() - common);
    let downs = to_parts[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().to_string());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

/// Directory part of a tree path; empty for top-level entries.
pub fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Final component of a path as UTF-8, if any.
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// True for `.css` and `.scss` files.
pub fn is_stylesheet(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".css") || lower.ends_with(".scss")
}
