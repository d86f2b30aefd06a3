//! Bulk relocation of files that no component owns: theme-level index files,
//! global stylesheets, assets and custom overrides.

use crate::config::{ProjectLayout, CUSTOM_OVERRIDE_SUFFIX};
use crate::error::TreeError;
use crate::fs::path::{file_name, is_stylesheet, join};
use crate::fs::{upsert, FileTree, FileType};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copies the files sitting directly in the active theme.
///
/// Stylesheets land in the global styles directory, everything else at the
/// source root. Subdirectories are left alone.
pub fn relocate_index(
    tree: &mut dyn FileTree,
    layout: &ProjectLayout,
) -> Result<Vec<PathBuf>, TreeError> {
    let mut written = Vec::new();

    for entry in tree.read_dir(&layout.active_theme) {
        if !entry.is_file() {
            continue;
        }
        let Some(content) = tree.read(entry.path()) else {
            continue;
        };

        let target_dir = if is_stylesheet(entry.file_name()) {
            &layout.global_styles
        } else {
            &layout.src_root
        };
        let to = join(target_dir, entry.file_name());
        upsert(tree, &to, content)?;
        debug!(from = %entry.path().display(), to = %to.display(), "Relocated index file");
        written.push(to);
    }

    info!(files = written.len(), "Relocated theme index files");
    Ok(written)
}

/// Copies the theme's asset directory into the project assets, recursively.
pub fn relocate_assets(
    tree: &mut dyn FileTree,
    layout: &ProjectLayout,
) -> Result<Vec<PathBuf>, TreeError> {
    let mut written = Vec::new();
    copy_dir(tree, &layout.active_theme_assets, &layout.assets, &mut written)?;
    info!(files = written.len(), "Relocated theme assets");
    Ok(written)
}

fn copy_dir(
    tree: &mut dyn FileTree,
    from: &Path,
    to: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<(), TreeError> {
    let mut entries = tree.read_dir(from);
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        let target = join(to, entry.file_name());
        match entry.file_type {
            FileType::Directory => copy_dir(tree, entry.path(), &target, written)?,
            FileType::File => {
                let Some(content) = tree.read(entry.path()) else {
                    continue;
                };
                upsert(tree, &target, content)?;
                written.push(target);
            }
        }
    }
    Ok(())
}

pub fn is_custom_override(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(CUSTOM_OVERRIDE_SUFFIX))
}

/// Moves every custom override below the source root into the shared custom
/// overrides directory. Files already there stay put, as do the `referenced`
/// files that rewritten components point at.
///
/// Returns the written destinations and the deleted sources.
pub fn relocate_overrides(
    tree: &mut dyn FileTree,
    layout: &ProjectLayout,
    referenced: &BTreeSet<PathBuf>,
) -> Result<(Vec<PathBuf>, Vec<PathBuf>), TreeError> {
    let candidates: Vec<PathBuf> = tree
        .visit(&layout.src_root)
        .into_iter()
        .filter(|p| is_custom_override(p) && !p.starts_with(&layout.custom_overrides))
        .filter(|p| {
            let keep = referenced.contains(p);
            if keep {
                debug!(path = %p.display(), "Custom override is referenced by a component, leaving in place");
            }
            !keep
        })
        .collect();

    let mut written = Vec::new();
    let mut deleted = Vec::new();

    for from in candidates {
        let (Some(name), Some(content)) = (file_name(&from), tree.read(&from)) else {
            continue;
        };
        let to = join(&layout.custom_overrides, name);
        upsert(tree, &to, content)?;
        tree.delete(&from)?;
        debug!(from = %from.display(), to = %to.display(), "Moved custom override");
        written.push(to);
        deleted.push(from);
    }

    info!(files = written.len(), "Relocated custom overrides");
    Ok((written, deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryTree;

    fn themed_tree() -> MemoryTree {
        let mut tree = MemoryTree::new();
        tree.add_file("src/themes/_active/index.html", "<app-root></app-root>");
        tree.add_file("src/themes/_active/favicon.ico", "ico");
        tree.add_file("src/themes/_active/styles.scss", "@import 'x';");
        tree.add_file("src/themes/_active/theme.css", "body {}");
        tree.add_file("src/themes/_active/nested/deep.scss", ".deep {}");
        tree.add_bytes("src/themes/_active/assets/logo.png", vec![0x89, 0x00, 0xff]);
        tree.add_file("src/themes/_active/assets/i18n/en.json", "{}");
        tree.add_file("src/themes/_active/assets/i18n/fr/fr.json", "{}");
        tree
    }

    #[test]
    fn test_relocate_index_splits_stylesheets() {
        let mut tree = themed_tree();
        let layout = ProjectLayout::default();

        let written = relocate_index(&mut tree, &layout).unwrap();

        assert_eq!(written.len(), 4);
        assert!(tree.exists(Path::new("src/index.html")));
        assert!(tree.exists(Path::new("src/favicon.ico")));
        assert!(tree.exists(Path::new("src/styles/styles.scss")));
        assert!(tree.exists(Path::new("src/styles/theme.css")));
        assert!(!tree.exists(Path::new("src/deep.scss")));
        assert!(!tree.exists(Path::new("src/styles/deep.scss")));
        assert!(tree.exists(Path::new("src/themes/_active/index.html")));
    }

    #[test]
    fn test_relocate_index_overwrites_existing() {
        let mut tree = themed_tree();
        tree.add_file("src/index.html", "old");

        relocate_index(&mut tree, &ProjectLayout::default()).unwrap();

        assert_eq!(
            tree.read_to_string(Path::new("src/index.html")).as_deref(),
            Some("<app-root></app-root>")
        );
    }

    #[test]
    fn test_relocate_assets_is_recursive_and_binary_safe() {
        let mut tree = themed_tree();

        let written = relocate_assets(&mut tree, &ProjectLayout::default()).unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("src/assets/i18n/en.json"),
                PathBuf::from("src/assets/i18n/fr/fr.json"),
                PathBuf::from("src/assets/logo.png"),
            ]
        );
        assert_eq!(
            tree.read(Path::new("src/assets/logo.png")),
            Some(vec![0x89, 0x00, 0xff])
        );
    }

    #[test]
    fn test_relocate_assets_without_theme_assets() {
        let mut tree = MemoryTree::new();
        tree.add_file("src/main.ts", "");

        let written = relocate_assets(&mut tree, &ProjectLayout::default()).unwrap();
        assert!(written.is_empty());
        assert!(tree.changes().is_empty());
    }

    #[test]
    fn test_is_custom_override() {
        assert!(is_custom_override(Path::new("src/styles/brand.custom.scss")));
        assert!(!is_custom_override(Path::new("src/styles/brand.scss")));
        assert!(!is_custom_override(Path::new("src/styles/custom.scss")));
    }

    #[test]
    fn test_relocate_overrides_moves_files() {
        let mut tree = MemoryTree::new();
        tree.add_file("src/themes/_active/brand.custom.scss", ".brand {}");
        tree.add_file("src/app/x/colors.custom.scss", ".colors {}");
        tree.add_file("src/app/shared/styles/custom/kept.custom.scss", ".kept {}");
        tree.add_file("src/app/x/plain.scss", ".plain {}");

        let (written, deleted) =
            relocate_overrides(&mut tree, &ProjectLayout::default(), &BTreeSet::new()).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(deleted.len(), 2);
        assert!(tree.exists(Path::new("src/app/shared/styles/custom/brand.custom.scss")));
        assert!(tree.exists(Path::new("src/app/shared/styles/custom/colors.custom.scss")));
        assert!(tree.exists(Path::new("src/app/shared/styles/custom/kept.custom.scss")));
        assert!(!tree.exists(Path::new("src/themes/_active/brand.custom.scss")));
        assert!(!tree.exists(Path::new("src/app/x/colors.custom.scss")));
        assert!(tree.exists(Path::new("src/app/x/plain.scss")));
    }

    #[test]
    fn test_relocate_overrides_twice_is_stable() {
        let mut tree = MemoryTree::new();
        tree.add_file("src/styles/brand.custom.scss", ".brand {}");
        let layout = ProjectLayout::default();

        relocate_overrides(&mut tree, &layout, &BTreeSet::new()).unwrap();
        let (written, deleted) = relocate_overrides(&mut tree, &layout, &BTreeSet::new()).unwrap();

        assert!(written.is_empty());
        assert!(deleted.is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_relocate_overrides_keeps_referenced_files() {
        let mut tree = MemoryTree::new();
        tree.add_file("src/app/a/brand.custom.scss", ".brand {}");
        tree.add_file("src/app/shared/styles/tone.custom.scss", ".tone {}");
        tree.add_file("src/styles/loose.custom.scss", ".loose {}");
        let referenced = BTreeSet::from([
            PathBuf::from("src/app/a/brand.custom.scss"),
            PathBuf::from("src/app/shared/styles/tone.custom.scss"),
        ]);

        let (written, deleted) =
            relocate_overrides(&mut tree, &ProjectLayout::default(), &referenced).unwrap();

        assert_eq!(
            written,
            vec![PathBuf::from("src/app/shared/styles/custom/loose.custom.scss")]
        );
        assert_eq!(deleted, vec![PathBuf::from("src/styles/loose.custom.scss")]);
        assert!(tree.exists(Path::new("src/app/a/brand.custom.scss")));
        assert!(tree.exists(Path::new("src/app/shared/styles/tone.custom.scss")));
    }
}
