//! Copies themed files to their new locations
//!
//! Shared files go once to the shared styles directory; private files are
//! hoisted next to the single component that uses them.

use crate::component::{canonical_path, ComponentDescriptor};
use crate::config::ProjectLayout;
use crate::error::TreeError;
use crate::fs::path::join;
use crate::fs::{upsert, FileTree};
use crate::shared::SharedSet;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A reference whose source file was not in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<PathBuf>,
    pub reference: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedReference>,
}

impl MigrationOutcome {
    pub fn merge(&mut self, other: MigrationOutcome) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
    }
}

/// Source and destination of a private reference.
///
/// The source is the reference resolved against the component's directory;
/// the destination drops the theme nesting and sits beside the component.
pub fn private_paths(descriptor: &ComponentDescriptor, text: &str) -> (PathBuf, PathBuf) {
    let component_dir = descriptor.component_dir();
    let (dir, file) = text.rsplit_once('/').unwrap_or(("", text));
    let from = join(join(&component_dir, dir), file);
    let to = join(&component_dir, file);
    (from, to)
}

/// Where each themed reference of `descriptors` points once migrated and
/// rewritten
pub fn destinations(
    descriptors: &[ComponentDescriptor],
    shared: &SharedSet,
    layout: &ProjectLayout,
) -> BTreeSet<PathBuf> {
    descriptors
        .iter()
        .flat_map(|descriptor| {
            descriptor.all_refs().iter().map(move |reference| {
                match canonical_path(&reference.text) {
                    Some(canonical) if shared.contains_text(&reference.text) => {
                        join(&layout.shared_styles, canonical)
                    }
                    _ => private_paths(descriptor, &reference.text).1,
                }
            })
        })
        .collect()
}

/// Copies each shared file from the active theme to the shared styles
/// directory, keeping its canonical path. Missing sources are skipped.
pub fn migrate_shared(
    tree: &mut dyn FileTree,
    shared: &SharedSet,
    layout: &ProjectLayout,
) -> Result<MigrationOutcome, TreeError> {
    let mut outcome = MigrationOutcome::default();

    for reference in shared.iter() {
        let from = join(&layout.active_theme, &reference.canonical_path);
        let Some(content) = tree.read(&from) else {
            warn!(source = %from.display(), "Shared reference has no source file, skipping");
            outcome.skipped.push(SkippedReference {
                component: None,
                reference: reference.canonical_path.clone(),
                source: from,
            });
            continue;
        };

        let to = join(&layout.shared_styles, &reference.canonical_path);
        upsert(tree, &to, content)?;
        debug!(from = %from.display(), to = %to.display(), "Migrated shared file");
        outcome.written.push(to);
    }

    Ok(outcome)
}

/// Hoists every non-shared themed reference next to its component.
/// Missing sources are skipped.
pub fn migrate_private(
    tree: &mut dyn FileTree,
    descriptors: &[ComponentDescriptor],
    shared: &SharedSet,
) -> Result<MigrationOutcome, TreeError> {
    let mut outcome = MigrationOutcome::default();

    for descriptor in descriptors {
        for reference in descriptor.all_refs() {
            if shared.contains_text(&reference.text) {
                continue;
            }

            let (from, to) = private_paths(descriptor, &reference.text);
            let Some(content) = tree.read(&from) else {
                warn!(
                    component = %descriptor.component_path().display(),
                    source = %from.display(),
                    "Referenced file not found, skipping"
                );
                outcome.skipped.push(SkippedReference {
                    component: Some(descriptor.component_path().to_path_buf()),
                    reference: reference.text.clone(),
                    source: from,
                });
                continue;
            };

            upsert(tree, &to, content)?;
            debug!(from = %from.display(), to = %to.display(), "Migrated private file");
            outcome.written.push(to);
        }
    }

    Ok(outcome)
}

/// Shared migration followed by private migration
pub fn migrate(
    tree: &mut dyn FileTree,
    descriptors: &[ComponentDescriptor],
    shared: &SharedSet,
    layout: &ProjectLayout,
) -> Result<MigrationOutcome, TreeError> {
    let mut outcome = migrate_shared(tree, shared, layout)?;
    outcome.merge(migrate_private(tree, descriptors, shared)?);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentReference;
    use crate::fs::MemoryTree;
    use crate::shared::resolve;
    use std::path::Path;

    fn descriptor(path: &str, styles: &[&str]) -> ComponentDescriptor {
        ComponentDescriptor::new(
            path,
            None,
            styles.iter().map(|s| ComponentReference::new(*s)).collect(),
        )
    }

    fn fixture() -> (MemoryTree, Vec<ComponentDescriptor>) {
        let mut tree = MemoryTree::new();
        tree.add_file("src/themes/_active/common.scss", ".common {}");
        tree.add_file("src/themes/_active/sub/only-mine.scss", ".mine {}");

        let descriptors = vec![
            descriptor(
                "src/app/a/a.ts",
                &[
                    "../../themes/_active/common.scss",
                    "../../themes/_active/sub/only-mine.scss",
                ],
            ),
            descriptor("src/app/b/c/c.ts", &["../../../themes/_active/common.scss"]),
        ];
        (tree, descriptors)
    }

    #[test]
    fn test_private_paths() {
        let d = descriptor("src/app/a/a.ts", &[]);
        let (from, to) = private_paths(&d, "../../themes/_active/sub/only-mine.scss");
        assert_eq!(from, PathBuf::from("src/themes/_active/sub/only-mine.scss"));
        assert_eq!(to, PathBuf::from("src/app/a/only-mine.scss"));
    }

    #[test]
    fn test_migrate_shared_and_private() {
        let (mut tree, descriptors) = fixture();
        let shared = resolve(&descriptors);

        let outcome = migrate(&mut tree, &descriptors, &shared, &ProjectLayout::default()).unwrap();

        assert_eq!(
            tree.read_to_string(Path::new("src/app/shared/styles/common.scss"))
                .as_deref(),
            Some(".common {}")
        );
        assert_eq!(
            tree.read_to_string(Path::new("src/app/a/only-mine.scss"))
                .as_deref(),
            Some(".mine {}")
        );
        assert!(!tree.exists(Path::new("src/app/a/common.scss")));
        assert!(!tree.exists(Path::new("src/app/b/c/common.scss")));
        assert_eq!(outcome.written.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_destinations() {
        let (_, descriptors) = fixture();
        let shared = resolve(&descriptors);

        let targets = destinations(&descriptors, &shared, &ProjectLayout::default());

        assert_eq!(
            targets,
            BTreeSet::from([
                PathBuf::from("src/app/a/only-mine.scss"),
                PathBuf::from("src/app/shared/styles/common.scss"),
            ])
        );
    }

    #[test]
    fn test_missing_sources_are_skipped() {
        let mut tree = MemoryTree::new();
        let descriptors = vec![
            descriptor("src/app/a/a.ts", &["../../themes/_active/gone.scss", "../../themes/_active/opt.scss"]),
            descriptor("src/app/b/b.ts", &["../../themes/_active/opt.scss"]),
        ];
        let shared = resolve(&descriptors);

        let outcome = migrate(&mut tree, &descriptors, &shared, &ProjectLayout::default()).unwrap();

        assert!(outcome.written.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
        assert!(outcome.skipped.iter().any(|s| s.component.is_none()));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_migration_is_idempotent() {
        let (mut once, descriptors) = fixture();
        let shared = resolve(&descriptors);
        let layout = ProjectLayout::default();

        migrate(&mut once, &descriptors, &shared, &layout).unwrap();
        let mut twice = once.clone();
        migrate(&mut twice, &descriptors, &shared, &layout).unwrap();

        let a: Vec<_> = once.files().collect();
        let b: Vec<_> = twice.files().collect();
        assert_eq!(a, b);
        assert_eq!(once.changes(), twice.changes());
    }

    #[test]
    fn test_binary_content_is_copied_unchanged() {
        let mut tree = MemoryTree::new();
        tree.add_bytes("src/themes/_active/img/bg.png", vec![0x89, 0x50, 0x4e, 0x47, 0xff]);
        let descriptors = vec![descriptor("src/app/a/a.ts", &["../../themes/_active/img/bg.png"])];

        migrate_private(&mut tree, &descriptors, &SharedSet::default()).unwrap();

        assert_eq!(
            tree.read(Path::new("src/app/a/bg.png")),
            Some(vec![0x89, 0x50, 0x4e, 0x47, 0xff])
        );
    }
}
