use super::path::normalize;
use super::{DirEntry, FileTree, FileType};
use crate::error::TreeError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Kind of change a path went through since the tree was seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// In-memory staged file tree.
///
/// Files seeded with `add_file`/`add_bytes` form the baseline. Mutations made
/// through [`FileTree`] are tracked so they can be listed or committed later.
/// Directories are implicit: a directory exists while a file lives below it.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    baseline: BTreeSet<PathBuf>,
    touched: BTreeSet<PathBuf>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a text file without recording a change
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: &str) {
        self.add_bytes(path, content.as_bytes().to_vec());
    }

    /// Seeds a file without recording a change
    pub fn add_bytes(&mut self, path: impl AsRef<Path>, content: Vec<u8>) {
        let path = normalize(path);
        self.baseline.insert(path.clone());
        self.files.insert(path, content);
    }

    /// Number of files currently in the tree
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over all files and their content in path order
    pub fn files(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_slice()))
    }

    /// Net changes relative to the seeded baseline, in path order
    pub fn changes(&self) -> Vec<FileChange> {
        self.touched
            .iter()
            .filter_map(|path| {
                let present = self.files.contains_key(path);
                let existed = self.baseline.contains(path);
                let kind = match (present, existed) {
                    (true, false) => ChangeKind::Created,
                    (true, true) => ChangeKind::Modified,
                    (false, true) => ChangeKind::Deleted,
                    (false, false) => return None,
                };
                Some(FileChange {
                    path: path.clone(),
                    kind,
                })
            })
            .collect()
    }

    /// Makes the current state the new baseline and forgets tracked changes
    pub fn mark_clean(&mut self) {
        self.baseline = self.files.keys().cloned().collect();
        self.touched.clear();
    }
}

impl FileTree for MemoryTree {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.files
            .keys()
            .any(|file| file != &path && file.starts_with(&path))
    }

    fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.get(&normalize(path)).cloned()
    }

    fn create(&mut self, path: &Path, content: Vec<u8>) -> Result<(), TreeError> {
        let path = normalize(path);
        if self.files.contains_key(&path) {
            return Err(TreeError::AlreadyExists(path));
        }
        self.touched.insert(path.clone());
        self.files.insert(path, content);
        Ok(())
    }

    fn overwrite(&mut self, path: &Path, content: Vec<u8>) -> Result<(), TreeError> {
        let path = normalize(path);
        let current = self
            .files
            .get_mut(&path)
            .ok_or_else(|| TreeError::NotFound(path.clone()))?;
        if *current != content {
            *current = content;
            self.touched.insert(path);
        }
        Ok(())
    }

    fn delete(&mut self, path: &Path) -> Result<(), TreeError> {
        let path = normalize(path);
        if self.files.remove(&path).is_none() {
            return Err(TreeError::NotFound(path));
        }
        self.touched.insert(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Vec<DirEntry> {
        let dir = normalize(path);
        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();

        for file in self.files.keys() {
            let Ok(rest) = file.strip_prefix(&dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().to_string();
            if !seen.insert(name.clone()) {
                continue;
            }
            let file_type = if components.next().is_some() {
                FileType::Directory
            } else {
                FileType::File
            };
            entries.push(DirEntry {
                path: dir.join(&name),
                name,
                file_type,
            });
        }

        entries
    }
}
