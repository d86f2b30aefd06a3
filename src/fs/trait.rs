//! FileTree trait definition

use crate::error::TreeError;
use std::path::{Path, PathBuf};

/// Type of tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Addressable mapping from project-relative path to content.
///
/// Every pipeline stage reads and writes through this trait; nothing in the
/// pipeline touches the operating system's file system.
pub trait FileTree {
    /// Check if a file exists at path
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory (has at least one file below it)
    fn is_dir(&self, path: &Path) -> bool;

    /// Read raw file content
    fn read(&self, path: &Path) -> Option<Vec<u8>>;

    /// Create a file. Fails if the path already exists.
    fn create(&mut self, path: &Path, content: Vec<u8>) -> Result<(), TreeError>;

    /// Replace a file's content. Fails if the path does not exist.
    fn overwrite(&mut self, path: &Path, content: Vec<u8>) -> Result<(), TreeError>;

    /// Remove a file. Fails if the path does not exist.
    fn delete(&mut self, path: &Path) -> Result<(), TreeError>;

    /// List the direct children of a directory
    fn read_dir(&self, path: &Path) -> Vec<DirEntry>;

    /// Read file content as UTF-8; binary or missing content is absent
    fn read_to_string(&self, path: &Path) -> Option<String> {
        self.read(path).and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// All files below a directory, depth-first, in listing order
    fn visit(&self, path: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let mut entries = self.read_dir(path);
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        for entry in entries {
            match entry.file_type {
                FileType::File => files.push(entry.path),
                FileType::Directory => files.extend(self.visit(&entry.path)),
            }
        }
        files
    }
}

/// Writes content, creating the file or overwriting it depending on whether
/// it already exists.
pub fn upsert(tree: &mut dyn FileTree, path: &Path, content: Vec<u8>) -> Result<(), TreeError> {
    if tree.exists(path) {
        tree.overwrite(path, content)
    } else {
        tree.create(path, content)
    }
}
