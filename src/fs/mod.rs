//! Virtual file tree abstraction

pub mod disk;
mod memory;
pub mod path;
mod r#trait;

pub use memory::{ChangeKind, FileChange, MemoryTree};
pub use r#trait::{upsert, DirEntry, FileTree, FileType};
