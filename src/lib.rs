//! theme-merge - merges an Angular project's active theme into its component tree
//!
//! Components of a themed project load their templates and stylesheets from
//! `src/themes/_active`. A merge moves each of those files next to the one
//! component that uses it, hoists files used by several components into
//! `src/app/shared/styles`, rewrites the component references accordingly and
//! relocates the rest of the theme (index files, global styles, assets, custom
//! overrides, `angular.json` entries).
//!
//! # Example Usage
//!
//! ```no_run
//! use theme_merge::{fs::disk, MergeConfig, PipelineOrchestrator};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new("client");
//! let mut tree = disk::load(root)?;
//! let report = PipelineOrchestrator::default().execute(&mut tree, &MergeConfig::default())?;
//! println!("{} components merged", report.components.len());
//! disk::commit(&tree, root)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: the virtual file tree every stage reads and writes
//! - [`component`]: component discovery and decorator metadata extraction
//! - [`shared`], [`migrate`], [`rewrite`], [`relocate`], [`workspace`]: merge stages
//! - [`pipeline`]: phase orchestration and the run report

pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod fs;
pub mod migrate;
pub mod pipeline;
pub mod progress;
pub mod relocate;
pub mod rewrite;
pub mod shared;
pub mod util;
pub mod workspace;

pub use component::{ComponentDescriptor, ComponentReference};
pub use config::{ConfigError, MergeConfig, ProjectLayout};
pub use error::{MergeError, TreeError};
pub use fs::{FileTree, MemoryTree};
pub use pipeline::{MergeReport, PipelineOrchestrator};
pub use shared::{SharedReference, SharedSet};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
