//! Merge phases, in execution order

#[path = "01_preflight.rs"]
pub mod preflight;
#[path = "02_extract.rs"]
pub mod extract;
#[path = "03_resolve.rs"]
pub mod resolve;
#[path = "04_migrate_shared.rs"]
pub mod migrate_shared;
#[path = "05_migrate_private.rs"]
pub mod migrate_private;
#[path = "06_rewrite.rs"]
pub mod rewrite;
#[path = "07_relocate_index.rs"]
pub mod relocate_index;
#[path = "08_relocate_assets.rs"]
pub mod relocate_assets;
#[path = "09_relocate_overrides.rs"]
pub mod relocate_overrides;
#[path = "10_workspace.rs"]
pub mod workspace;
