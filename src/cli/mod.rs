pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, MergeArgs, ScanArgs};
pub use output::{OutputFormat, OutputFormatter, RunMode, RunSummary};
