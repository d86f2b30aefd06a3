//! Command handlers. Each returns the process exit code.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::commands::{MergeArgs, ScanArgs};
use super::output::{OutputFormatter, RunMode, RunSummary};
use crate::config::MergeConfig;
use crate::fs::disk;
use crate::pipeline::PipelineOrchestrator;
use crate::progress::{LoggingHandler, ProgressHandler};

fn resolve_project(path: Option<&PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    if !path.is_dir() {
        anyhow::bail!("Project path is not a directory: {}", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize project path {}", path.display()))
}

fn orchestrator(quiet: bool) -> PipelineOrchestrator {
    let handler: Option<Arc<dyn ProgressHandler>> = if quiet {
        None
    } else {
        Some(Arc::new(LoggingHandler))
    };
    PipelineOrchestrator::new(handler)
}

fn print_summary(summary: &RunSummary<'_>, formatter: &OutputFormatter) -> Result<()> {
    let output = formatter.format(summary)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn report_failure(e: &anyhow::Error) -> i32 {
    error!("{:#}", e);
    eprintln!("Something went wrong: {:#}", e);
    1
}

pub fn handle_merge(args: &MergeArgs, quiet: bool) -> i32 {
    match run_merge(args, quiet) {
        Ok(()) => 0,
        Err(e) => report_failure(&e),
    }
}

fn run_merge(args: &MergeArgs, quiet: bool) -> Result<()> {
    let project = resolve_project(args.project_path.as_ref())?;
    debug!(project = %project.display(), "Resolved project path");

    let mut config = MergeConfig::from_env().context("Invalid configuration")?;
    if args.skip_workspace {
        config = config.with_workspace_update(false);
    }
    if args.skip_bulk {
        config = config.with_bulk_relocation(false);
    }
    debug!("{}", config);

    let mut tree = load_project(&project)?;
    let report = orchestrator(quiet).execute(&mut tree, &config)?;

    let (mode, changes) = if args.dry_run {
        info!("Dry run, leaving the project untouched");
        (RunMode::DryRun, tree.changes())
    } else {
        let applied = disk::commit(&tree, &project)
            .with_context(|| format!("Failed to write changes to {}", project.display()))?;
        info!(files = applied.len(), "Wrote changes to disk");
        (RunMode::Merge, applied)
    };

    let summary = RunSummary {
        mode,
        project,
        report: &report,
        changes: &changes,
    };
    print_summary(&summary, &OutputFormatter::new(args.format.into()))
}

pub fn handle_scan(args: &ScanArgs, quiet: bool) -> i32 {
    match run_scan(args, quiet) {
        Ok(()) => 0,
        Err(e) => report_failure(&e),
    }
}

fn run_scan(args: &ScanArgs, quiet: bool) -> Result<()> {
    let project = resolve_project(args.project_path.as_ref())?;
    let config = MergeConfig::from_env().context("Invalid configuration")?;

    let mut tree = load_project(&project)?;
    let report = orchestrator(quiet).scan(&mut tree, &config)?;

    let summary = RunSummary {
        mode: RunMode::Scan,
        project,
        report: &report,
        changes: &[],
    };
    print_summary(&summary, &OutputFormatter::new(args.format.into()))
}

fn load_project(project: &Path) -> Result<crate::fs::MemoryTree> {
    disk::load(project).with_context(|| format!("Failed to load project {}", project.display()))
}
