use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Merges the active theme of an Angular project into its component tree
#[derive(Parser, Debug)]
#[command(
    name = "theme-merge",
    about = "Merge the active theme into the component tree of an Angular project",
    version,
    long_about = "theme-merge moves every template and stylesheet that components load from \
                  src/themes/_active next to the components themselves, hoists files used by \
                  several components into src/app/shared/styles, rewrites the component \
                  references and updates angular.json."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Merge the active theme into the project",
        long_about = "Runs the full merge and writes the result back to disk.\n\n\
                      Examples:\n  \
                      theme-merge merge\n  \
                      theme-merge merge /path/to/project --dry-run\n  \
                      theme-merge merge --skip-workspace --format json"
    )]
    Merge(MergeArgs),

    #[command(
        about = "List themed components and shared references without writing",
        long_about = "Reports which components reference the active theme and which themed \
                      files are shared.\n\n\
                      Examples:\n  \
                      theme-merge scan\n  \
                      theme-merge scan /path/to/project --format yaml"
    )]
    Scan(ScanArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MergeArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project root (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(long, help = "Compute the merge without writing to disk")]
    pub dry_run: bool,

    #[arg(long, help = "Leave angular.json untouched")]
    pub skip_workspace: bool,

    #[arg(long, help = "Skip index, asset and custom override relocation")]
    pub skip_bulk: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project root (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
