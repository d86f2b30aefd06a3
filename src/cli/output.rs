//! Output formatting for merge and scan results
//!
//! JSON and YAML serialize the same [`RunSummary`] document; the human format
//! is a condensed tree-style listing.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::fs::{ChangeKind, FileChange};
use crate::pipeline::MergeReport;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    Merge,
    DryRun,
    Scan,
}

/// Everything printed for one run
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub mode: RunMode,
    pub project: PathBuf,
    pub report: &'a MergeReport,
    /// Net file changes against the project on disk
    pub changes: &'a [FileChange],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, summary: &RunSummary<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary)
                .context("Failed to serialize merge report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize merge report to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(summary)),
        }
    }

    fn format_human(&self, summary: &RunSummary<'_>) -> String {
        let report = summary.report;
        let mut output = String::new();

        let title = match summary.mode {
            RunMode::Merge => "\u{2713} Theme Merge",
            RunMode::DryRun => "Theme Merge (dry run, nothing written)",
            RunMode::Scan => "Theme Scan",
        };
        let _ = writeln!(output, "{}", title);
        let _ = writeln!(output, "{}\n", RULE);
        let _ = writeln!(output, "Project:     {}", summary.project.display());
        let _ = writeln!(output, "Components:  {}", report.components.len());
        let _ = writeln!(output, "Shared:      {}\n", report.shared.len());

        if !report.components.is_empty() {
            output.push_str("Themed Components:\n");
            push_tree(
                &mut output,
                report.components.iter().map(|c| {
                    format!(
                        "{} ({} refs)",
                        c.component_path().display(),
                        c.all_refs().len()
                    )
                }),
            );
        }

        if !report.shared.is_empty() {
            output.push_str("Shared References:\n");
            push_tree(
                &mut output,
                report
                    .shared
                    .iter()
                    .map(|r| format!("{} (used {} times)", r.canonical_path, r.count)),
            );
        }

        if summary.mode != RunMode::Scan {
            if summary.changes.is_empty() {
                output.push_str("No files changed\n");
            } else {
                output.push_str("File Changes:\n");
                push_tree(
                    &mut output,
                    summary.changes.iter().map(|c| {
                        let marker = match c.kind {
                            ChangeKind::Created => "+",
                            ChangeKind::Modified => "~",
                            ChangeKind::Deleted => "-",
                        };
                        format!("{} {}", marker, c.path.display())
                    }),
                );
            }
            let _ = writeln!(
                output,
                "Workspace configuration: {}",
                if report.workspace_updated {
                    "updated"
                } else {
                    "unchanged"
                }
            );
        }

        if !report.skipped.is_empty() {
            output.push_str("\n\u{26A0} Skipped References:\n");
            for skipped in &report.skipped {
                match &skipped.component {
                    Some(component) => {
                        let _ = writeln!(
                            output,
                            "  - {} in {} (missing {})",
                            skipped.reference,
                            component.display(),
                            skipped.source.display()
                        );
                    }
                    None => {
                        let _ = writeln!(
                            output,
                            "  - {} (missing {})",
                            skipped.reference,
                            skipped.source.display()
                        );
                    }
                }
            }
        }

        output
    }
}

fn push_tree(output: &mut String, lines: impl Iterator<Item = String>) {
    let lines: Vec<String> = lines.collect();
    let total = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let connector = if i + 1 == total { "\u{2514}" } else { "\u{251C}" };
        let _ = writeln!(output, "{}\u{2500} {}", connector, line);
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentDescriptor, ComponentReference};
    use crate::migrate::SkippedReference;

    fn report() -> MergeReport {
        MergeReport {
            components: vec![ComponentDescriptor::new(
                "src/app/a/a.component.ts",
                Some(ComponentReference::new("../../themes/_active/a/a.component.html")),
                vec![],
            )],
            written: vec![PathBuf::from("src/app/a/a.component.html")],
            rewritten: vec![PathBuf::from("src/app/a/a.component.ts")],
            skipped: vec![SkippedReference {
                component: Some(PathBuf::from("src/app/a/a.component.ts")),
                reference: "../../themes/_active/gone.scss".to_string(),
                source: PathBuf::from("src/themes/_active/gone.scss"),
            }],
            workspace_updated: true,
            ..Default::default()
        }
    }

    fn changes() -> Vec<FileChange> {
        vec![
            FileChange {
                path: PathBuf::from("src/app/a/a.component.html"),
                kind: ChangeKind::Created,
            },
            FileChange {
                path: PathBuf::from("src/app/a/a.component.ts"),
                kind: ChangeKind::Modified,
            },
        ]
    }

    #[test]
    fn test_json_output() {
        let report = report();
        let changes = changes();
        let summary = RunSummary {
            mode: RunMode::DryRun,
            project: PathBuf::from("/work/client"),
            report: &report,
            changes: &changes,
        };

        let output = OutputFormatter::new(OutputFormat::Json)
            .format(&summary)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["mode"], "dry-run");
        assert_eq!(json["changes"][0]["kind"], "created");
        assert_eq!(json["report"]["workspace_updated"], true);
        assert_eq!(
            json["report"]["components"][0]["component_path"],
            "src/app/a/a.component.ts"
        );
    }

    #[test]
    fn test_yaml_output() {
        let report = report();
        let summary = RunSummary {
            mode: RunMode::Scan,
            project: PathBuf::from("."),
            report: &report,
            changes: &[],
        };

        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format(&summary)
            .unwrap();
        assert!(output.contains("mode: scan"));
        assert!(output.contains("component_path: src/app/a/a.component.ts"));
    }

    #[test]
    fn test_human_output() {
        let report = report();
        let changes = changes();
        let summary = RunSummary {
            mode: RunMode::Merge,
            project: PathBuf::from("/work/client"),
            report: &report,
            changes: &changes,
        };

        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&summary)
            .unwrap();
        assert!(output.contains("Theme Merge"));
        assert!(output.contains("Components:  1"));
        assert!(output.contains("+ src/app/a/a.component.html"));
        assert!(output.contains("~ src/app/a/a.component.ts"));
        assert!(output.contains("Workspace configuration: updated"));
        assert!(output.contains("Skipped References"));
    }

    #[test]
    fn test_human_scan_omits_changes() {
        let report = MergeReport::default();
        let summary = RunSummary {
            mode: RunMode::Scan,
            project: PathBuf::from("."),
            report: &report,
            changes: &[],
        };

        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&summary)
            .unwrap();
        assert!(output.contains("Theme Scan"));
        assert!(!output.contains("No files changed"));
    }

    #[test]
    fn test_human_title_rule() {
        let report = MergeReport::default();
        let summary = RunSummary {
            mode: RunMode::Scan,
            project: PathBuf::from("."),
            report: &report,
            changes: &[],
        };

        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&summary)
            .unwrap();
        let rule = output.lines().nth(1).unwrap();
        assert_eq!(rule, "━".repeat(40));
    }
}
