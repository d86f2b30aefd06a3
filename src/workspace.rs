//! Workspace configuration (`angular.json`) updater
//!
//! The document is kept as a `serde_json::Value` so that unknown fields and
//! key order survive the round trip. Only the option records the theme merge
//! touches are read into typed structs, mutated, and written back in place.

use crate::config::{MergeConfig, ProjectLayout, CUSTOM_OVERRIDE_SUFFIX};
use crate::error::MergeError;
use crate::fs::path::{is_stylesheet, join, to_slash};
use crate::fs::{upsert, FileTree};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Project sections that hold build targets, in lookup order
const TARGET_SECTIONS: &[&str] = &["architect", "targets"];
/// Targets whose options carry theme paths
const UPDATED_TARGETS: &[&str] = &["build", "test"];

/// A path-valued list entry: a bare path, an object carrying an `input`
/// path, or anything else (left untouched).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathEntry {
    Path(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl PathEntry {
    pub fn input(&self) -> Option<&str> {
        match self {
            PathEntry::Path(path) => Some(path),
            PathEntry::Object(object) => object.get("input").and_then(Value::as_str),
            PathEntry::Other(_) => None,
        }
    }

    fn relocated(self, relocator: &PathRelocator) -> Self {
        match self {
            PathEntry::Path(path) => PathEntry::Path(relocator.relocate(&path)),
            PathEntry::Object(mut object) => {
                if let Some(input) = object.get("input").and_then(Value::as_str) {
                    let relocated = relocator.relocate(input);
                    object.insert("input".to_string(), Value::String(relocated));
                }
                PathEntry::Object(object)
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreprocessorOptions {
    #[serde(default)]
    pub include_paths: Option<Vec<String>>,
}

/// The fields of a target's `options` record that reference theme paths
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOptions {
    #[serde(default)]
    pub index: Option<PathEntry>,
    #[serde(default)]
    pub styles: Option<Vec<PathEntry>>,
    #[serde(default)]
    pub assets: Option<Vec<PathEntry>>,
    #[serde(default)]
    pub style_preprocessor_options: Option<StylePreprocessorOptions>,
}

impl TargetOptions {
    /// Relocates every path, drops the active theme from the include paths
    /// and removes duplicate list entries.
    pub fn relocate(&mut self, relocator: &PathRelocator) {
        if let Some(index) = self.index.take() {
            self.index = Some(index.relocated(relocator));
        }
        for list in [&mut self.styles, &mut self.assets].into_iter().flatten() {
            let entries = std::mem::take(list);
            *list = dedup(entries.into_iter().map(|e| e.relocated(relocator)));
        }
        if let Some(include_paths) = self
            .style_preprocessor_options
            .as_mut()
            .and_then(|o| o.include_paths.as_mut())
        {
            include_paths.retain(|p| !relocator.is_active_theme(p));
        }
    }

    /// Writes the known fields back into the raw options object, keeping
    /// their original positions.
    fn write_into(self, options: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
        if let Some(index) = self.index {
            options.insert("index".to_string(), serde_json::to_value(index)?);
        }
        if let Some(styles) = self.styles {
            options.insert("styles".to_string(), serde_json::to_value(styles)?);
        }
        if let Some(assets) = self.assets {
            options.insert("assets".to_string(), serde_json::to_value(assets)?);
        }
        let include_paths = self
            .style_preprocessor_options
            .and_then(|o| o.include_paths);
        if let (Some(include_paths), Some(Value::Object(preprocessor))) =
            (include_paths, options.get_mut("stylePreprocessorOptions"))
        {
            preprocessor.insert("includePaths".to_string(), serde_json::to_value(include_paths)?);
        }
        Ok(())
    }
}

fn dedup(entries: impl Iterator<Item = PathEntry>) -> Vec<PathEntry> {
    let mut unique: Vec<PathEntry> = Vec::new();
    for entry in entries {
        if !unique.contains(&entry) {
            unique.push(entry);
        }
    }
    unique
}

/// Maps paths below the active theme to their post-merge locations
#[derive(Debug, Clone)]
pub struct PathRelocator {
    src_root: String,
    active_theme: String,
    active_theme_assets: String,
    assets: String,
    global_styles: String,
    custom_overrides: String,
    moves_overrides: bool,
}

impl PathRelocator {
    pub fn new(layout: &ProjectLayout) -> Self {
        Self {
            src_root: to_slash(&layout.src_root),
            active_theme: layout.active_theme_slash(),
            active_theme_assets: to_slash(&layout.active_theme_assets),
            assets: to_slash(&layout.assets),
            global_styles: to_slash(&layout.global_styles),
            custom_overrides: to_slash(&layout.custom_overrides),
            moves_overrides: true,
        }
    }

    /// Whether custom overrides below the source root end up in the custom
    /// overrides directory, as they do when bulk relocation runs.
    pub fn with_override_moves(mut self, enabled: bool) -> Self {
        self.moves_overrides = enabled;
        self
    }

    fn relocate_override(&self, path: &str) -> Option<String> {
        if !self.moves_overrides || !path.ends_with(CUSTOM_OVERRIDE_SUFFIX) {
            return None;
        }
        if !path.starts_with(&format!("{}/", self.src_root))
            || path.starts_with(&format!("{}/", self.custom_overrides))
        {
            return None;
        }
        let name = path.rsplit('/').next()?;
        Some(format!("{}/{}", self.custom_overrides, name))
    }

    /// True for the active theme directory itself, with or without a
    /// trailing `/`.
    pub fn is_active_theme(&self, path: &str) -> bool {
        path.trim_end_matches('/') == self.active_theme
    }

    pub fn relocate(&self, path: &str) -> String {
        if let Some(moved) = self.relocate_override(path) {
            return moved;
        }
        if let Some(rest) = path.strip_prefix(&self.active_theme_assets) {
            if rest.is_empty() || rest.starts_with('/') {
                return format!("{}{}", self.assets, rest);
            }
        }

        let theme_dir = format!("{}/", self.active_theme);
        let Some(rest) = path.strip_prefix(&theme_dir) else {
            return path.to_string();
        };
        if rest.is_empty() {
            return path.to_string();
        }
        if !rest.contains('/') && is_stylesheet(rest) {
            return format!("{}/{}", self.global_styles, rest);
        }
        to_slash(join(&self.src_root, rest))
    }
}

/// Fails when the workspace configuration is absent from the tree
pub fn preflight(tree: &dyn FileTree, config: &MergeConfig) -> Result<(), MergeError> {
    if !tree.exists(&config.workspace_config) {
        return Err(MergeError::MissingWorkspaceConfig(
            config.workspace_config.clone(),
        ));
    }
    Ok(())
}

fn project_targets(project: &mut Value) -> Option<&mut Map<String, Value>> {
    let project = project.as_object_mut()?;
    let section = TARGET_SECTIONS
        .iter()
        .find(|section| project.get(**section).is_some_and(Value::is_object))?;
    project.get_mut(*section)?.as_object_mut()
}

/// Updates the build and test options of every project in the document.
/// Returns whether anything changed.
pub fn update_document(document: &mut Value, relocator: &PathRelocator) -> bool {
    let before = document.clone();

    let Some(projects) = document.get_mut("projects").and_then(Value::as_object_mut) else {
        warn!("Workspace configuration declares no projects");
        return false;
    };

    for (name, project) in projects.iter_mut() {
        let Some(targets) = project_targets(project) else {
            debug!(project = %name, "Project has no build targets");
            continue;
        };

        for target_name in UPDATED_TARGETS {
            let Some(options) = targets
                .get_mut(*target_name)
                .and_then(|t| t.get_mut("options"))
                .and_then(Value::as_object_mut)
            else {
                continue;
            };

            let mut typed: TargetOptions =
                match serde_json::from_value(Value::Object(options.clone())) {
                    Ok(typed) => typed,
                    Err(e) => {
                        warn!(project = %name, build_target = %target_name, error = %e, "Unexpected target options shape, leaving untouched");
                        continue;
                    }
                };
            typed.relocate(relocator);
            if let Err(e) = typed.write_into(options) {
                warn!(project = %name, build_target = %target_name, error = %e, "Failed to write target options");
            }
        }
    }

    *document != before
}

/// Rewrites the workspace configuration for the merged layout.
///
/// A missing file is fatal, as is content that is not valid JSON. The file
/// is only written when the document changed. Returns whether it was.
pub fn update_workspace_config(
    tree: &mut dyn FileTree,
    config: &MergeConfig,
    layout: &ProjectLayout,
) -> Result<bool, MergeError> {
    let path = &config.workspace_config;
    let content = tree
        .read(path)
        .ok_or_else(|| MergeError::MissingWorkspaceConfig(path.clone()))?;

    let invalid = |source| MergeError::InvalidWorkspaceConfig {
        path: path.clone(),
        source,
    };
    let mut document: Value = serde_json::from_slice(&content).map_err(invalid)?;

    if !update_document(&mut document, &PathRelocator::new(layout).with_override_moves(config.relocate_bulk)) {
        info!(path = %path.display(), "Workspace configuration already up to date");
        return Ok(false);
    }

    let mut output = serde_json::to_string_pretty(&document).map_err(invalid)?;
    output.push('\n');
    upsert(tree, path, output.into_bytes())?;
    info!(path = %path.display(), "Updated workspace configuration");
    Ok(true)
}
