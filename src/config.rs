use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::fs::path::{join, to_slash};

const DEFAULT_SRC_ROOT: &str = "src";
const DEFAULT_WORKSPACE_CONFIG: &str = "angular.json";

/// Theme directory whose files are migration candidates, relative to the source root
pub const ACTIVE_THEME_PATH: &str = "themes/_active";
/// Marker searched for inside reference text
pub const ACTIVE_THEME_MARKER: &str = "themes/_active/";
pub const APP_DIR: &str = "app";
/// Shared styles destination, relative to the source root
pub const SHARED_STYLES_PATH: &str = "app/shared/styles";
pub const CUSTOM_OVERRIDES_DIR: &str = "custom";
pub const CUSTOM_OVERRIDE_SUFFIX: &str = ".custom.scss";
pub const GLOBAL_STYLES_DIR: &str = "styles";
pub const ASSETS_DIR: &str = "assets";
pub const SOURCE_EXTENSION: &str = ".ts";
pub const TEST_SUFFIX: &str = ".spec.ts";
pub const DECLARATION_SUFFIX: &str = ".d.ts";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Run configuration for a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Project source root, relative to the project root
    pub src_root: PathBuf,
    /// Workspace configuration file, relative to the project root
    pub workspace_config: PathBuf,
    /// Run the index/asset/override relocators
    pub relocate_bulk: bool,
    /// Rewrite the workspace configuration (its absence is then fatal)
    pub update_workspace_config: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            src_root: PathBuf::from(DEFAULT_SRC_ROOT),
            workspace_config: PathBuf::from(DEFAULT_WORKSPACE_CONFIG),
            relocate_bulk: true,
            update_workspace_config: true,
        }
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|e| ConfigError::ParseError {
        field: field.to_string(),
        error: e.to_string(),
    })
}

impl MergeConfig {
    /// Builds a configuration from defaults overridden by environment variables:
    ///
    /// - `THEME_MERGE_SRC_ROOT`
    /// - `THEME_MERGE_WORKSPACE_CONFIG`
    /// - `THEME_MERGE_SKIP_BULK` (true/false)
    /// - `THEME_MERGE_SKIP_WORKSPACE` (true/false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(src_root) = env::var("THEME_MERGE_SRC_ROOT") {
            config.src_root = PathBuf::from(src_root);
        }
        if let Ok(workspace_config) = env::var("THEME_MERGE_WORKSPACE_CONFIG") {
            config.workspace_config = PathBuf::from(workspace_config);
        }
        if let Ok(skip) = env::var("THEME_MERGE_SKIP_BULK") {
            config.relocate_bulk = !parse_bool("THEME_MERGE_SKIP_BULK", &skip)?;
        }
        if let Ok(skip) = env::var("THEME_MERGE_SKIP_WORKSPACE") {
            config.update_workspace_config = !parse_bool("THEME_MERGE_SKIP_WORKSPACE", &skip)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_src_root(mut self, src_root: impl Into<PathBuf>) -> Self {
        self.src_root = src_root.into();
        self
    }

    pub fn with_workspace_config(mut self, workspace_config: impl Into<PathBuf>) -> Self {
        self.workspace_config = workspace_config.into();
        self
    }

    pub fn with_bulk_relocation(mut self, enabled: bool) -> Self {
        self.relocate_bulk = enabled;
        self
    }

    pub fn with_workspace_update(mut self, enabled: bool) -> Self {
        self.update_workspace_config = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_relative("src_root", &self.src_root)?;
        validate_relative("workspace_config", &self.workspace_config)?;
        Ok(())
    }

    /// Canonical locations derived from this configuration
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(&self.src_root)
    }
}

fn validate_relative(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must not be empty",
            field
        )));
    }
    if path.is_absolute() || path.has_root() {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must be relative to the project root: {}",
            field,
            path.display()
        )));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must not leave the project root: {}",
            field,
            path.display()
        )));
    }
    Ok(())
}

impl fmt::Display for MergeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Merge Configuration:")?;
        writeln!(f, "  Source root: {}", self.src_root.display())?;
        writeln!(f, "  Workspace config: {}", self.workspace_config.display())?;
        writeln!(f, "  Bulk relocation: {}", self.relocate_bulk)?;
        write!(f, "  Workspace update: {}", self.update_workspace_config)
    }
}

/// Tree locations the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub src_root: PathBuf,
    pub app_dir: PathBuf,
    pub active_theme: PathBuf,
    pub active_theme_assets: PathBuf,
    pub shared_styles: PathBuf,
    pub custom_overrides: PathBuf,
    pub global_styles: PathBuf,
    pub assets: PathBuf,
}

impl ProjectLayout {
    pub fn new(src_root: &Path) -> Self {
        let src_root = crate::fs::path::normalize(src_root);
        let active_theme = join(&src_root, ACTIVE_THEME_PATH);
        let shared_styles = join(&src_root, SHARED_STYLES_PATH);
        Self {
            app_dir: join(&src_root, APP_DIR),
            active_theme_assets: join(&active_theme, ASSETS_DIR),
            custom_overrides: join(&shared_styles, CUSTOM_OVERRIDES_DIR),
            global_styles: join(&src_root, GLOBAL_STYLES_DIR),
            assets: join(&src_root, ASSETS_DIR),
            active_theme,
            shared_styles,
            src_root,
        }
    }

    /// Active theme location as written in workspace configuration
    pub fn active_theme_slash(&self) -> String {
        to_slash(&self.active_theme)
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new(Path::new(DEFAULT_SRC_ROOT))
    }
}
