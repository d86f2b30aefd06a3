//! Rewrites themed template/style references inside component sources
//!
//! The rewrite is textual: string literals pointing into the active theme are
//! replaced by pattern. Everything pattern-specific stays behind
//! [`RewriteRules::apply`].

use crate::component::ComponentDescriptor;
use crate::config::ProjectLayout;
use crate::error::TreeError;
use crate::fs::path::relative;
use crate::fs::{upsert, FileTree};
use crate::shared::SharedSet;
use regex::Regex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Leading `./`, `../` and `/` segments before the theme marker
const THEME_PREFIX: &str = r#"(?P<q>['"])(?:\.*/)*themes/_active/"#;

fn private_rule() -> &'static RewriteRule {
    static RULE: OnceLock<RewriteRule> = OnceLock::new();
    RULE.get_or_init(|| RewriteRule {
        pattern: Regex::new(&format!(
            r#"{}(?:[^'"\n]*/)?(?P<file>[^/'"\n]+)['"]"#,
            THEME_PREFIX
        ))
        .expect("valid regex"),
        replacement: "${q}./${file}${q}".to_string(),
    })
}

fn escape_replacement(text: &str) -> String {
    text.replace('$', "$$")
}

/// One pattern substitution applied to every match
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Points a quoted reference to `canonical_path` below the active theme at
    /// `relative_dir/canonical_path`.
    pub fn shared(canonical_path: &str, relative_dir: &str) -> Self {
        let pattern = format!(
            r#"{}{}['"]"#,
            THEME_PREFIX,
            regex::escape(canonical_path)
        );
        Self {
            pattern: Regex::new(&pattern).expect("valid regex"),
            replacement: format!(
                "${{q}}{}/{}${{q}}",
                escape_replacement(relative_dir),
                escape_replacement(canonical_path)
            ),
        }
    }

    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// Ordered rules for one component: every shared rule, then the catch-all
/// private rule that turns any remaining themed reference into `./<file>`.
#[derive(Debug, Clone)]
pub struct RewriteRules {
    rules: Vec<RewriteRule>,
}

impl RewriteRules {
    pub fn for_component(component_dir: &Path, shared: &SharedSet, layout: &ProjectLayout) -> Self {
        let relative_dir = shared_dir_from(component_dir, layout);
        let mut rules: Vec<RewriteRule> = shared
            .iter()
            .map(|reference| RewriteRule::shared(&reference.canonical_path, &relative_dir))
            .collect();
        rules.push(private_rule().clone());
        Self { rules }
    }

    /// Applies every rule in order to the source text
    pub fn apply(&self, source: &str) -> String {
        self.rules
            .iter()
            .fold(source.to_string(), |text, rule| rule.apply(&text).into_owned())
    }
}

/// Relative path from a component directory to the shared styles directory,
/// always starting with `./` or `../`.
pub fn shared_dir_from(component_dir: &Path, layout: &ProjectLayout) -> String {
    let rel = relative(component_dir, &layout.shared_styles);
    if rel.is_empty() {
        ".".to_string()
    } else if rel.starts_with("..") {
        rel
    } else {
        format!("./{}", rel)
    }
}

/// Rewrites each component's themed references and writes back the files
/// whose content changed. Unreadable components are skipped.
pub fn rewrite(
    tree: &mut dyn FileTree,
    descriptors: &[ComponentDescriptor],
    shared: &SharedSet,
    layout: &ProjectLayout,
) -> Result<Vec<PathBuf>, TreeError> {
    let mut rewritten = Vec::new();

    for descriptor in descriptors {
        let path = descriptor.component_path();
        let Some(content) = tree.read_to_string(path) else {
            warn!(component = %path.display(), "Component source unreadable, skipping rewrite");
            continue;
        };

        let rules = RewriteRules::for_component(&descriptor.component_dir(), shared, layout);
        let updated = rules.apply(&content);
        if updated == content {
            continue;
        }

        upsert(tree, path, updated.into_bytes())?;
        debug!(component = %path.display(), "Rewrote theme references");
        rewritten.push(path.to_path_buf());
    }

    Ok(rewritten)
}
