//! Component reference metadata recovered from decorator declarations

use crate::config::ACTIVE_THEME_MARKER;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A template or style path exactly as written in a component's source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReference {
    pub text: String,
    /// Byte offset of the string literal within the owning file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl ComponentReference {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: None,
        }
    }

    pub fn at(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position: Some(position),
        }
    }

    /// True when the text points into the active theme
    pub fn is_themed(&self) -> bool {
        canonical_path(&self.text).is_some()
    }

    /// Part of the text after the active theme marker
    pub fn canonical_path(&self) -> Option<&str> {
        canonical_path(&self.text)
    }

    /// Directory part of the text (`""` for a bare file name)
    pub fn dir(&self) -> &str {
        self.text.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    /// Final segment of the text
    pub fn file_name(&self) -> &str {
        self.text
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.text)
    }
}

/// Strips everything up to and including the first active theme marker.
///
/// The marker only counts at the start of the text or right after a `/`, so
/// `mythemes/_active/x.scss` is not themed. An empty remainder yields `None`.
pub fn canonical_path(text: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(offset) = text[from..].find(ACTIVE_THEME_MARKER) {
        let start = from + offset;
        if start == 0 || text.as_bytes()[start - 1] == b'/' {
            let rest = &text[start + ACTIVE_THEME_MARKER.len()..];
            return (!rest.is_empty()).then_some(rest);
        }
        from = start + 1;
    }
    None
}

/// Template/style references of one component file.
///
/// `all_refs` is the template reference followed by the style references,
/// restricted to references into the active theme. It drives every stage
/// after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    component_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_ref: Option<ComponentReference>,
    style_refs: Vec<ComponentReference>,
    all_refs: Vec<ComponentReference>,
}

impl ComponentDescriptor {
    pub fn new(
        component_path: impl Into<PathBuf>,
        template_ref: Option<ComponentReference>,
        style_refs: Vec<ComponentReference>,
    ) -> Self {
        let template_ref = template_ref.filter(ComponentReference::is_themed);
        let style_refs: Vec<_> = style_refs.into_iter().filter(|r| r.is_themed()).collect();
        let all_refs = template_ref
            .iter()
            .chain(style_refs.iter())
            .cloned()
            .collect();

        Self {
            component_path: component_path.into(),
            template_ref,
            style_refs,
            all_refs,
        }
    }

    pub fn component_path(&self) -> &Path {
        &self.component_path
    }

    /// Directory containing the component file
    pub fn component_dir(&self) -> PathBuf {
        crate::fs::path::parent_dir(&self.component_path)
    }

    pub fn template_ref(&self) -> Option<&ComponentReference> {
        self.template_ref.as_ref()
    }

    pub fn style_refs(&self) -> &[ComponentReference] {
        &self.style_refs
    }

    pub fn all_refs(&self) -> &[ComponentReference] {
        &self.all_refs
    }
}
