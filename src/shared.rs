//! Shared-reference resolution by frequency over canonical paths

use crate::component::{canonical_path, ComponentDescriptor};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A themed file referenced more than once across all components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedReference {
    /// Path below the active theme, independent of how it was reached
    pub canonical_path: String,
    /// Every literal spelling that normalizes to `canonical_path`
    pub variants: BTreeSet<String>,
    /// Number of reference occurrences, not number of variants
    pub count: usize,
}

/// Result of [`resolve`]. Iteration order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedSet {
    refs: BTreeMap<String, SharedReference>,
}

impl SharedSet {
    /// True when `text` is one of the literal spellings of a shared reference
    pub fn contains_text(&self, text: &str) -> bool {
        self.refs.values().any(|r| r.variants.contains(text))
    }

    pub fn get(&self, canonical_path: &str) -> Option<&SharedReference> {
        self.refs.get(canonical_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedReference> {
        self.refs.values()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

impl Serialize for SharedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.refs.values())
    }
}

/// Groups every themed reference by canonical path and keeps groups seen
/// more than once.
///
/// Occurrences are counted across the flattened reference list without
/// de-duplicating per component, so one component listing the same themed
/// file twice makes it shared.
pub fn resolve(descriptors: &[ComponentDescriptor]) -> SharedSet {
    let mut groups: BTreeMap<String, SharedReference> = BTreeMap::new();

    for reference in descriptors.iter().flat_map(|d| d.all_refs()) {
        let Some(canonical) = canonical_path(&reference.text) else {
            continue;
        };
        let group = groups
            .entry(canonical.to_string())
            .or_insert_with(|| SharedReference {
                canonical_path: canonical.to_string(),
                variants: BTreeSet::new(),
                count: 0,
            });
        group.variants.insert(reference.text.clone());
        group.count += 1;
    }

    let refs: BTreeMap<_, _> = groups.into_iter().filter(|(_, r)| r.count > 1).collect();
    debug!(shared = refs.len(), "Resolved shared references");
    SharedSet { refs }
}
