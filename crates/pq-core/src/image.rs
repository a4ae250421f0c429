use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Accumulator for every image referenced during a compile run.
///
/// Entity compilers register names as they encounter image-valued fields;
/// the resolver pass later fills in URLs via one batched lookup. Keys are
/// canonical (spaces replaced with underscores) so registration and
/// resolution agree on spelling. Unresolved entries stay in the map as
/// `None` — consumers may want to distinguish "no image" from "image not
/// found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRefs {
    refs: BTreeMap<String, Option<String>>,
}

/// Replace spaces with underscores, the canonical key spelling.
pub fn canonical_name(name: &str) -> String {
    name.replace(' ', "_")
}

impl ImageRefs {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image name as referenced, initially unresolved. Keeps an
    /// existing entry (and its URL, if already resolved) untouched.
    pub fn register(&mut self, name: &str) {
        self.refs.entry(canonical_name(name)).or_insert(None);
    }

    /// Attach a URL to a registered name. Returns `false` if the name was
    /// never registered (the entry is not created).
    pub fn resolve(&mut self, name: &str, url: impl Into<String>) -> bool {
        match self.refs.get_mut(&canonical_name(name)) {
            Some(slot) => {
                *slot = Some(url.into());
                true
            }
            None => false,
        }
    }

    /// Whether a name (canonical or not) has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.refs.contains_key(&canonical_name(name))
    }

    /// The resolved URL for a name, if any.
    pub fn url(&self, name: &str) -> Option<&str> {
        self.refs
            .get(&canonical_name(name))
            .and_then(|u| u.as_deref())
    }

    /// Canonical names still awaiting a URL.
    pub fn unresolved(&self) -> Vec<String> {
        self.refs
            .iter()
            .filter(|(_, url)| url.is_none())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Iterate over `(canonical name, url)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.refs.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
