/// A template instance: a trimmed name plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template name, trimmed of surrounding whitespace.
    pub name: String,
    /// Parameters in declaration order.
    pub params: ParamMap,
}

/// Parameters of one template instance.
///
/// Keys are trimmed and compared exactly (case-sensitive). Unnamed
/// parameters are keyed positionally as `"1"`, `"2"`, … following the
/// MediaWiki convention. Values are kept raw — they may contain nested
/// templates, which consumers extract on demand via
/// [`crate::extract_templates`] or [`single_template`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    params: Vec<(String, String)>,
}

impl ParamMap {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(key, raw value)` pairs. Test convenience.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub(crate) fn push(&mut self, key: String, value: String) {
        self.params.push((key, value));
    }

    /// Raw value for a key. When a key is declared more than once the last
    /// declaration wins, as in MediaWiki.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text value for a key, or `None` if the key is absent.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.trim().to_string())
    }

    /// Trimmed text value for a key, or `default` if the key is absent.
    pub fn get_text_or(&self, key: &str, default: impl Into<String>) -> String {
        self.get_text(key).unwrap_or_else(|| default.into())
    }

    /// Iterate over `(key, raw value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters, counting duplicates.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the template carried no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// The value did not contain exactly one top-level template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected exactly 1 template, found {found}")]
pub struct NotExactlyOne {
    /// How many top-level templates were actually present.
    pub found: usize,
}

/// Extract the single top-level template from a parameter value.
///
/// This is the shape rule used throughout the entity compilers: a value
/// that should hold one nested template and holds zero or several is a
/// named condition for the caller to report, never a panic.
pub fn single_template(source: &str) -> Result<Template, NotExactlyOne> {
    let mut templates = crate::extract_templates(source);
    if templates.len() == 1 {
        Ok(templates.remove(0))
    } else {
        Err(NotExactlyOne {
            found: templates.len(),
        })
    }
}
