//! Insertion-ordered style attribute maps.
//!
//! Diagrams, nodes, edges, and clusters all accept free-form style attributes
//! (`fontsize`, `bgcolor`, ...) that are passed through to the rendering
//! engine. [`AttrMap`] preserves insertion order so the emitted graph
//! description is deterministic, which the output tests rely on.

use indexmap::IndexMap;
use serde::Deserialize;

/// An insertion-ordered map of style attributes.
///
/// Later writes to the same key overwrite the value but keep the key's
/// original position.
///
/// # Examples
///
/// ```
/// use stratus_core::attr::AttrMap;
///
/// let attrs = AttrMap::new()
///     .with("fontsize", "24")
///     .with("bgcolor", "white");
/// assert_eq!(attrs.get("fontsize"), Some("24"));
/// assert_eq!(attrs.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AttrMap(IndexMap<String, String>);

impl AttrMap {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, overwriting any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Copies all entries of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &AttrMap) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}
