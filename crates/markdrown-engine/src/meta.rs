//! Document meta header collected from front matter.

use std::collections::BTreeMap;

/// Key/value pairs declared in a document's front matter.
///
/// Each front-matter block overwrites the keys it declares and leaves the
/// rest in place. Use [`MetaHeader::clear`] (or
/// [`Markdrown::reset_meta`](crate::Markdrown::reset_meta)) between documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetaHeader {
    entries: BTreeMap<String, String>,
}

impl MetaHeader {
    /// Create an empty header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut meta = MetaHeader::new();
        assert_eq!(meta.insert("title", "A"), None);
        assert_eq!(meta.insert("title", "B"), Some("A".to_owned()));
        assert_eq!(meta.get("title"), Some("B"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let mut meta = MetaHeader::new();
        meta.insert("b", "2");
        meta.insert("a", "1");
        let keys: Vec<&str> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut meta = MetaHeader::new();
        meta.insert("a", "1");
        meta.clear();
        assert!(meta.is_empty());
    }
}
