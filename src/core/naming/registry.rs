//! Per-asset set of claimed filenames

use std::collections::HashSet;

/// Filenames already claimed during the export of one asset
///
/// A registry is created fresh for each asset and discarded afterwards. It
/// does not reflect files already on disk.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has already been claimed
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Claims `name`; returns `false` if it was already claimed
    pub fn claim(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Number of claimed names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over claimed names in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NameRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_set_semantics() {
        let mut registry = NameRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.claim("20250102030405.jpg"));
        assert!(!registry.claim("20250102030405.jpg"));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("20250102030405.jpg"));
        assert!(!registry.contains("20250102030405.mov"));
    }

    #[test]
    fn test_from_iterator() {
        let registry: NameRegistry = ["a.jpg", "b.jpg"].into_iter().collect();
        assert_eq!(registry.len(), 2);
        let mut names: Vec<&str> = registry.iter().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }
}
