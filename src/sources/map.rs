//! In-memory activation source.

use super::ActivationSource;
use std::collections::HashMap;

/// Fixed name → value activation source.
///
/// Useful for programmatic defaults and for tests.
///
/// # Examples
///
/// ```rust
/// use hotswap_toggle::sources::{ActivationSource, MapSource};
///
/// let source = MapSource::new().with_value("search", 1);
/// assert_eq!(source.resolve("search"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct MapSource {
    label: String,
    values: HashMap<String, i64>,
    priority: i32,
}

impl MapSource {
    /// Create an empty map source.
    pub fn new() -> Self {
        Self {
            label: "map".to_string(),
            values: HashMap::new(),
            priority: 100,
        }
    }

    /// Set the activation value for a toggleable.
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Set the name reported by [`ActivationSource::name`].
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for MapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |source, (name, value)| source.with_value(name, value))
    }
}

impl ActivationSource for MapSource {
    fn resolve(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    fn name(&self) -> String {
        self.label.clone()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let source = MapSource::new().with_value("a", 3);
        assert_eq!(source.resolve("a"), Some(3));
        assert_eq!(source.resolve("b"), None);
    }

    #[test]
    fn test_from_iter() {
        let source: MapSource = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(source.resolve("b"), Some(2));
        assert_eq!(source.priority(), 100);
    }
}
