//! Priority-ordered collection of activation sources.

use super::ActivationSource;

/// Resolves activation values from multiple sources.
///
/// Sources are consulted from highest to lowest priority and the first one that
/// has a value wins. Sources with equal priority keep insertion order.
///
/// # Examples
///
/// ```rust
/// use hotswap_toggle::sources::{ActivationSource, ArgsSource, MapSource, SourceChain};
///
/// let chain = SourceChain::new()
///     .with_source(MapSource::new().with_value("checkout", 1))
///     .with_source(ArgsSource::parse(["-Tcheckout", "2"]));
///
/// // Arguments outrank the in-memory defaults
/// assert_eq!(chain.resolve("checkout"), Some(2));
/// ```
#[derive(Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn ActivationSource>>,
}

impl SourceChain {
    /// Create an empty chain. An empty chain never resolves a value.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source to the chain.
    pub fn with_source<S: ActivationSource + 'static>(mut self, source: S) -> Self {
        self.add_source(Box::new(source));
        self
    }

    /// Add a boxed source to the chain, keeping the chain ordered by priority.
    pub fn add_source(&mut self, source: Box<dyn ActivationSource>) {
        let position = self
            .sources
            .iter()
            .position(|s| s.priority() < source.priority())
            .unwrap_or(self.sources.len());
        self.sources.insert(position, source);
    }

    /// Number of sources in the chain.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Get the list of source names in lookup order (highest priority first).
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

impl ActivationSource for SourceChain {
    fn resolve(&self, name: &str) -> Option<i64> {
        self.sources.iter().find_map(|source| {
            let value = source.resolve(name)?;
            tracing::debug!(
                source = %source.name(),
                toggleable = name,
                value,
                "Resolved activation value"
            );
            Some(value)
        })
    }

    fn name(&self) -> String {
        format!("chain[{}]", self.source_names().join(", "))
    }

    fn priority(&self) -> i32 {
        self.sources.first().map_or(0, |s| s.priority())
    }
}
