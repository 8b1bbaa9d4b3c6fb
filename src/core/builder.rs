//! Builder for constructing ToggleRegistry instances.

use crate::core::ToggleRegistry;
use crate::error::SourceError;
use crate::sources::{ActivationSource, ArgsSource, DEFAULT_ENV_PREFIX, EnvSource, SourceChain};

#[cfg(feature = "metrics")]
use crate::metrics::ToggleMetrics;

/// Builder for constructing a `ToggleRegistry` instance.
///
/// Provides a fluent interface for configuring where initial activations come
/// from.
///
/// # Examples
///
/// ```rust,no_run
/// use hotswap_toggle::prelude::*;
///
/// # fn example() -> std::result::Result<(), SourceError> {
/// // TOGGLEABLE_CHECKOUT=1 or `-Tcheckout 1` select the second checkout variant
/// let registry: ToggleRegistry = ToggleRegistry::builder()
///     .with_default_env()
///     .with_process_args()
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ToggleRegistryBuilder {
    env_prefix: Option<String>,
    args: Option<Vec<String>>,
    custom_sources: Vec<Box<dyn ActivationSource>>,
    #[cfg(feature = "metrics")]
    metrics: Option<ToggleMetrics>,
}

impl ToggleRegistryBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            env_prefix: None,
            args: None,
            custom_sources: Vec::new(),
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Read activations from environment variables named `<prefix>_<NAME>`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hotswap_toggle::prelude::*;
    ///
    /// // APP_CHECKOUT=1 -> checkout starts on variant 1
    /// ToggleRegistry::builder().with_env("APP");
    /// ```
    pub fn with_env(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Read activations from `TOGGLEABLE_<NAME>` environment variables.
    pub fn with_default_env(self) -> Self {
        self.with_env(DEFAULT_ENV_PREFIX)
    }

    /// Read activations from `-T<name> <value>` flags in `args`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hotswap_toggle::prelude::*;
    ///
    /// let registry = ToggleRegistry::builder()
    ///     .with_args(["-Tcheckout", "1"])
    ///     .build()
    ///     .unwrap();
    ///
    /// registry.add("checkout", [variant(|| "old"), variant(|| "new")]).unwrap();
    /// assert_eq!(registry.execute("checkout").unwrap(), "new");
    /// ```
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Read activations from the flags of the running process.
    pub fn with_process_args(self) -> Self {
        self.with_args(std::env::args().skip(1))
    }

    /// Add a custom activation source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hotswap_toggle::prelude::*;
    /// use hotswap_toggle::sources::MapSource;
    ///
    /// let defaults = MapSource::new().with_value("search", 1);
    /// let builder = ToggleRegistry::builder().with_source(defaults);
    /// ```
    pub fn with_source<S: ActivationSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Record registrations, toggles and executions with OpenTelemetry.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, meter: opentelemetry::metrics::Meter) -> Self {
        self.metrics = Some(ToggleMetrics::new(meter));
        self
    }

    /// Build the registry.
    ///
    /// # Type Parameters
    ///
    /// * `O` - Output type of the variants (defaults to
    ///   [`ActionResult`](crate::core::ActionResult) when inferred from a plain
    ///   `ToggleRegistry` binding)
    ///
    /// # Errors
    ///
    /// Returns an error if the environment source cannot be loaded.
    pub fn build<O>(self) -> Result<ToggleRegistry<O>, SourceError> {
        let mut chain = SourceChain::new();

        for source in self.custom_sources {
            chain.add_source(source);
        }

        if let Some(prefix) = self.env_prefix {
            chain.add_source(Box::new(EnvSource::new(prefix)?));
        }

        if let Some(args) = self.args {
            chain.add_source(Box::new(ArgsSource::parse(args)));
        }

        let registry = ToggleRegistry::with_sources(chain);

        #[cfg(feature = "metrics")]
        let registry = match self.metrics {
            Some(metrics) => registry.with_metrics(metrics),
            None => registry,
        };

        Ok(registry)
    }
}

impl Default for ToggleRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleRegistry {
    /// Create a new builder for constructing a registry.
    pub fn builder() -> ToggleRegistryBuilder {
        ToggleRegistryBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant;
    use crate::sources::MapSource;

    #[test]
    fn test_builder_accumulates_sources() {
        let builder = ToggleRegistryBuilder::new()
            .with_source(MapSource::new())
            .with_source(MapSource::new());

        assert_eq!(builder.custom_sources.len(), 2);
        assert!(builder.env_prefix.is_none());
    }

    #[test]
    fn test_builder_env() {
        let builder = ToggleRegistryBuilder::new().with_env("APP");
        assert_eq!(builder.env_prefix, Some("APP".to_string()));

        let builder = ToggleRegistryBuilder::new().with_default_env();
        assert_eq!(builder.env_prefix, Some("TOGGLEABLE".to_string()));
    }

    #[test]
    fn test_build_orders_sources() {
        let registry: ToggleRegistry<()> = ToggleRegistryBuilder::new()
            .with_args(["-Tx", "1"])
            .with_env("TEST_HOTSWAP_TOGGLE_BUILDER")
            .with_source(MapSource::new().named("defaults"))
            .build()
            .unwrap();

        assert_eq!(
            registry.source_names(),
            vec!["args:-T*", "env:TEST_HOTSWAP_TOGGLE_BUILDER_*", "defaults"]
        );
    }

    #[test]
    fn test_args_override_custom_sources() {
        let registry = ToggleRegistryBuilder::new()
            .with_source(MapSource::new().with_value("x", 2))
            .with_args(["-Tx", "1"])
            .build()
            .unwrap();

        registry
            .add("x", [variant(|| 0), variant(|| 1), variant(|| 2)])
            .unwrap();
        assert_eq!(registry.execute("x").unwrap(), 1);
    }
}
