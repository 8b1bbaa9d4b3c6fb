//! Environment variable activation source.

use super::ActivationSource;
use super::activation_source::parse_value;
use crate::error::SourceError;
use config::Environment;
use std::collections::HashMap;

/// Default prefix for toggle environment variables.
pub const DEFAULT_ENV_PREFIX: &str = "TOGGLEABLE";

/// Environment variable activation source.
///
/// Reads variables named `<PREFIX>_<NAME>` once, at construction. Names are
/// matched case-insensitively because the underlying `config` environment
/// source lowercases keys.
///
/// # Examples
///
/// ```rust
/// use hotswap_toggle::sources::{ActivationSource, EnvSource};
///
/// // TOGGLEABLE_CHECKOUT=1 -> checkout starts on variant 1
/// let source = EnvSource::from_vars("TOGGLEABLE", [("TOGGLEABLE_CHECKOUT", "1")]).unwrap();
/// assert_eq!(source.resolve("checkout"), Some(1));
/// ```
#[derive(Debug)]
pub struct EnvSource {
    prefix: String,
    values: HashMap<String, String>,
    priority: i32,
}

impl EnvSource {
    /// Snapshot the process environment for variables with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be read into a key-value map.
    pub fn new(prefix: impl Into<String>) -> Result<Self, SourceError> {
        let prefix = prefix.into();
        let environment = Environment::with_prefix(&prefix);
        Self::load(prefix, environment)
    }

    /// Build a source from an explicit set of variables instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the variables cannot be read into a key-value map.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = prefix.into();
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let environment = Environment::with_prefix(&prefix).source(Some(vars));
        Self::load(prefix, environment)
    }

    fn load(prefix: String, environment: Environment) -> Result<Self, SourceError> {
        let config = config::Config::builder()
            .add_source(environment)
            .build()
            .map_err(|e| {
                SourceError::LoadError(format!("Failed to load environment variables: {}", e))
            })?;

        let values = config
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| {
                SourceError::DeserializationError(format!(
                    "Failed to parse environment variables: {}",
                    e
                ))
            })?;

        tracing::debug!(prefix = %prefix, count = values.len(), "Loaded toggle environment");

        Ok(Self {
            prefix,
            values,
            priority: 200,
        })
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ActivationSource for EnvSource {
    fn resolve(&self, name: &str) -> Option<i64> {
        let raw = self.values.get(&name.to_lowercase())?;
        parse_value(&self.name(), name, raw)
    }

    fn name(&self) -> String {
        format!("env:{}_*", self.prefix)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
