//! Activation source trait.

/// Trait for sources of initial activation indices.
///
/// A source answers one question: which variant should a toggleable start with?
/// Implement this trait to plug in custom backends (feature-flag files, test
/// fixtures, ...). Lookups happen while the registry lock is held, so sources
/// must be fast and local. A source must never call back into the registry that
/// is resolving through it: the lock is not reentrant and the call deadlocks.
pub trait ActivationSource: Send + Sync {
    /// Resolve the activation value configured for `name`.
    ///
    /// Returns `None` when the source has no value, or when the value it has
    /// cannot be parsed as an integer.
    fn resolve(&self, name: &str) -> Option<i64>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Command-line arguments: 300
    /// - Environment variables: 200
    /// - In-memory maps: 100
    fn priority(&self) -> i32 {
        100
    }
}

/// Parse a raw textual activation value.
///
/// Unparsable values are reported and treated as absent.
pub(crate) fn parse_value(source: &str, name: &str, raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::info!(
                source,
                toggleable = name,
                value = raw,
                error = %e,
                "Invalid configuration value for toggleable"
            );
            None
        }
    }
}
