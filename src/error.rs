//! Error types for hotswap-toggle.

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, ToggleError>;

/// Errors returned by the toggle registry.
///
/// None of these are retried internally. Failures raised by a variant itself are
/// never converted into a `ToggleError`; they reach the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    /// A toggleable with this name is already registered.
    #[error("toggleable already exists: {0}")]
    AlreadyExists(String),

    /// Registration was attempted with fewer than two variants.
    #[error("toggleable '{name}' needs at least 2 options to toggle (got {count})")]
    TooFewOptions {
        /// Name of the rejected toggleable
        name: String,
        /// Number of variants that were supplied
        count: usize,
    },

    /// No toggleable is registered under this name.
    #[error("toggleable does not exist: {0}")]
    NotFound(String),

    /// The requested index is outside the toggleable's variant range.
    #[error("toggle value {index} is out of bounds for toggleable '{name}' ({len} options)")]
    OutOfBounds {
        /// Name of the toggleable
        name: String,
        /// The rejected index
        index: usize,
        /// Number of variants the toggleable has
        len: usize,
    },
}

impl ToggleError {
    /// The toggleable name this error refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::AlreadyExists(name) | Self::NotFound(name) => name,
            Self::TooFewOptions { name, .. } | Self::OutOfBounds { name, .. } => name,
        }
    }
}

/// Errors that can occur while building activation sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to load values from a source.
    #[error("Failed to load activation source: {0}")]
    LoadError(String),

    /// Loaded values could not be converted.
    #[error("Failed to deserialize activation values: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ToggleError::AlreadyExists("feature".into()).to_string(),
            "toggleable already exists: feature"
        );
        assert_eq!(
            ToggleError::OutOfBounds {
                name: "feature".into(),
                index: 5,
                len: 3
            }
            .to_string(),
            "toggle value 5 is out of bounds for toggleable 'feature' (3 options)"
        );
    }

    #[test]
    fn test_name_accessor() {
        let err = ToggleError::TooFewOptions {
            name: "solo".into(),
            count: 1,
        };
        assert_eq!(err.name(), "solo");
        assert_eq!(ToggleError::NotFound("ghost".into()).name(), "ghost");
    }
}
