//! Variant action types.

use std::sync::Arc;

/// Boxed error type returned by failing variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default output of a variant: success, or an arbitrary error.
pub type ActionResult = std::result::Result<(), BoxError>;

/// One candidate behavior of a toggleable.
///
/// Variants take no arguments and are shared, so the registry can hand one out
/// and invoke it after releasing its lock.
pub type Variant<O = ActionResult> = Arc<dyn Fn() -> O + Send + Sync>;

/// Wrap a closure as a [`Variant`].
///
/// # Examples
///
/// ```rust
/// use hotswap_toggle::prelude::*;
///
/// let registry: ToggleRegistry = ToggleRegistry::new();
/// registry
///     .add("greeting", [variant(|| Ok(())), variant(|| Err("unsupported".into()))])
///     .unwrap();
/// ```
pub fn variant<O, F>(action: F) -> Variant<O>
where
    F: Fn() -> O + Send + Sync + 'static,
{
    Arc::new(action)
}
