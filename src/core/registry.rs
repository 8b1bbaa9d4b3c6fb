//! The toggle registry: registration, activation and dispatch.

use crate::core::snapshot::{RegistrySnapshot, ToggleState};
use crate::core::variant::{ActionResult, Variant};
use crate::error::{Result, ToggleError};
use crate::sources::{ActivationSource, SourceChain};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

#[cfg(feature = "metrics")]
use crate::metrics::ToggleMetrics;

/// A registered decision point.
struct Toggleable<O> {
    variants: Vec<Variant<O>>,
    /// Always `< variants.len()`.
    active: usize,
}

/// Everything guarded by the registry lock.
struct RegistryState<O> {
    toggleables: HashMap<String, Toggleable<O>>,
    /// Activations recorded before registration, plus cached resolutions.
    pending: HashMap<String, usize>,
}

/// Where a toggleable's initial index came from.
#[derive(Debug, Clone, Copy)]
enum Origin {
    Pending,
    Configuration,
    Default,
}

/// Registry of named toggleables and their active variants.
///
/// All state lives behind a single mutex. Variants are invoked after the lock
/// is released, so a slow variant never blocks other registry operations.
///
/// # Examples
///
/// ```rust
/// use hotswap_toggle::prelude::*;
///
/// let registry = ToggleRegistry::new();
///
/// // Activation may arrive before the toggleable exists
/// registry.toggle("checkout", 1).unwrap();
///
/// registry
///     .add("checkout", [variant(|| "legacy"), variant(|| "redesign")])
///     .unwrap();
/// assert_eq!(registry.execute("checkout").unwrap(), "redesign");
///
/// registry.toggle("checkout", 0).unwrap();
/// assert_eq!(registry.execute("checkout").unwrap(), "legacy");
/// ```
pub struct ToggleRegistry<O = ActionResult> {
    state: Mutex<RegistryState<O>>,
    sources: ArcSwap<SourceChain>,
    #[cfg(feature = "metrics")]
    metrics: Option<ToggleMetrics>,
}

impl<O> ToggleRegistry<O> {
    /// Create a registry without configuration sources.
    ///
    /// Toggleables start on the pending activation recorded for them, or on
    /// variant 0.
    pub fn new() -> Self {
        Self::with_sources(SourceChain::new())
    }

    /// Create a registry that resolves initial activations from `sources`.
    pub fn with_sources(sources: SourceChain) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                toggleables: HashMap::new(),
                pending: HashMap::new(),
            }),
            sources: ArcSwap::from_pointee(sources),
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Attach a metrics collector.
    #[cfg(feature = "metrics")]
    pub(crate) fn with_metrics(mut self, metrics: ToggleMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Register a toggleable.
    ///
    /// The initial active index is, in order of preference:
    /// 1. the pending activation recorded by [`toggle`](Self::toggle), if it is
    ///    within bounds (an out-of-bounds record is discarded);
    /// 2. the value resolved from the configuration sources, if within bounds;
    /// 3. `0`.
    ///
    /// The chosen index is cached as the name's pending activation.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::AlreadyExists`] if `name` is already registered
    /// - [`ToggleError::TooFewOptions`] if fewer than two variants are given
    pub fn add<I>(&self, name: impl Into<String>, variants: I) -> Result<()>
    where
        I: IntoIterator<Item = Variant<O>>,
    {
        let name = name.into();
        let variants: Vec<_> = variants.into_iter().collect();

        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.toggleables.contains_key(&name) {
            self.record_registration(false);
            return Err(ToggleError::AlreadyExists(name));
        }

        if variants.len() < 2 {
            self.record_registration(false);
            return Err(ToggleError::TooFewOptions {
                name,
                count: variants.len(),
            });
        }

        let (active, origin) = self.initial_activation(&mut state.pending, &name, variants.len());
        tracing::debug!(
            toggleable = %name,
            options = variants.len(),
            active,
            origin = ?origin,
            "Registered toggleable"
        );

        state.toggleables.insert(name, Toggleable { variants, active });
        self.record_registration(true);
        Ok(())
    }

    /// Pick the initial index for a toggleable with `len` variants.
    fn initial_activation(
        &self,
        pending: &mut HashMap<String, usize>,
        name: &str,
        len: usize,
    ) -> (usize, Origin) {
        if let Some(&index) = pending.get(name) {
            if index < len {
                return (index, Origin::Pending);
            }
            tracing::info!(
                toggleable = name,
                value = index,
                options = len,
                "Invalid toggle value for toggleable"
            );
            pending.remove(name);
        }

        let sources = self.sources.load();
        let (index, origin) = match sources.resolve(name) {
            None => (0, Origin::Default),
            Some(value) => match usize::try_from(value) {
                Ok(index) if index < len => (index, Origin::Configuration),
                _ => {
                    tracing::info!(
                        toggleable = name,
                        value,
                        options = len,
                        sources = %sources.name(),
                        "Invalid configuration value for toggleable"
                    );
                    (0, Origin::Default)
                }
            },
        };

        pending.insert(name.to_string(), index);
        (index, origin)
    }

    /// Set the active variant of a toggleable.
    ///
    /// For a name that is not registered yet, the index is recorded as a pending
    /// activation (replacing any earlier one) and the call always succeeds; it
    /// is checked against the variant count once the toggleable is added.
    ///
    /// # Errors
    ///
    /// [`ToggleError::OutOfBounds`] if `name` is registered and `index` is not a
    /// valid variant index. The active variant is left unchanged.
    pub fn toggle(&self, name: &str, index: usize) -> Result<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let Some(toggleable) = state.toggleables.get_mut(name) else {
            tracing::debug!(toggleable = name, index, "Recorded pending activation");
            state.pending.insert(name.to_string(), index);
            self.record_pending(name);
            return Ok(());
        };

        let len = toggleable.variants.len();
        if index >= len {
            self.record_toggle(name, false);
            return Err(ToggleError::OutOfBounds {
                name: name.to_string(),
                index,
                len,
            });
        }

        tracing::debug!(
            toggleable = name,
            from = toggleable.active,
            to = index,
            "Toggled"
        );
        toggleable.active = index;
        self.record_toggle(name, true);
        Ok(())
    }

    /// Invoke the active variant of a toggleable and return its output as is.
    ///
    /// The variant runs outside the registry lock. A concurrent
    /// [`toggle`](Self::toggle) may or may not affect a call already in
    /// flight, but the index it reads is always valid.
    ///
    /// # Errors
    ///
    /// [`ToggleError::NotFound`] if `name` is not registered.
    pub fn execute(&self, name: &str) -> Result<O> {
        let (action, active) = {
            let state = self.state.lock();
            let toggleable = state
                .toggleables
                .get(name)
                .ok_or_else(|| ToggleError::NotFound(name.to_string()))?;
            (
                Arc::clone(&toggleable.variants[toggleable.active]),
                toggleable.active,
            )
        };

        tracing::trace!(toggleable = name, variant = active, "Executing toggleable");

        #[cfg(feature = "metrics")]
        let start = std::time::Instant::now();

        let output = action();

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_execution(name, active, start);
        }

        Ok(output)
    }

    /// Register the toggleable if it is new, then execute it.
    ///
    /// When `name` is already registered, `variants` is ignored and the existing
    /// toggleable runs.
    ///
    /// # Errors
    ///
    /// Any registration error other than [`ToggleError::AlreadyExists`], or the
    /// errors of [`execute`](Self::execute).
    pub fn run<I>(&self, name: &str, variants: I) -> Result<O>
    where
        I: IntoIterator<Item = Variant<O>>,
    {
        match self.add(name, variants) {
            Ok(()) | Err(ToggleError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
        self.execute(name)
    }

    /// Index of the active variant of a registered toggleable.
    ///
    /// # Errors
    ///
    /// [`ToggleError::NotFound`] if `name` is not registered.
    pub fn active(&self, name: &str) -> Result<usize> {
        self.state
            .lock()
            .toggleables
            .get(name)
            .map(|t| t.active)
            .ok_or_else(|| ToggleError::NotFound(name.to_string()))
    }

    /// Number of variants of a registered toggleable.
    ///
    /// # Errors
    ///
    /// [`ToggleError::NotFound`] if `name` is not registered.
    pub fn options(&self, name: &str) -> Result<usize> {
        self.state
            .lock()
            .toggleables
            .get(name)
            .map(|t| t.variants.len())
            .ok_or_else(|| ToggleError::NotFound(name.to_string()))
    }

    /// The pending activation recorded for `name`, if any.
    ///
    /// After registration this is the cached initial resolution and no longer
    /// tracks the active index.
    pub fn pending(&self, name: &str) -> Option<usize> {
        self.state.lock().pending.get(name).copied()
    }

    /// Whether a toggleable is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().toggleables.contains_key(name)
    }

    /// Number of registered toggleables.
    pub fn len(&self) -> usize {
        self.state.lock().toggleables.len()
    }

    /// Whether no toggleable is registered.
    pub fn is_empty(&self) -> bool {
        self.state.lock().toggleables.is_empty()
    }

    /// Names of all registered toggleables, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.state.lock().toggleables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Copy the registry state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.lock();

        let mut toggleables: Vec<_> = state
            .toggleables
            .iter()
            .map(|(name, t)| ToggleState {
                name: name.clone(),
                active: t.active,
                options: t.variants.len(),
            })
            .collect();
        toggleables.sort_by(|a, b| a.name.cmp(&b.name));

        let pending = state
            .pending
            .iter()
            .filter(|(name, _)| !state.toggleables.contains_key(*name))
            .map(|(name, index)| (name.clone(), *index))
            .collect();

        RegistrySnapshot {
            toggleables,
            pending,
        }
    }

    /// Replace the configuration sources.
    ///
    /// Only affects names whose activation has not been resolved yet; cached
    /// resolutions stay as they are.
    pub fn replace_sources(&self, sources: SourceChain) {
        tracing::debug!(sources = %sources.name(), "Replaced activation sources");
        self.sources.store(Arc::new(sources));
    }

    /// Names of the configuration sources, in lookup order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.load().source_names()
    }

    #[cfg(feature = "metrics")]
    fn record_registration(&self, accepted: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_registration(accepted);
        }
    }

    #[cfg(not(feature = "metrics"))]
    fn record_registration(&self, _accepted: bool) {}

    #[cfg(feature = "metrics")]
    fn record_toggle(&self, name: &str, accepted: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_toggle(name, accepted);
        }
    }

    #[cfg(not(feature = "metrics"))]
    fn record_toggle(&self, _name: &str, _accepted: bool) {}

    #[cfg(feature = "metrics")]
    fn record_pending(&self, name: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_pending_activation(name);
        }
    }

    #[cfg(not(feature = "metrics"))]
    fn record_pending(&self, _name: &str) {}
}

impl ToggleRegistry {
    /// The process-wide registry.
    ///
    /// Built on first use with the `TOGGLEABLE_*` environment variables and the
    /// `-T<name>` process arguments as configuration sources. Prefer an explicit
    /// registry where the application can pass one around.
    pub fn global() -> &'static ToggleRegistry {
        static GLOBAL: OnceLock<ToggleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            ToggleRegistry::builder()
                .with_default_env()
                .with_process_args()
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Falling back to a registry without sources");
                    ToggleRegistry::new()
                })
        })
    }
}

impl<O> Default for ToggleRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for ToggleRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("ToggleRegistry")
            .field("toggleables", &snapshot.toggleables)
            .field("pending", &snapshot.pending)
            .field("sources", &self.source_names())
            .finish()
    }
}
