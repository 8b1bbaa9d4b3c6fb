//! Toggle metrics tracking using OpenTelemetry.

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use std::time::Instant;

/// Metrics collector for registry operations.
///
/// # Examples
///
/// ```rust,no_run
/// use hotswap_toggle::metrics::ToggleMetrics;
/// use opentelemetry::global;
///
/// let meter = global::meter("hotswap-toggle");
/// let metrics = ToggleMetrics::new(meter);
///
/// let start = std::time::Instant::now();
/// // ... run a variant ...
/// metrics.record_execution("checkout", 1, start);
/// ```
#[derive(Clone)]
pub struct ToggleMetrics {
    registrations: Counter<u64>,
    registration_failures: Counter<u64>,
    toggles: Counter<u64>,
    toggle_failures: Counter<u64>,
    pending_activations: Counter<u64>,
    executions: Counter<u64>,
    execution_duration: Histogram<f64>,
}

impl ToggleMetrics {
    /// Create a new metrics collector with the provided meter.
    pub fn new(meter: Meter) -> Self {
        let registrations = meter
            .u64_counter("hotswap_toggle.registrations")
            .with_description("Number of toggleables registered")
            .build();

        let registration_failures = meter
            .u64_counter("hotswap_toggle.registrations.failures")
            .with_description("Number of rejected registrations")
            .build();

        let toggles = meter
            .u64_counter("hotswap_toggle.toggles")
            .with_description("Number of accepted toggle calls on registered toggleables")
            .build();

        let toggle_failures = meter
            .u64_counter("hotswap_toggle.toggles.failures")
            .with_description("Number of out-of-bounds toggle calls")
            .build();

        let pending_activations = meter
            .u64_counter("hotswap_toggle.toggles.pending")
            .with_description("Number of activations recorded before registration")
            .build();

        let executions = meter
            .u64_counter("hotswap_toggle.executions")
            .with_description("Number of variant executions")
            .build();

        let execution_duration = meter
            .f64_histogram("hotswap_toggle.execution.duration")
            .with_description("Duration of variant executions in seconds")
            .with_unit("s")
            .build();

        Self {
            registrations,
            registration_failures,
            toggles,
            toggle_failures,
            pending_activations,
            executions,
            execution_duration,
        }
    }

    /// Record a registration attempt.
    pub fn record_registration(&self, accepted: bool) {
        if accepted {
            self.registrations.add(1, &[]);
        } else {
            self.registration_failures.add(1, &[]);
        }
    }

    /// Record a toggle call for `name`.
    pub fn record_toggle(&self, name: &str, accepted: bool) {
        let attributes = [KeyValue::new("toggleable", name.to_string())];
        if accepted {
            self.toggles.add(1, &attributes);
        } else {
            self.toggle_failures.add(1, &attributes);
        }
    }

    /// Record an activation for `name` made before it was registered.
    pub fn record_pending_activation(&self, name: &str) {
        self.pending_activations
            .add(1, &[KeyValue::new("toggleable", name.to_string())]);
    }

    /// Record one execution of variant `variant` of `name`.
    ///
    /// # Arguments
    ///
    /// * `start` - When the variant started running
    pub fn record_execution(&self, name: &str, variant: usize, start: Instant) {
        let duration = start.elapsed().as_secs_f64();
        let attributes = [
            KeyValue::new("toggleable", name.to_string()),
            KeyValue::new("variant", variant as i64),
        ];
        self.executions.add(1, &attributes);
        self.execution_duration.record(duration, &attributes);
    }
}
