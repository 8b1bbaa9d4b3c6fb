//! Built-in metrics for toggle operations.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Registrations (accepted/rejected)
//! - Toggles (accepted/rejected)
//! - Executions per toggleable and variant
//! - Variant execution duration
//!
//! # Examples
//!
//! ```rust,no_run
//! use hotswap_toggle::prelude::*;
//! use opentelemetry::global;
//!
//! # fn example() -> std::result::Result<(), SourceError> {
//! let meter = global::meter("my-app");
//!
//! let registry: ToggleRegistry = ToggleRegistry::builder()
//!     .with_default_env()
//!     .with_metrics(meter)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod toggle_metrics;

pub use toggle_metrics::ToggleMetrics;
