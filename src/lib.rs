//! # hotswap-toggle
//!
//! Runtime feature toggles with early activation and environment/argument overrides.
//!
//! ## Overview
//!
//! A toggleable is a named decision point backed by two or more mutually exclusive
//! variants. `hotswap-toggle` keeps track of which variant is active for each name:
//! - Activations can be set before or after a toggleable is registered
//! - Initial activations can come from `TOGGLEABLE_<NAME>` environment variables or
//!   `-T<name> <value>` process arguments
//! - All state sits behind one lock; variants run outside it
//!
//! ## Quick Start
//!
//! ```rust
//! use hotswap_toggle::prelude::*;
//!
//! # fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let registry: ToggleRegistry = ToggleRegistry::builder()
//!     .with_args(["-Tcheckout", "1"])
//!     .build()?;
//!
//! registry.add(
//!     "checkout",
//!     [
//!         variant(|| {
//!             println!("legacy checkout");
//!             Ok(())
//!         }),
//!         variant(|| {
//!             println!("one-page checkout");
//!             Ok(())
//!         }),
//!     ],
//! )?;
//!
//! // Runs the one-page checkout, selected by `-Tcheckout 1`
//! registry.execute("checkout")?.map_err(|e| e.to_string())?;
//!
//! // Switch back at runtime
//! registry.toggle("checkout", 0)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Early activation**: `toggle` before `add` is remembered and applied at registration
//! - **Configuration overrides**: environment variables and command-line flags
//! - **Safe toggling**: out-of-bounds indices are rejected and leave state untouched
//! - **Pass-through results**: variant output reaches the caller unchanged
//!
//! ## Feature Flags
//!
//! Enable OpenTelemetry metrics in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hotswap-toggle = { version = "0.1", features = ["metrics"] }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

#[cfg(feature = "metrics")]
pub mod metrics;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ActionResult, BoxError, ToggleRegistry, ToggleRegistryBuilder, Variant, variant,
    };
    pub use crate::error::{Result, SourceError, ToggleError};
}
