//! Core registry types.

mod builder;
mod registry;
mod snapshot;
mod variant;

pub use builder::ToggleRegistryBuilder;
pub use registry::ToggleRegistry;
pub use snapshot::{RegistrySnapshot, ToggleState};
pub use variant::{ActionResult, BoxError, Variant, variant};
