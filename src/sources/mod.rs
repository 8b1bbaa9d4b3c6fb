//! Activation source implementations.

mod activation_source;
mod args;
mod chain;
mod env;
mod map;

pub use activation_source::ActivationSource;
pub use args::{ArgsSource, FLAG_PREFIX};
pub use chain::SourceChain;
pub use env::{DEFAULT_ENV_PREFIX, EnvSource};
pub use map::MapSource;
