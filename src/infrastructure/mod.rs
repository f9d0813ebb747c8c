//! Infrastructure layer: ambient adapters around the sync core.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
