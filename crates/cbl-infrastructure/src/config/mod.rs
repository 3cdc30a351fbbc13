//! Configuration management
//!
//! Figment-based loading of [`AppConfig`] with environment presets.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader, validate_app_config};
pub use types::*;
