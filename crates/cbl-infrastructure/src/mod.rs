//! # Component Block Loader - Infrastructure Layer
//!
//! Cross-cutting concerns around the loading pipeline.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration with presets |
//! | [`constants`] | Centralized configuration constants |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`bootstrap`] | Loader assembly from configuration |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{build_loader, build_loader_with};
pub use config::{AppConfig, ConfigLoader, Environment};
pub use error_ext::ErrorContext;
