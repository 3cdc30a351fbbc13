//! # Component Block Loader
//!
//! Fetches UI component blocks from a remote source at runtime, caches them
//! with a TTL, and materializes them into renderable components.
//!
//! ## Features
//!
//! - **TTL cache** with lazy expiry and live reconfiguration
//! - **Resilient fetching**: per-attempt timeout and fixed-delay retry
//! - **Coalesced loads**: concurrent requests for one key share a fetch
//! - **Best-effort preloading** of component batches
//! - **Lifecycle-bound bindings** that never publish after unmount
//!
//! ## Example
//!
//! ```ignore
//! use cbl::infrastructure::{ConfigLoader, build_loader};
//! use cbl::RenderScope;
//!
//! let config = ConfigLoader::new().load()?;
//! let loader = build_loader(&config)?;
//! let hero = loader.load("HERO", Some("dark")).await?;
//! let markup = hero.render(&serde_json::json!({ "title": "Hi" }), &RenderScope::new())?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Identifiers, configuration, errors and ports
//! - `application` - Cache, fetcher, executor, loader, preloader, bindings
//! - `providers` - HTTP and in-memory sources, expression compiler
//! - `infrastructure` - Configuration, logging and loader assembly

/// Domain layer - core types, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cbl_domain::*;
}

/// Application layer - the loading pipeline
pub mod application {
    pub use cbl_application::*;
}

/// Provider implementations
pub mod providers {
    pub use cbl_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use cbl_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{
    ComponentBinding, ComponentLoader, PreloadBinding, PreloadReport, PreloadState, Preloader,
};
pub use infrastructure::{build_loader, build_loader_with};
