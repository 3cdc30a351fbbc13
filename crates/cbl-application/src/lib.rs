//! # Component Block Loader - Application Layer
//!
//! Loading pipeline built on the domain ports:
//!
//! ```text
//! consumer -> ComponentLoader::load -> ComponentCache::get [hit -> return]
//!          -> ComponentFetcher::fetch (timeout + retry)
//!          -> Executor::materialize -> ComponentCache::set -> return
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Live, swappable loader configuration |
//! | [`cache`] | TTL cache with lazy expiry |
//! | [`fetcher`] | Source retrieval with timeout and fixed-delay retry |
//! | [`executor`] | Materialization through the compiler port |
//! | [`loader`] | Orchestration, error normalization, in-flight coalescing |
//! | [`preloader`] | Best-effort batch warm-up |
//! | [`bindings`] | Lifecycle-bound view consumers |

pub mod bindings;
pub mod cache;
pub mod config;
pub mod executor;
pub mod fetcher;
pub mod loader;
pub mod preloader;

pub use bindings::{ComponentBinding, PreloadBinding, PreloadState};
pub use cache::{CacheEntry, CacheStats, ComponentCache};
pub use config::SharedConfig;
pub use executor::Executor;
pub use fetcher::ComponentFetcher;
pub use loader::{ComponentLoader, Invalidation};
pub use preloader::{PreloadFailure, PreloadReport, Preloader};
