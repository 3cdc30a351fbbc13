//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ComponentId`] | Component type plus optional variant; doubles as cache key |
//! | [`LoaderConfig`] | Cache, retry and timeout settings of a loader |
//! | [`LoaderConfigPatch`] | Partial configuration merged by `configure` |
//! | [`LoadState`] | Consumer-facing state of a load |
//! | [`ComponentSourceResponse`] | Body returned by the source endpoint |

/// Component identifiers
pub mod component_id;
/// Loader configuration
pub mod config;
/// Consumer-facing load state
pub mod load_state;
/// Source endpoint payloads
pub mod source;

// Re-export commonly used value objects
pub use component_id::{ComponentId, cache_key, in_family};
pub use config::{LoaderConfig, LoaderConfigPatch};
pub use load_state::LoadState;
pub use source::{ComponentSourceResponse, InvalidationAck};
