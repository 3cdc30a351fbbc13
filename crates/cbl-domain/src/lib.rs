//! # Component Block Loader - Domain Layer
//!
//! Core types, errors and ports shared by every other crate in the workspace.
//! This crate has no I/O and no runtime dependency.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | General and load-path error types |
//! | [`value_objects`] | Identifiers, configuration, load state, payloads |
//! | [`ports`] | Source provider and compiler contracts |
//! | [`render`] | Capabilities injected into compiled components |
//! | [`constants`] | Domain defaults |

/// Domain constants
pub mod constants;
/// Error handling types
pub mod error;
/// Port traits implemented by providers
pub mod ports;
/// Rendering primitives
pub mod render;
/// Value objects
pub mod value_objects;

pub use error::{Error, ExecutionError, FetchError, LoadError, LoadFailure, Result};
pub use ports::{Compiler, Component, ComponentSourceProvider, ExecutableComponent};
pub use render::{Capability, CapabilitySet, RenderScope};
pub use value_objects::{
    ComponentId, ComponentSourceResponse, InvalidationAck, LoadState, LoaderConfig,
    LoaderConfigPatch,
};
