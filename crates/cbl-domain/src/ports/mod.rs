//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the provider layer.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`ComponentSourceProvider`] | Serves component source text |
//! | [`Compiler`] | Materializes source text into a [`Component`] |

/// Compiler port
pub mod compiler;
/// Component source provider port
pub mod source;

pub use compiler::{Compiler, Component, ExecutableComponent};
pub use source::ComponentSourceProvider;
