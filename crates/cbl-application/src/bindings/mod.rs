//! Lifecycle-bound consumer bindings

mod component;
mod preload;

pub use component::ComponentBinding;
pub use preload::{PreloadBinding, PreloadState};
