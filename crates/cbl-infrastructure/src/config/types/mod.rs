//! Configuration types module

pub mod app;
pub mod environment;
pub mod logging;
pub mod source;

// Re-export main types
pub use app::*;
