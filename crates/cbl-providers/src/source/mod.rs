//! Component source provider implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`HttpSourceProvider`] | GET/DELETE against the source endpoint |
//! | [`InMemorySourceProvider`] | Fixed bundle held in memory |

#[cfg(feature = "source-http")]
mod http;
#[cfg(feature = "source-memory")]
mod memory;

#[cfg(feature = "source-http")]
pub use http::HttpSourceProvider;
#[cfg(feature = "source-memory")]
pub use memory::InMemorySourceProvider;
