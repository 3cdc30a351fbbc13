//! # Component Block Loader - Provider Implementations
//!
//! Implementations of the ports defined in `cbl-domain`. Each provider can be
//! enabled or disabled with a feature flag.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Source | `ComponentSourceProvider` | Http, InMemory |
//! | Compiler | `Compiler` | Expression (evalexpr) |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! cbl-providers = { version = "0.1", default-features = false, features = ["source-memory", "compiler-expression"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cbl_providers::source::HttpSourceProvider;
//! use cbl_providers::compiler::ExpressionCompiler;
//! ```

// Re-export cbl-domain types commonly used with providers
pub use cbl_domain::error::{Error, Result};
pub use cbl_domain::ports::{Compiler, ComponentSourceProvider};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Component source providers
pub mod source;

/// Component compilers
pub mod compiler;

#[cfg(feature = "compiler-expression")]
pub use compiler::ExpressionCompiler;
#[cfg(feature = "source-http")]
pub use source::HttpSourceProvider;
#[cfg(feature = "source-memory")]
pub use source::InMemorySourceProvider;
