//! Compiler implementations
//!
//! Implements the `Compiler` port that materializes component source text.

#[cfg(feature = "compiler-expression")]
mod expression;

#[cfg(feature = "compiler-expression")]
pub use expression::{ExpressionCompiler, ExpressionComponent, prop_variable};
