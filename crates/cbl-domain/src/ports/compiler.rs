//! Compiler Port
//!
//! Turns component source text into a callable [`Component`]. The compiled
//! unit only sees the capabilities it is handed plus the props passed at
//! render time.
//!
//! Compilers are not sandboxes: source text must come from a trusted server.

use crate::error::{ExecutionError, Result};
use crate::render::{CapabilitySet, RenderScope};
use std::sync::Arc;

/// Opaque callable produced by materialization
pub type ExecutableComponent = Arc<dyn Component>;

/// A materialized UI block
pub trait Component: Send + Sync + std::fmt::Debug {
    /// Identifier the component was materialized for
    fn identifier(&self) -> &str;

    /// Render with `props`, using `scope` for the injected primitives
    ///
    /// # Returns
    /// The rendered markup
    fn render(&self, props: &serde_json::Value, scope: &RenderScope) -> Result<String>;
}

/// Compiler Port
///
/// # Example
///
/// ```ignore
/// use cbl_domain::render::CapabilitySet;
///
/// let component = compiler.compile(source, "HERO", &CapabilitySet::standard())?;
/// let html = component.render(&serde_json::json!({"title": "Hi"}), &RenderScope::new())?;
/// ```
pub trait Compiler: Send + Sync + std::fmt::Debug {
    /// Compile `source` into a component for `identifier`
    ///
    /// # Errors
    /// An [`ExecutionError`] naming `identifier` when evaluation fails, the
    /// exported value is not callable, or nothing is exported.
    fn compile(
        &self,
        source: &str,
        identifier: &str,
        capabilities: &CapabilitySet,
    ) -> std::result::Result<ExecutableComponent, ExecutionError>;

    /// Get the name/identifier of this compiler implementation
    fn compiler_name(&self) -> &str;
}
