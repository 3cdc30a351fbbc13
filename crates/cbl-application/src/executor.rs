//! Component executor
//!
//! Materializes source text into an [`ExecutableComponent`] through the
//! configured [`Compiler`], handing it the fixed capability set.

use cbl_domain::error::ExecutionError;
use cbl_domain::ports::{Compiler, ExecutableComponent};
use cbl_domain::render::CapabilitySet;
use std::sync::Arc;
use tracing::debug;

/// Turns source text into callable components
#[derive(Debug, Clone)]
pub struct Executor {
    compiler: Arc<dyn Compiler>,
    capabilities: CapabilitySet,
}

impl Executor {
    /// Executor over `compiler` with the standard capability set
    pub fn new(compiler: Arc<dyn Compiler>) -> Self {
        Self {
            compiler,
            capabilities: CapabilitySet::standard(),
        }
    }

    /// Capabilities injected into every compiled component
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Materialize `source` for `identifier`
    ///
    /// # Errors
    /// The compiler's [`ExecutionError`], which names `identifier`.
    pub fn materialize(
        &self,
        source: &str,
        identifier: &str,
    ) -> Result<ExecutableComponent, ExecutionError> {
        let component = self
            .compiler
            .compile(source, identifier, &self.capabilities)?;
        debug!(
            identifier = identifier,
            compiler = self.compiler.compiler_name(),
            source_len = source.len(),
            "Component materialized"
        );
        Ok(component)
    }
}
