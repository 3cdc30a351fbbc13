//! Live loader configuration
//!
//! One [`SharedConfig`] is owned by each loader and handed to the cache and
//! fetcher it builds. Every operation reads the current value when it needs it,
//! so a `configure` call is visible to the next cache lookup or fetch attempt,
//! including attempts of a retry loop that is already running.

use arc_swap::ArcSwap;
use cbl_domain::value_objects::{LoaderConfig, LoaderConfigPatch};
use std::fmt;
use std::sync::Arc;

/// Handle to a loader's configuration
#[derive(Clone)]
pub struct SharedConfig {
    current: Arc<ArcSwap<LoaderConfig>>,
}

impl SharedConfig {
    /// Create a handle holding `config`
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Current configuration
    pub fn current(&self) -> Arc<LoaderConfig> {
        self.current.load_full()
    }

    /// Merge `patch` into the configuration and return the result
    pub fn configure(&self, patch: &LoaderConfigPatch) -> Arc<LoaderConfig> {
        self.current
            .rcu(|current| Arc::new(current.merged(patch)));
        self.current()
    }

    /// Replace the whole configuration
    pub fn replace(&self, config: LoaderConfig) {
        self.current.store(Arc::new(config));
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedConfig")
            .field(&*self.current.load())
            .finish()
    }
}
