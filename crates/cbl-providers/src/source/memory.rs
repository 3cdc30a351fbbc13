//! In-Memory Source Provider
//!
//! Serves a fixed bundle of component sources keyed by cache key. Used for
//! tests and for running without a source endpoint.

use async_trait::async_trait;
use dashmap::DashMap;

use cbl_domain::error::FetchError;
use cbl_domain::ports::ComponentSourceProvider;
use cbl_domain::value_objects::{ComponentId, ComponentSourceResponse};

use crate::constants::MEMORY_PROVIDER_NAME;

/// In-memory source provider
///
/// An unknown identifier is answered with `success: false`, the same shape
/// the source endpoint uses for a block it does not know.
#[derive(Debug, Default)]
pub struct InMemorySourceProvider {
    sources: DashMap<String, String>,
}

impl InMemorySourceProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `source` under `key` (`<type>` or `<type>:<variant>`)
    pub fn with_component(self, key: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(key, source);
        self
    }

    /// Add or replace `source` under `key`
    pub fn insert(&self, key: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(key.into(), source.into());
    }

    /// Remove the source under `key`
    pub fn remove(&self, key: &str) -> Option<String> {
        self.sources.remove(key).map(|(_, source)| source)
    }

    /// Number of stored sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source is stored
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<K: Into<String>, S: Into<String>> FromIterator<(K, S)> for InMemorySourceProvider {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let provider = Self::new();
        for (key, source) in iter {
            provider.insert(key, source);
        }
        provider
    }
}

#[async_trait]
impl ComponentSourceProvider for InMemorySourceProvider {
    async fn fetch_source(
        &self,
        id: &ComponentId,
    ) -> Result<ComponentSourceResponse, FetchError> {
        let key = id.cache_key();
        Ok(match self.sources.get(&key) {
            Some(source) => ComponentSourceResponse::ok(&key, source.value().as_str()),
            None => ComponentSourceResponse::failure(&key, format!("component `{key}` not found")),
        })
    }

    /// The bundle is the source of truth, so invalidation only acknowledges
    /// types it knows.
    async fn invalidate(&self, kind: &str) -> Result<bool, FetchError> {
        Ok(self.sources.contains_key(kind))
    }

    fn provider_name(&self) -> &str {
        MEMORY_PROVIDER_NAME
    }
}
