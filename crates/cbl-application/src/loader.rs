//! Component loader
//!
//! Orchestrates a load: cache lookup, then fetch, materialize and cache
//! population on a miss. Every failure is normalized into a [`LoadError`];
//! nothing is cached for a failed load.
//!
//! ## In-flight coalescing
//!
//! With `coalesce_in_flight` and `cache_enabled` both on, concurrent loads of
//! the same cache key share one fetch and one materialization through a
//! pending-request map. Otherwise each concurrent miss fetches on its own and
//! the cache keeps whichever result is written last.
//!
//! ## Invalidation
//!
//! [`ComponentLoader::invalidate`] bumps a per-type epoch, forgets the pending
//! loads of the type and then deletes its cache entries. A load started before
//! the bump still resolves for the callers already waiting on it, but its
//! result is not written to the cache.

use crate::cache::{CacheStats, ComponentCache};
use crate::config::SharedConfig;
use crate::executor::Executor;
use crate::fetcher::ComponentFetcher;
use crate::preloader::{PreloadReport, Preloader};
use cbl_domain::error::{FetchError, LoadError, LoadFailure};
use cbl_domain::ports::{Compiler, ComponentSourceProvider, ExecutableComponent};
use cbl_domain::value_objects::{ComponentId, LoaderConfig, LoaderConfigPatch, in_family};
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

type PendingLoad = Shared<BoxFuture<'static, Result<ExecutableComponent, LoadError>>>;

struct PendingEntry {
    ticket: u64,
    load: PendingLoad,
}

/// Result of [`ComponentLoader::invalidate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invalidation {
    /// Whether the source endpoint acknowledged the invalidation
    pub acknowledged: bool,
    /// Number of local cache entries removed
    pub removed: usize,
}

struct LoaderInner {
    config: SharedConfig,
    cache: ComponentCache,
    fetcher: ComponentFetcher,
    executor: Executor,
    pending: DashMap<String, PendingEntry>,
    tickets: AtomicU64,
    /// Invalidation count per component type
    epochs: DashMap<String, u64>,
}

/// Loads, materializes and caches components.
///
/// Cloning is cheap and every clone shares the same cache and configuration.
///
/// # Example
///
/// ```ignore
/// let loader = ComponentLoader::new(provider, compiler, LoaderConfig::default());
/// let hero = loader.load("HERO", None).await?;
/// let dark = loader.load("HERO", Some("dark")).await?;
/// ```
#[derive(Clone)]
pub struct ComponentLoader {
    inner: Arc<LoaderInner>,
}

impl ComponentLoader {
    /// Create a loader over `provider` and `compiler`
    pub fn new(
        provider: Arc<dyn ComponentSourceProvider>,
        compiler: Arc<dyn Compiler>,
        config: LoaderConfig,
    ) -> Self {
        let config = SharedConfig::new(config);
        Self {
            inner: Arc::new(LoaderInner {
                cache: ComponentCache::new(config.clone()),
                fetcher: ComponentFetcher::new(provider, config.clone()),
                executor: Executor::new(compiler),
                pending: DashMap::new(),
                tickets: AtomicU64::new(0),
                epochs: DashMap::new(),
                config,
            }),
        }
    }

    /// Load `kind`, or its `variant` when given
    pub async fn load(
        &self,
        kind: &str,
        variant: Option<&str>,
    ) -> Result<ExecutableComponent, LoadError> {
        self.load_id(&ComponentId::from_parts(kind, variant)).await
    }

    /// Load the component named by `id`.
    ///
    /// A cache hit returns without suspending.
    pub async fn load_id(&self, id: &ComponentId) -> Result<ExecutableComponent, LoadError> {
        if !id.has_kind() {
            return Err(LoaderInner::failed(
                id,
                LoadFailure::InvalidIdentifier {
                    message: "component type is empty".to_string(),
                },
            ));
        }

        let key = id.cache_key();
        let config = self.inner.config.current();

        if config.cache_enabled {
            if let Some(component) = self.inner.cache.get(&key) {
                debug!(key = %key, "Component cache hit");
                return Ok(component);
            }
        }

        if !config.cache_enabled || !config.coalesce_in_flight {
            return Arc::clone(&self.inner).load_uncached(id.clone()).await;
        }

        self.pending_load(&key, id).await
    }

    /// Join the in-flight load for `key`, starting one if none is running
    fn pending_load(&self, key: &str, id: &ComponentId) -> PendingLoad {
        self.inner
            .pending
            .entry(key.to_string())
            .or_insert_with(|| {
                let ticket = self.inner.tickets.fetch_add(1, Ordering::Relaxed);
                let inner = Arc::clone(&self.inner);
                let id = id.clone();
                let key = key.to_string();
                let load = async move {
                    let result = Arc::clone(&inner).load_uncached(id).await;
                    // an invalidation may have replaced this entry
                    inner
                        .pending
                        .remove_if(&key, |_, entry| entry.ticket == ticket);
                    result
                }
                .boxed()
                .shared();
                PendingEntry { ticket, load }
            })
            .load
            .clone()
    }

    /// Preload `ids`, ignoring individual failures
    pub async fn preload<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Preloader::new(self.clone()).preload(ids).await;
    }

    /// Preload `ids` and report which succeeded
    pub async fn preload_with_report<I, S>(&self, ids: I) -> PreloadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Preloader::new(self.clone()).preload_with_report(ids).await
    }

    /// Merge `patch` into the configuration. Later operations see the new
    /// values immediately.
    pub fn configure(&self, patch: &LoaderConfigPatch) -> Arc<LoaderConfig> {
        let config = self.inner.config.configure(patch);
        info!(
            cache_enabled = config.cache_enabled,
            cache_ttl_ms = config.cache_ttl_ms,
            retry_attempts = config.retry_attempts,
            retry_delay_ms = config.retry_delay_ms,
            timeout_ms = config.timeout_ms,
            coalesce_in_flight = config.coalesce_in_flight,
            "Loader configured"
        );
        config
    }

    /// Current configuration
    pub fn config(&self) -> Arc<LoaderConfig> {
        self.inner.config.current()
    }

    /// The loader's cache
    pub fn cache(&self) -> &ComponentCache {
        &self.inner.cache
    }

    /// Drop every cached component
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
        debug!("Component cache cleared");
    }

    /// Cache contents
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// Drop the cached component stored under `key`
    pub fn evict(&self, key: &str) -> bool {
        self.inner.cache.delete(key)
    }

    /// Eagerly drop expired components
    pub fn sweep_cache(&self) -> usize {
        self.inner.cache.sweep()
    }

    /// Invalidate `kind` on the source endpoint and drop its local entries,
    /// variants included.
    ///
    /// Local entries and pending loads are dropped even when the remote call
    /// fails.
    pub async fn invalidate(&self, kind: &str) -> Result<Invalidation, FetchError> {
        let removed = {
            let mut epoch = self.inner.epochs.entry(kind.to_string()).or_insert(0);
            *epoch += 1;
            self.inner.pending.retain(|key, _| !in_family(key, kind));
            self.inner.cache.delete_family(kind)
        };
        let acknowledged = self.inner.fetcher.invalidate(kind).await?;
        if acknowledged {
            info!(kind = kind, removed = removed, "Component invalidated");
        } else {
            warn!(
                kind = kind,
                removed = removed,
                "Source endpoint did not acknowledge invalidation"
            );
        }
        Ok(Invalidation {
            acknowledged,
            removed,
        })
    }
}

impl LoaderInner {
    async fn load_uncached(self: Arc<Self>, id: ComponentId) -> Result<ExecutableComponent, LoadError> {
        let key = id.cache_key();
        let epoch = self.epochs.get(id.kind()).map_or(0, |epoch| *epoch);
        debug!(key = %key, "Component cache miss, fetching");

        let response = self
            .fetcher
            .fetch(&id)
            .await
            .map_err(|error| Self::failed(&id, error))?;
        let Some(source) = response.source_text() else {
            return Err(Self::failed(&id, FetchError::EmptySource));
        };

        let component = self
            .executor
            .materialize(source, &key)
            .map_err(|error| Self::failed(&id, error))?;

        if self.config.current().cache_enabled {
            // held across the write so an invalidation cannot slip in between
            let current = self.epochs.entry(id.kind().to_string()).or_insert(0);
            if *current == epoch {
                self.cache.set(&key, Arc::clone(&component));
            } else {
                debug!(key = %key, "Component invalidated while loading, not cached");
            }
        }
        debug!(key = %key, "Component loaded");
        Ok(component)
    }

    fn failed<C: Into<LoadFailure>>(id: &ComponentId, cause: C) -> LoadError {
        let error = LoadError::new(id.kind(), cause);
        warn!(identifier = %id, error = %error.cause, "Component load failed");
        error
    }
}

impl fmt::Debug for ComponentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentLoader")
            .field("config", &self.inner.config)
            .field("cache", &self.inner.cache)
            .field("pending", &self.inner.pending.len())
            .finish()
    }
}
