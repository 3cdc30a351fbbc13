//! Component cache
//!
//! Keyed store of materialized components with lazy TTL expiry. The TTL is
//! read from the loader configuration on every call, so lowering it takes
//! effect for entries that are already stored.
//!
//! Expiry is enforced at read time: `get` and `has` delete an expired entry
//! before reporting it absent. [`ComponentCache::sweep`] is an optional eager
//! pass and is never needed for correctness.

use crate::config::SharedConfig;
use cbl_domain::ports::ExecutableComponent;
use cbl_domain::value_objects::in_family;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// A cached component. Entries are replaced, never mutated.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The materialized component
    pub component: ExecutableComponent,
    /// Cache key the entry is stored under
    pub identifier: String,
    /// Monotonic load time used for expiry
    pub loaded_at: Instant,
    /// Wall-clock load time for reporting
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(identifier: &str, component: ExecutableComponent) -> Self {
        Self {
            component,
            identifier: identifier.to_string(),
            loaded_at: Instant::now(),
            stored_at: Utc::now(),
        }
    }

    /// Age of the entry at `now`
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.loaded_at)
    }

    /// An entry whose age has reached `ttl` is expired; a zero TTL expires
    /// every entry immediately.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) >= ttl
    }
}

/// Snapshot of the cache contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of stored entries
    pub size: usize,
    /// Stored cache keys, sorted
    pub identifiers: Vec<String>,
}

/// Concurrent component cache with lazy TTL enforcement
pub struct ComponentCache {
    entries: DashMap<String, CacheEntry>,
    config: SharedConfig,
}

impl ComponentCache {
    /// Create an empty cache reading its TTL from `config`
    pub fn new(config: SharedConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
        }
    }

    fn ttl(&self) -> Duration {
        self.config.current().cache_ttl()
    }

    /// Remove `key` if it has expired. Returns true when an entry was removed.
    fn evict_if_expired(&self, key: &str) -> bool {
        let ttl = self.ttl();
        let now = Instant::now();
        let removed = self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(ttl, now))
            .is_some();
        if removed {
            debug!(key = key, ttl_ms = ttl.as_millis(), "Evicted expired component");
        }
        removed
    }

    /// Component stored under `key`, unless absent or expired
    pub fn get(&self, key: &str) -> Option<ExecutableComponent> {
        self.evict_if_expired(key);
        self.entries.get(key).map(|entry| entry.component.clone())
    }

    /// Full entry stored under `key`, unless absent or expired
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.evict_if_expired(key);
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Whether a live entry exists for `key`
    pub fn has(&self, key: &str) -> bool {
        self.evict_if_expired(key);
        self.entries.contains_key(key)
    }

    /// Store `component` under `key`, replacing any previous entry
    pub fn set(&self, key: &str, component: ExecutableComponent) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(key, component));
    }

    /// Remove `key`. Returns true if an entry existed.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove the default entry of `kind` and every variant of it
    pub fn delete_family(&self, kind: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let matches = in_family(key, kind);
            if matches {
                removed += 1;
            }
            !matches
        });
        removed
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Eagerly remove expired entries. Returns the number removed.
    pub fn sweep(&self) -> usize {
        let ttl = self.ttl();
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let expired = entry.is_expired(ttl, now);
            if expired {
                removed += 1;
            }
            !expired
        });
        if removed > 0 {
            debug!(removed = removed, "Swept expired components");
        }
        removed
    }

    /// Stored keys and their count. Expired entries not yet read or swept
    /// are included.
    pub fn stats(&self) -> CacheStats {
        let mut identifiers: Vec<String> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        identifiers.sort();
        CacheStats {
            size: identifiers.len(),
            identifiers,
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ComponentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCache")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl())
            .finish()
    }
}
