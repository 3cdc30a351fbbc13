//! Loader configuration value objects

use crate::constants::{
    DEFAULT_CACHE_TTL_MS, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Loader configuration
///
/// Durations are stored in milliseconds so the struct maps directly onto
/// TOML files and environment variables.
///
/// ```toml
/// [loader]
/// cache_enabled = true
/// cache_ttl_ms = 300000
/// retry_attempts = 3
/// retry_delay_ms = 1000
/// timeout_ms = 10000
/// coalesce_in_flight = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Whether loaded components are cached
    pub cache_enabled: bool,

    /// Maximum age of a cached component in milliseconds
    pub cache_ttl_ms: u64,

    /// Total number of fetch attempts (at least 1)
    pub retry_attempts: u32,

    /// Fixed delay between fetch attempts in milliseconds
    pub retry_delay_ms: u64,

    /// Per-attempt fetch timeout in milliseconds
    pub timeout_ms: u64,

    /// Share one fetch between concurrent loads of the same key
    pub coalesce_in_flight: bool,
}

/// Returns the default loader configuration:
/// - caching enabled with a 5 minute TTL
/// - 3 attempts with 1 second between them
/// - 10 second timeout per attempt
/// - in-flight loads coalesced
impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            coalesce_in_flight: true,
        }
    }
}

impl LoaderConfig {
    /// Cache TTL as a duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Retry delay as a duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Per-attempt timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of attempts, never less than one
    pub fn attempts(&self) -> u32 {
        self.retry_attempts.max(1)
    }

    /// Return a copy with `patch` merged in
    pub fn merged(&self, patch: &LoaderConfigPatch) -> Self {
        let mut config = self.clone();
        config.apply(patch);
        config
    }

    /// Merge `patch` into this configuration.
    ///
    /// `retry_attempts` is clamped to at least 1.
    pub fn apply(&mut self, patch: &LoaderConfigPatch) {
        if let Some(enabled) = patch.cache_enabled {
            self.cache_enabled = enabled;
        }
        if let Some(ttl) = patch.cache_ttl_ms {
            self.cache_ttl_ms = ttl;
        }
        if let Some(attempts) = patch.retry_attempts {
            self.retry_attempts = attempts.max(1);
        }
        if let Some(delay) = patch.retry_delay_ms {
            self.retry_delay_ms = delay;
        }
        if let Some(timeout) = patch.timeout_ms {
            self.timeout_ms = timeout;
        }
        if let Some(coalesce) = patch.coalesce_in_flight {
            self.coalesce_in_flight = coalesce;
        }
    }
}

/// Partial loader configuration accepted by `configure`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfigPatch {
    /// New value for `cache_enabled`
    pub cache_enabled: Option<bool>,
    /// New value for `cache_ttl_ms`
    pub cache_ttl_ms: Option<u64>,
    /// New value for `retry_attempts`
    pub retry_attempts: Option<u32>,
    /// New value for `retry_delay_ms`
    pub retry_delay_ms: Option<u64>,
    /// New value for `timeout_ms`
    pub timeout_ms: Option<u64>,
    /// New value for `coalesce_in_flight`
    pub coalesce_in_flight: Option<bool>,
}

impl LoaderConfigPatch {
    /// Empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable caching
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Set the cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_ms = Some(duration_millis(ttl));
        self
    }

    /// Set the number of fetch attempts
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    /// Set the delay between fetch attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = Some(duration_millis(delay));
        self
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(duration_millis(timeout));
        self
    }

    /// Enable or disable in-flight coalescing
    pub fn with_coalesce_in_flight(mut self, coalesce: bool) -> Self {
        self.coalesce_in_flight = Some(coalesce);
        self
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<&LoaderConfig> for LoaderConfigPatch {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            cache_enabled: Some(config.cache_enabled),
            cache_ttl_ms: Some(config.cache_ttl_ms),
            retry_attempts: Some(config.retry_attempts),
            retry_delay_ms: Some(config.retry_delay_ms),
            timeout_ms: Some(config.timeout_ms),
            coalesce_in_flight: Some(config.coalesce_in_flight),
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
