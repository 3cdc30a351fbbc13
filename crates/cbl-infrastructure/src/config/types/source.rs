//! Source endpoint configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Source endpoint configuration
///
/// ```toml
/// [source]
/// endpoint = "https://builder.example.com/api/components"
/// user_agent = "cbl/0.1.0"
///
/// [source.pool]
/// connect_timeout_ms = 5000
/// idle_timeout_secs = 90
/// max_idle_per_host = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root URL of the component source endpoint
    pub endpoint: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Connection pool settings
    pub pool: PoolConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SOURCE_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool: PoolConfig::default(),
        }
    }
}

/// HTTP connection pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// How long an idle connection is kept, in seconds
    pub idle_timeout_secs: u64,

    /// Idle connections kept per host
    pub max_idle_per_host: usize,
}

impl PoolConfig {
    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Idle timeout as a duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            idle_timeout_secs: DEFAULT_POOL_IDLE_TIMEOUT_SECS,
            max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }
}
