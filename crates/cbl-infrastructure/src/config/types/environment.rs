//! Environment presets
//!
//! Selects loader timings for the deployment the process runs in:
//!
//! | Preset | cache_ttl | retry_attempts | retry_delay | timeout |
//! |--------|-----------|----------------|-------------|---------|
//! | development | 60 s | 2 | 500 ms | 15 s |
//! | production | 30 min | 3 | 1000 ms | 10 s |
//! | test | 1 s | 1 | 10 ms | 2 s |

use crate::constants::*;
use cbl_domain::error::{Error, Result};
use cbl_domain::value_objects::{LoaderConfig, LoaderConfigPatch};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Named configuration preset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Short TTL, generous timeout
    #[default]
    Development,
    /// Long TTL
    Production,
    /// Minimal timings for test suites
    Test,
}

impl Environment {
    /// Every preset
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Production,
        Environment::Test,
    ];

    /// Preset name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    /// Loader settings of this preset, as a patch for `configure`
    pub fn preset(self) -> LoaderConfigPatch {
        let (ttl, attempts, delay, timeout) = match self {
            Self::Development => (
                DEVELOPMENT_CACHE_TTL_MS,
                DEVELOPMENT_RETRY_ATTEMPTS,
                DEVELOPMENT_RETRY_DELAY_MS,
                DEVELOPMENT_TIMEOUT_MS,
            ),
            Self::Production => (
                PRODUCTION_CACHE_TTL_MS,
                PRODUCTION_RETRY_ATTEMPTS,
                PRODUCTION_RETRY_DELAY_MS,
                PRODUCTION_TIMEOUT_MS,
            ),
            Self::Test => (
                TEST_CACHE_TTL_MS,
                TEST_RETRY_ATTEMPTS,
                TEST_RETRY_DELAY_MS,
                TEST_TIMEOUT_MS,
            ),
        };
        LoaderConfigPatch::new()
            .with_cache_ttl(Duration::from_millis(ttl))
            .with_retry_attempts(attempts)
            .with_retry_delay(Duration::from_millis(delay))
            .with_timeout(Duration::from_millis(timeout))
    }

    /// Default loader configuration with this preset applied
    pub fn loader_config(self) -> LoaderConfig {
        LoaderConfig::default().merged(&self.preset())
    }

    /// Preset named by `CBL_ENV`, if set and valid
    pub fn from_env() -> Option<Self> {
        std::env::var(ENVIRONMENT_ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(Error::configuration(format!(
                "Unknown environment `{other}`. Use development, production or test"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
