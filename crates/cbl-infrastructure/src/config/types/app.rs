//! Main application configuration

use cbl_domain::value_objects::LoaderConfig;
use serde::{Deserialize, Serialize};

pub use super::environment::Environment;
pub use super::logging::LoggingConfig;
pub use super::source::{PoolConfig, SourceConfig};

/// Complete application configuration
///
/// ```toml
/// environment = "production"
///
/// [loader]
/// cache_enabled = true
/// cache_ttl_ms = 1800000
/// retry_attempts = 3
/// retry_delay_ms = 1000
/// timeout_ms = 10000
/// coalesce_in_flight = true
///
/// [source]
/// endpoint = "https://builder.example.com/api/components"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Preset the loader section starts from
    pub environment: Environment,

    /// Loader behavior
    pub loader: LoaderConfig,

    /// Source endpoint
    pub source: SourceConfig,

    /// Logging
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults with the loader section taken from `environment`'s preset
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            loader: environment.loader_config(),
            ..Self::default()
        }
    }
}
