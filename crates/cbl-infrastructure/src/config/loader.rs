//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, layered with figment:
//!
//! 1. `AppConfig::default()` with the loader section taken from the selected
//!    environment preset
//! 2. TOML configuration file (explicit path, or the first default location
//!    that exists)
//! 3. Environment variables with prefix, nested keys split on `__`
//!    (e.g. `CBL_LOADER__CACHE_TTL_MS=5000`)
//!
//! The preset is chosen by, in order: [`ConfigLoader::with_environment`], the
//! `CBL_ENV` variable, the `environment` key of the file or environment, and
//! finally `development`.

use crate::config::AppConfig;
use crate::config::types::environment::Environment;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use cbl_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use reqwest::Url;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Explicit preset, overriding every other selector
    environment: Option<Environment>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            environment: None,
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Force the environment preset
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let config_file = self.resolve_config_file();
        let environment = self.select_environment(config_file.as_deref())?;

        let figment = self.overrides(
            Figment::new().merge(Serialized::defaults(AppConfig::for_environment(environment))),
            config_file.as_deref(),
        );

        let mut app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;
        app_config.environment = environment;

        self.validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Merge the TOML file and prefixed environment variables over `figment`
    fn overrides(&self, mut figment: Figment, config_file: Option<&Path>) -> Figment {
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        )
    }

    fn resolve_config_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => {
                let exists = path.exists();
                log_config_loaded(path, exists);
                exists.then(|| path.clone())
            }
            None => {
                let path = Self::find_default_config_path()?;
                log_config_loaded(&path, true);
                Some(path)
            }
        }
    }

    fn select_environment(&self, config_file: Option<&Path>) -> Result<Environment> {
        if let Some(environment) = self.environment {
            return Ok(environment);
        }
        if let Ok(value) = env::var(ENVIRONMENT_ENV_VAR) {
            return value.parse();
        }
        let configured = self.overrides(Figment::new(), config_file);
        if configured.contains("environment") {
            return configured
                .extract_inner("environment")
                .config_context("Invalid `environment` setting");
        }
        Ok(Environment::default())
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Validate configuration values
    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        validate_app_config(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_loader_config(config)?;
    validate_source_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_loader_config(config: &AppConfig) -> Result<()> {
    if config.loader.retry_attempts == 0 {
        return Err(Error::configuration("Retry attempts cannot be 0"));
    }
    if config.loader.timeout_ms == 0 {
        return Err(Error::configuration("Fetch timeout cannot be 0"));
    }
    Ok(())
}

fn validate_source_config(config: &AppConfig) -> Result<()> {
    let endpoint = &config.source.endpoint;
    let url = Url::parse(endpoint)
        .config_context(format!("Invalid source endpoint `{endpoint}`"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration(format!(
            "Source endpoint must use http or https, got `{}`",
            url.scheme()
        )));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the defaults of `environment`
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            config: AppConfig::for_environment(environment),
        }
    }

    /// Set loader configuration
    pub fn with_loader(mut self, loader: cbl_domain::value_objects::LoaderConfig) -> Self {
        self.config.loader = loader;
        self
    }

    /// Set source endpoint configuration
    pub fn with_source(mut self, source: crate::config::SourceConfig) -> Self {
        self.config.source = source;
        self
    }

    /// Set the source endpoint URL
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.config.source.endpoint = endpoint.into();
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: crate::config::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
