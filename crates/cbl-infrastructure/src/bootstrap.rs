//! Loader assembly
//!
//! Builds a [`ComponentLoader`] from an [`AppConfig`]: a pooled reqwest client
//! for the configured source endpoint and the expression compiler.

use crate::config::{AppConfig, SourceConfig};
use crate::error_ext::ErrorContext;
use cbl_application::ComponentLoader;
use cbl_domain::error::Result;
use cbl_domain::ports::{Compiler, ComponentSourceProvider};
use cbl_domain::value_objects::{LoaderConfig, LoaderConfigPatch};
use cbl_providers::{ExpressionCompiler, HttpSourceProvider};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Create the HTTP client used to reach the source endpoint
///
/// No overall request timeout is set here; the fetcher bounds every attempt
/// with the live `timeout` setting instead.
pub fn create_http_client(source: &SourceConfig) -> Result<Client> {
    Client::builder()
        .user_agent(&source.user_agent)
        .connect_timeout(source.pool.connect_timeout())
        .pool_idle_timeout(source.pool.idle_timeout())
        .pool_max_idle_per_host(source.pool.max_idle_per_host)
        .build()
        .network_context("Failed to create HTTP client")
}

/// Create the HTTP source provider for `source.endpoint`
pub fn create_source_provider(source: &SourceConfig) -> Result<Arc<dyn ComponentSourceProvider>> {
    let client = create_http_client(source)?;
    let provider = HttpSourceProvider::new(&source.endpoint, client)?;
    Ok(Arc::new(provider))
}

/// Create the default compiler
pub fn create_compiler() -> Arc<dyn Compiler> {
    Arc::new(ExpressionCompiler::new())
}

/// Loader over the configured HTTP endpoint
pub fn build_loader(config: &AppConfig) -> Result<ComponentLoader> {
    let provider = create_source_provider(&config.source)?;
    Ok(build_loader_with(provider, config))
}

/// Loader over any `provider`, with the expression compiler and `config`'s
/// loader section applied through `configure`
pub fn build_loader_with(
    provider: Arc<dyn ComponentSourceProvider>,
    config: &AppConfig,
) -> ComponentLoader {
    let loader = ComponentLoader::new(provider, create_compiler(), LoaderConfig::default());
    loader.configure(&LoaderConfigPatch::from(&config.loader));
    info!(
        environment = %config.environment,
        endpoint = %config.source.endpoint,
        "Component loader ready"
    );
    loader
}
