//! Component source fetcher
//!
//! Wraps a [`ComponentSourceProvider`] with the loader's timeout and retry
//! policy:
//!
//! - every attempt is bounded by `timeout`; an attempt that runs over is
//!   dropped, which cancels the in-flight request
//! - transport failures are retried up to `retry_attempts` in total, waiting a
//!   fixed `retry_delay` between attempts
//! - logical failures (`success: false`) and missing source text are returned
//!   after the first attempt
//!
//! The policy values are read from the live configuration on every attempt.

use crate::config::SharedConfig;
use cbl_domain::error::FetchError;
use cbl_domain::ports::ComponentSourceProvider;
use cbl_domain::value_objects::{ComponentId, ComponentSourceResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Retrieves component source text with timeout and fixed-delay retry
#[derive(Debug, Clone)]
pub struct ComponentFetcher {
    provider: Arc<dyn ComponentSourceProvider>,
    config: SharedConfig,
}

impl ComponentFetcher {
    /// Create a fetcher over `provider`
    pub fn new(provider: Arc<dyn ComponentSourceProvider>, config: SharedConfig) -> Self {
        Self { provider, config }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &Arc<dyn ComponentSourceProvider> {
        &self.provider
    }

    /// Fetch the source for `id`.
    ///
    /// # Returns
    /// A response that reported success and carries non-empty source text.
    ///
    /// # Errors
    /// - [`FetchError::Rejected`] / [`FetchError::EmptySource`] immediately
    /// - [`FetchError::Exhausted`] wrapping the last transport failure once
    ///   every attempt has failed
    pub async fn fetch(&self, id: &ComponentId) -> Result<ComponentSourceResponse, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let timeout = self.config.current().timeout();

            let error = match self.attempt(id, timeout).await {
                Ok(response) => return Self::accept(response),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            let attempts = self.config.current().attempts();
            if attempt >= attempts {
                warn!(
                    identifier = %id,
                    attempts = attempt,
                    error = %error,
                    "Fetch failed, giving up"
                );
                return Err(FetchError::Exhausted {
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            let delay = self.config.current().retry_delay();
            warn!(
                identifier = %id,
                attempt = attempt,
                attempts = attempts,
                delay_ms = delay.as_millis(),
                error = %error,
                "Fetch attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Ask the provider to invalidate `kind`, bounded by the configured timeout
    pub async fn invalidate(&self, kind: &str) -> Result<bool, FetchError> {
        let timeout = self.config.current().timeout();
        match tokio::time::timeout(timeout, self.provider.invalidate(kind)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout { after: timeout }),
        }
    }

    async fn attempt(
        &self,
        id: &ComponentId,
        timeout: Duration,
    ) -> Result<ComponentSourceResponse, FetchError> {
        debug!(
            identifier = %id,
            provider = self.provider.provider_name(),
            timeout_ms = timeout.as_millis(),
            "Fetching component source"
        );
        match tokio::time::timeout(timeout, self.provider.fetch_source(id)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout { after: timeout }),
        }
    }

    fn accept(response: ComponentSourceResponse) -> Result<ComponentSourceResponse, FetchError> {
        if !response.success {
            return Err(FetchError::Rejected {
                message: response
                    .error
                    .unwrap_or_else(|| "server reported failure".to_string()),
            });
        }
        if response.source_text().is_none() {
            return Err(FetchError::EmptySource);
        }
        Ok(response)
    }
}
