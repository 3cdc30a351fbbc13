//! HTTP Source Provider
//!
//! Talks to the component source endpoint:
//!
//! | Request | Response |
//! |---------|----------|
//! | `GET <root>/<type>[?variant=<v>]` | [`ComponentSourceResponse`] |
//! | `DELETE <root>/<type>` | [`InvalidationAck`] |
//!
//! One request per call. The fetcher in the application layer applies the
//! timeout and retry policy.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::debug;

use cbl_domain::constants::VARIANT_QUERY_PARAM;
use cbl_domain::error::{Error, FetchError, Result};
use cbl_domain::ports::ComponentSourceProvider;
use cbl_domain::value_objects::{ComponentId, ComponentSourceResponse, InvalidationAck};

use crate::constants::{CONTENT_TYPE_JSON, HTTP_PROVIDER_NAME};
use crate::utils::HttpResponseUtils;

/// HTTP source provider
///
/// Receives its HTTP client via constructor injection.
///
/// ## Example
///
/// ```rust,no_run
/// use cbl_providers::source::HttpSourceProvider;
/// use reqwest::Client;
///
/// fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = HttpSourceProvider::new("https://builder.example.com/api/components", Client::new())?;
///     assert_eq!(provider.endpoint().path(), "/api/components");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpSourceProvider {
    endpoint: Url,
    http_client: Client,
}

impl HttpSourceProvider {
    /// Create a provider for the endpoint rooted at `endpoint`
    ///
    /// # Errors
    /// [`Error::Configuration`] if `endpoint` is not an absolute http(s) URL
    pub fn new(endpoint: &str, http_client: Client) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            Error::configuration_with_source(format!("invalid source endpoint `{endpoint}`"), e)
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "source endpoint must be an http(s) URL, got `{endpoint}`"
            )));
        }
        Ok(Self {
            endpoint,
            http_client,
        })
    }

    /// Root URL of the source endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL for `kind`, with the variant as a query parameter
    pub fn component_url(&self, kind: &str, variant: Option<&str>) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Error::configuration("source endpoint cannot be a base URL"))?
            .pop_if_empty()
            .push(kind);
        if let Some(variant) = variant {
            url.query_pairs_mut()
                .append_pair(VARIANT_QUERY_PARAM, variant);
        }
        Ok(url)
    }

    fn url_for(&self, kind: &str, variant: Option<&str>) -> std::result::Result<Url, FetchError> {
        self.component_url(kind, variant)
            .map_err(|e| FetchError::transport(e.to_string()))
    }
}

#[async_trait]
impl ComponentSourceProvider for HttpSourceProvider {
    async fn fetch_source(
        &self,
        id: &ComponentId,
    ) -> std::result::Result<ComponentSourceResponse, FetchError> {
        let url = self.url_for(id.kind(), id.variant())?;
        debug!(url = %url, "GET component source");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, CONTENT_TYPE_JSON)
            .send()
            .await
            .map_err(HttpResponseUtils::send_error)?;

        HttpResponseUtils::check_and_parse(response).await
    }

    async fn invalidate(&self, kind: &str) -> std::result::Result<bool, FetchError> {
        let url = self.url_for(kind, None)?;
        debug!(url = %url, "DELETE component source");

        let response = self
            .http_client
            .delete(url)
            .header(ACCEPT, CONTENT_TYPE_JSON)
            .send()
            .await
            .map_err(HttpResponseUtils::send_error)?;

        let body = HttpResponseUtils::check_status(response).await?;
        if body.trim().is_empty() {
            return Ok(true);
        }
        // A 2xx with a body that is not an acknowledgement still counts.
        Ok(serde_json::from_str::<InvalidationAck>(&body)
            .map(|ack| ack.success)
            .unwrap_or(true))
    }

    fn provider_name(&self) -> &str {
        HTTP_PROVIDER_NAME
    }
}
