//! Component Source Provider Port
//!
//! Port for backends that serve component source text. The HTTP provider
//! talks to the source endpoint; the in-memory provider serves a fixed bundle.
//!
//! A provider performs exactly one attempt per call. Timeouts and retries are
//! applied by the fetcher in the application layer so every provider gets the
//! same policy.

use crate::error::FetchError;
use crate::value_objects::{ComponentId, ComponentSourceResponse};
use async_trait::async_trait;

/// Component Source Provider Port
///
/// # Example
///
/// ```ignore
/// use cbl_domain::ports::ComponentSourceProvider;
/// use cbl_domain::value_objects::ComponentId;
///
/// let response = provider.fetch_source(&ComponentId::new("HERO")).await?;
/// if let Some(text) = response.source_text() {
///     println!("{} bytes of source", text.len());
/// }
/// ```
#[async_trait]
pub trait ComponentSourceProvider: Send + Sync + std::fmt::Debug {
    /// Fetch the source for `id` in a single attempt
    ///
    /// # Returns
    /// The decoded response body. Logical failures (`success: false`) are
    /// returned as `Ok` and classified by the caller.
    async fn fetch_source(&self, id: &ComponentId)
    -> Result<ComponentSourceResponse, FetchError>;

    /// Ask the backend to drop its copy of `kind`
    ///
    /// # Returns
    /// True if the backend acknowledged the invalidation
    async fn invalidate(&self, kind: &str) -> Result<bool, FetchError>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
