//! HTTP Response Utilities
//!
//! Helpers for turning source endpoint responses into typed bodies.

use crate::constants::UNREADABLE_BODY;
use cbl_domain::error::FetchError;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse the JSON body
    ///
    /// # Errors
    /// - [`FetchError::Status`] for a non-2xx status, carrying the body
    /// - [`FetchError::Transport`] if the body cannot be read
    /// - [`FetchError::Decode`] if the body is not the expected JSON
    pub async fn check_and_parse<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
        let body = Self::check_status(response).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::decode(e.to_string()))
    }

    /// Check response status and return the raw body
    pub async fn check_status(response: Response) -> Result<String, FetchError> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| UNREADABLE_BODY.to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(format!("failed to read response body: {e}")))
    }

    /// Map a send failure to a fetch error
    pub fn send_error(error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::transport(format!("request timed out: {error}"))
        } else {
            FetchError::transport(format!("HTTP request failed: {error}"))
        }
    }
}
