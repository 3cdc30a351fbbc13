//! Source endpoint payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by the component source endpoint.
///
/// ```json
/// { "success": true, "sourceText": "component = \"...\"", "identifier": "HERO" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSourceResponse {
    /// Whether the server considers the request successful
    pub success: bool,

    /// Component source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,

    /// Identifier echoed by the server
    #[serde(default)]
    pub identifier: String,

    /// Server-side error message when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When the server produced the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_at: Option<DateTime<Utc>>,
}

impl ComponentSourceResponse {
    /// Successful response carrying `source_text`
    pub fn ok<I: Into<String>, S: Into<String>>(identifier: I, source_text: S) -> Self {
        Self {
            success: true,
            source_text: Some(source_text.into()),
            identifier: identifier.into(),
            error: None,
            served_at: Some(Utc::now()),
        }
    }

    /// Logical failure response
    pub fn failure<I: Into<String>, S: Into<String>>(identifier: I, error: S) -> Self {
        Self {
            success: false,
            source_text: None,
            identifier: identifier.into(),
            error: Some(error.into()),
            served_at: Some(Utc::now()),
        }
    }

    /// Source text, if present and non-blank
    pub fn source_text(&self) -> Option<&str> {
        self.source_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Acknowledgement returned by the invalidation endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidationAck {
    /// Whether the server dropped its copy
    #[serde(default)]
    pub success: bool,

    /// Identifier echoed by the server
    #[serde(default)]
    pub identifier: String,
}
