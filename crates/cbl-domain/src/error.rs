//! Error handling types
//!
//! Two families live here:
//!
//! - [`Error`]: the general error type used by configuration, logging,
//!   rendering and the command-line surface.
//! - [`FetchError`], [`ExecutionError`], [`LoadFailure`] and [`LoadError`]:
//!   the load path. These are `Clone` so that callers waiting on the same
//!   in-flight load can each receive the outcome.

use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Component Block Loader
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A loaded component failed while rendering
    #[error("Render error in `{identifier}`: {message}")]
    Render {
        /// Identifier of the component being rendered
        identifier: String,
        /// Description of the failure
        message: String,
    },

    /// Component load failure surfaced through the general error type
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render<I: Into<String>, S: Into<String>>(identifier: I, message: S) -> Self {
        Self::Render {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// ============================================================================
// LOAD PATH ERRORS
// ============================================================================

/// Failure while retrieving component source text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("request failed: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The server answered with a non-success status code
    #[error("server responded with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The attempt exceeded the configured timeout and was cancelled
    #[error("request timed out after {after:?}")]
    Timeout {
        /// The timeout that was exceeded
        after: Duration,
    },

    /// The response body could not be decoded
    #[error("invalid response body: {message}")]
    Decode {
        /// Description of the decoding failure
        message: String,
    },

    /// The server reported a logical failure (`success: false`)
    #[error("server rejected the request: {message}")]
    Rejected {
        /// Error message reported by the server
        message: String,
    },

    /// The server reported success but sent no source text
    #[error("server returned no source text")]
    EmptySource,

    /// Every attempt failed with a transport failure
    #[error("gave up after {attempts} attempt(s): {last}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// The failure of the final attempt
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether another attempt could succeed.
    ///
    /// Only transport-level failures are retried; logical failures and
    /// missing source text are answers from the server, not accidents.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Timeout { .. } | Self::Decode { .. }
        )
    }
}

/// Failure while turning source text into a callable component
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Parsing or evaluating the source failed
    #[error("component `{identifier}` failed to evaluate: {message}")]
    Evaluation {
        /// Component identifier
        identifier: String,
        /// Evaluator message
        message: String,
    },

    /// The exported value cannot be used as a component
    #[error("component `{identifier}` did not produce a callable value: {found}")]
    NotCallable {
        /// Component identifier
        identifier: String,
        /// Description of what was found instead
        found: String,
    },

    /// The source never bound the exported value
    #[error("component `{identifier}` produced no value for `{binding}`")]
    NoExport {
        /// Component identifier
        identifier: String,
        /// The reserved binding that was expected
        binding: String,
    },
}

impl ExecutionError {
    /// Identifier of the component that failed
    pub fn identifier(&self) -> &str {
        match self {
            Self::Evaluation { identifier, .. }
            | Self::NotCallable { identifier, .. }
            | Self::NoExport { identifier, .. } => identifier,
        }
    }
}

/// Cause of a failed load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// Source retrieval failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Materialization failed
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The identifier cannot name a component
    #[error("invalid component identifier: {message}")]
    InvalidIdentifier {
        /// Why the identifier was refused
        message: String,
    },
}

/// Normalized error returned by every failed load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadError {
    /// Human-readable summary
    pub message: String,
    /// Identifier that was requested (without variant)
    pub identifier: String,
    /// When the failure was observed
    pub occurred_at: DateTime<Utc>,
    /// Underlying failure
    #[source]
    pub cause: LoadFailure,
}

impl LoadError {
    /// Build a load error for `identifier`, stamped with the current time
    pub fn new<S: Into<String>, C: Into<LoadFailure>>(identifier: S, cause: C) -> Self {
        let identifier = identifier.into();
        let cause = cause.into();
        Self {
            message: format!("Failed to load component `{identifier}`: {cause}"),
            identifier,
            occurred_at: Utc::now(),
            cause,
        }
    }

    /// Whether the failure came from source retrieval
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self.cause, LoadFailure::Fetch(_))
    }

    /// Whether the failure came from materialization
    pub fn is_execution_failure(&self) -> bool {
        matches!(self.cause, LoadFailure::Execution(_))
    }
}
