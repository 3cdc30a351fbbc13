//! Provider Constants
//!
//! Constants specific to provider implementations. Domain defaults live in
//! `cbl-domain`.

// ============================================================================
// SOURCE PROVIDER CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Name reported by the HTTP source provider
pub const HTTP_PROVIDER_NAME: &str = "http";

/// Name reported by the in-memory source provider
pub const MEMORY_PROVIDER_NAME: &str = "memory";

/// Body substituted when an error response body cannot be read
pub const UNREADABLE_BODY: &str = "<unreadable body>";

// ============================================================================
// COMPILER CONSTANTS
// ============================================================================

/// Name reported by the expression compiler
pub const EXPRESSION_COMPILER_NAME: &str = "evalexpr";
