//! Domain layer constants
//!
//! Contains constants that are part of the domain logic and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `cbl_infrastructure::constants`.

// ============================================================================
// IDENTIFIER CONSTANTS
// ============================================================================

/// Separator between a component type and its variant in identifiers
pub const VARIANT_SEPARATOR: char = ':';

/// Query parameter carrying the variant on the source endpoint
pub const VARIANT_QUERY_PARAM: &str = "variant";

// ============================================================================
// LOADER DEFAULTS
// ============================================================================

/// Default TTL for cached components in milliseconds (5 minutes)
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;

/// Default number of fetch attempts
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between fetch attempts in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Default per-attempt timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// EXECUTION CONSTANTS
// ============================================================================

/// Reserved binding a component module must assign its render body to
pub const COMPONENT_EXPORT_BINDING: &str = "component";

/// Prefix for variables carrying render props
pub const PROPS_VARIABLE_PREFIX: &str = "props_";
