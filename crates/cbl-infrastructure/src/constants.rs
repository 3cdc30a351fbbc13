//! Infrastructure constants
//!
//! Configuration file locations, environment variable names and preset values.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cbl.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cbl";

/// Prefix of environment variables overriding configuration
pub const CONFIG_ENV_PREFIX: &str = "CBL";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Environment variable selecting the configuration preset
pub const ENVIRONMENT_ENV_VAR: &str = "CBL_ENV";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV_VAR: &str = "CBL_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "cbl";

// ============================================================================
// SOURCE ENDPOINT CONSTANTS
// ============================================================================

/// Default root of the component source endpoint
pub const DEFAULT_SOURCE_ENDPOINT: &str = "http://127.0.0.1:8080/api/components";

/// Default User-Agent sent to the source endpoint
pub const DEFAULT_USER_AGENT: &str = concat!("cbl/", env!("CARGO_PKG_VERSION"));

/// Default TCP connect timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default idle connection lifetime in seconds
pub const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Default idle connections kept per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 8;

// ============================================================================
// ENVIRONMENT PRESETS
// ============================================================================

/// Development cache TTL (1 minute)
pub const DEVELOPMENT_CACHE_TTL_MS: u64 = 60_000;
/// Development fetch attempts
pub const DEVELOPMENT_RETRY_ATTEMPTS: u32 = 2;
/// Development retry delay
pub const DEVELOPMENT_RETRY_DELAY_MS: u64 = 500;
/// Development per-attempt timeout
pub const DEVELOPMENT_TIMEOUT_MS: u64 = 15_000;

/// Production cache TTL (30 minutes)
pub const PRODUCTION_CACHE_TTL_MS: u64 = 1_800_000;
/// Production fetch attempts
pub const PRODUCTION_RETRY_ATTEMPTS: u32 = 3;
/// Production retry delay
pub const PRODUCTION_RETRY_DELAY_MS: u64 = 1_000;
/// Production per-attempt timeout
pub const PRODUCTION_TIMEOUT_MS: u64 = 10_000;

/// Test cache TTL (1 second)
pub const TEST_CACHE_TTL_MS: u64 = 1_000;
/// Test fetch attempts
pub const TEST_RETRY_ATTEMPTS: u32 = 1;
/// Test retry delay
pub const TEST_RETRY_DELAY_MS: u64 = 10;
/// Test per-attempt timeout
pub const TEST_TIMEOUT_MS: u64 = 2_000;
