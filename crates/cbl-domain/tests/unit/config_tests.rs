//! Unit tests for loader configuration

use cbl_domain::constants::{DEFAULT_CACHE_TTL_MS, DEFAULT_RETRY_ATTEMPTS};
use cbl_domain::value_objects::{LoaderConfig, LoaderConfigPatch};
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = LoaderConfig::default();
    assert!(config.cache_enabled);
    assert!(config.coalesce_in_flight);
    assert_eq!(config.cache_ttl_ms, DEFAULT_CACHE_TTL_MS);
    assert_eq!(config.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
    assert_eq!(config.timeout(), Duration::from_secs(10));
}

#[test]
fn test_patch_only_touches_given_fields() {
    let config = LoaderConfig::default();
    let patch = LoaderConfigPatch::new().with_cache_ttl(Duration::ZERO);

    let merged = config.merged(&patch);

    assert_eq!(merged.cache_ttl_ms, 0);
    assert_eq!(merged.retry_attempts, config.retry_attempts);
    assert_eq!(merged.retry_delay_ms, config.retry_delay_ms);
    assert!(merged.cache_enabled);
}

#[test]
fn test_patch_clamps_retry_attempts() {
    let mut config = LoaderConfig::default();
    config.apply(&LoaderConfigPatch::new().with_retry_attempts(0));
    assert_eq!(config.retry_attempts, 1);
}

#[test]
fn test_attempts_never_below_one() {
    let config = LoaderConfig {
        retry_attempts: 0,
        ..LoaderConfig::default()
    };
    assert_eq!(config.attempts(), 1);
}

#[test]
fn test_empty_patch() {
    assert!(LoaderConfigPatch::new().is_empty());
    assert!(!LoaderConfigPatch::new().with_cache_enabled(false).is_empty());
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: LoaderConfig = serde_json::from_str(r#"{"retry_attempts": 5}"#).unwrap();
    assert_eq!(config.retry_attempts, 5);
    assert_eq!(config.cache_ttl_ms, DEFAULT_CACHE_TTL_MS);
}

#[test]
fn test_full_patch_from_config() {
    let config = LoaderConfig {
        cache_enabled: false,
        cache_ttl_ms: 42,
        ..LoaderConfig::default()
    };
    let patch = LoaderConfigPatch::from(&config);
    assert_eq!(LoaderConfig::default().merged(&patch), config);
}
