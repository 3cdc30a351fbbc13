//! Tests for the live configuration handle

use crate::test_utils::test_fixtures::{shared_config, test_config};
use cbl_domain::value_objects::LoaderConfigPatch;
use std::time::Duration;

#[test]
fn test_configure_is_visible_to_clones() {
    let config = shared_config();
    let observer = config.clone();

    let updated = config.configure(
        &LoaderConfigPatch::new()
            .with_cache_enabled(false)
            .with_retry_delay(Duration::from_millis(250)),
    );

    assert!(!updated.cache_enabled);
    assert!(!observer.current().cache_enabled);
    assert_eq!(observer.current().retry_delay(), Duration::from_millis(250));
    assert_eq!(observer.current().timeout_ms, test_config().timeout_ms);
}

#[test]
fn test_configure_clamps_retry_attempts() {
    let config = shared_config();
    let updated = config.configure(&LoaderConfigPatch::new().with_retry_attempts(0));
    assert_eq!(updated.retry_attempts, 1);
}

#[test]
fn test_replace_swaps_whole_config() {
    let config = shared_config();
    let mut next = test_config();
    next.cache_ttl_ms = 1;
    config.replace(next);
    assert_eq!(config.current().cache_ttl(), Duration::from_millis(1));
}
