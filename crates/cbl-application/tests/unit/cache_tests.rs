//! Tests for the component cache

use crate::test_utils::mock_providers::stub_component;
use crate::test_utils::test_fixtures::shared_config;
use cbl_application::ComponentCache;
use cbl_domain::value_objects::LoaderConfigPatch;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_get_returns_stored_component() {
    let cache = ComponentCache::new(shared_config());
    cache.set("HERO", stub_component("HERO"));

    let component = cache.get("HERO").expect("cached component");
    assert_eq!(component.identifier(), "HERO");
    assert!(cache.has("HERO"));
    assert!(cache.get("OTHER").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_is_removed_on_get() {
    let config = shared_config();
    config.configure(&LoaderConfigPatch::new().with_cache_ttl(Duration::from_secs(5)));
    let cache = ComponentCache::new(config);
    cache.set("HERO", stub_component("HERO"));

    tokio::time::advance(Duration::from_millis(4_999)).await;
    assert!(cache.get("HERO").is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(cache.get("HERO").is_none());
    assert_eq!(cache.len(), 0, "expired entry must be deleted, not hidden");
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_is_removed_on_has() {
    let config = shared_config();
    config.configure(&LoaderConfigPatch::new().with_cache_ttl(Duration::from_secs(1)));
    let cache = ComponentCache::new(config);
    cache.set("HERO", stub_component("HERO"));

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(!cache.has("HERO"));
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_lowering_ttl_applies_to_stored_entries() {
    let config = shared_config();
    let cache = ComponentCache::new(config.clone());
    cache.set("HERO", stub_component("HERO"));
    tokio::time::advance(Duration::from_secs(10)).await;
    assert!(cache.has("HERO"));

    config.configure(&LoaderConfigPatch::new().with_cache_ttl(Duration::from_secs(5)));

    assert!(!cache.has("HERO"));
}

#[tokio::test(start_paused = true)]
async fn test_zero_ttl_never_hits() {
    let config = shared_config();
    config.configure(&LoaderConfigPatch::new().with_cache_ttl(Duration::ZERO));
    let cache = ComponentCache::new(config);
    cache.set("HERO", stub_component("HERO"));

    assert!(cache.get("HERO").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_set_replaces_entry() {
    let cache = ComponentCache::new(shared_config());
    cache.set("HERO", stub_component("first"));
    tokio::time::advance(Duration::from_secs(1)).await;
    cache.set("HERO", stub_component("second"));

    let entry = cache.entry("HERO").expect("entry");
    assert_eq!(entry.component.identifier(), "second");
    assert_eq!(entry.identifier, "HERO");
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_delete_and_clear() {
    let cache = ComponentCache::new(shared_config());
    cache.set("HERO", stub_component("HERO"));
    cache.set("CTA", stub_component("CTA"));

    assert!(cache.delete("HERO"));
    assert!(!cache.delete("HERO"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_delete_family_removes_variants_only_of_kind() {
    let cache = ComponentCache::new(shared_config());
    cache.set("HERO", stub_component("HERO"));
    cache.set("HERO:dark", stub_component("HERO:dark"));
    cache.set("HERO:light", stub_component("HERO:light"));
    cache.set("HEROIC", stub_component("HEROIC"));

    assert_eq!(cache.delete_family("HERO"), 3);
    assert_eq!(cache.stats().identifiers, vec!["HEROIC".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_sweep_removes_only_expired() {
    let config = shared_config();
    config.configure(&LoaderConfigPatch::new().with_cache_ttl(Duration::from_secs(10)));
    let cache = ComponentCache::new(config);
    cache.set("OLD", stub_component("OLD"));
    tokio::time::advance(Duration::from_secs(6)).await;
    cache.set("NEW", stub_component("NEW"));
    tokio::time::advance(Duration::from_secs(5)).await;

    assert_eq!(cache.sweep(), 1);
    assert_eq!(cache.stats().identifiers, vec!["NEW".to_string()]);
}

#[tokio::test]
async fn test_stats_lists_sorted_identifiers() {
    let cache = ComponentCache::new(shared_config());
    cache.set("TESTIMONIAL", stub_component("TESTIMONIAL"));
    cache.set("CTA", stub_component("CTA"));
    cache.set("HERO:dark", stub_component("HERO:dark"));

    let stats = cache.stats();
    assert_eq!(stats.size, 3);
    assert_eq!(stats.identifiers, vec!["CTA", "HERO:dark", "TESTIMONIAL"]);
}
