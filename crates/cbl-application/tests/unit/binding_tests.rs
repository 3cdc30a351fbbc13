//! Tests for lifecycle-bound bindings

use crate::test_utils::mock_providers::{Behavior, ScriptedSource};
use crate::test_utils::test_fixtures::loader_parts;
use cbl_application::{ComponentBinding, PreloadBinding, PreloadState};
use cbl_domain::error::FetchError;
use cbl_domain::value_objects::{ComponentId, LoadState};
use std::time::Duration;

fn slow_source() -> ScriptedSource {
    ScriptedSource::new()
        .with_source("HERO", "<hero/>")
        .with_source("CTA", "<cta/>")
        .with_latency(Duration::from_millis(500))
}

#[tokio::test(start_paused = true)]
async fn test_load_moves_through_loading_to_success() {
    let (loader, _, _) = loader_parts(slow_source());
    let binding = ComponentBinding::new(loader, ComponentId::new("HERO"));
    assert!(binding.state().is_idle());

    let handle = binding.load().expect("load starts from idle");
    assert!(binding.state().is_loading());
    assert!(binding.load().is_none(), "no second load while loading");

    handle.await.unwrap();
    let state = binding.state();
    assert_eq!(state.component().map(|c| c.identifier()), Some("HERO"));
    assert_eq!(binding.transition_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_observe_transitions() {
    let (loader, _, _) = loader_parts(slow_source());
    let binding = ComponentBinding::new(loader, ComponentId::new("HERO"));
    let mut states = binding.subscribe();

    let handle = binding.load().unwrap();
    states.changed().await.unwrap();
    assert!(states.borrow_and_update().is_loading());

    handle.await.unwrap();
    states.changed().await.unwrap();
    assert!(states.borrow_and_update().is_success());
}

#[tokio::test(start_paused = true)]
async fn test_unmount_while_loading_publishes_nothing() {
    let (loader, _, _) = loader_parts(slow_source());
    let binding = ComponentBinding::new(loader.clone(), ComponentId::new("HERO"));

    let handle = binding.load().unwrap();
    assert_eq!(binding.transition_count(), 1);
    binding.unmount();
    handle.await.unwrap();

    assert_eq!(binding.transition_count(), 1, "no publication after teardown");
    assert!(binding.state().is_loading());
    assert!(loader.cache().has("HERO"), "the load itself still completes");
    assert!(binding.load().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_identifier_change_ignores_stale_result() {
    // the old request outlives the new one
    let (loader, source, _) = loader_parts(
        ScriptedSource::new()
            .with_source("HERO", "<hero/>")
            .with_source("CTA", "<cta/>")
            .with_key_latency("HERO", Duration::from_millis(800))
            .with_key_latency("CTA", Duration::from_millis(200)),
    );
    let binding = ComponentBinding::new(loader.clone(), ComponentId::new("HERO"));

    let stale = binding.load().unwrap();
    tokio::time::advance(Duration::from_millis(100)).await;
    let current = binding.set_identifier(ComponentId::new("CTA")).unwrap();

    current.await.unwrap();
    assert!(!stale.is_finished(), "old request still in flight");
    assert_eq!(
        binding.state().component().map(|c| c.identifier()),
        Some("CTA")
    );
    let transitions = binding.transition_count();

    stale.await.unwrap();
    assert_eq!(
        binding.state().component().map(|c| c.identifier()),
        Some("CTA"),
        "old request must not overwrite the new one"
    );
    assert_eq!(binding.transition_count(), transitions);
    assert_eq!(binding.identifier(), ComponentId::new("CTA"));
    assert!(loader.cache().has("HERO"), "the old load still warms the cache");
    assert_eq!(source.total_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_error_then_retry() {
    let (loader, source, _) = loader_parts(
        ScriptedSource::new().with("HERO", Behavior::Fail(FetchError::transport("down"))),
    );
    let binding = ComponentBinding::new(loader, ComponentId::new("HERO"));

    binding.load().unwrap().await.unwrap();
    let error = binding.state().error().cloned().expect("error state");
    assert_eq!(error.identifier, "HERO");
    assert!(binding.load().is_none(), "error only leaves through retry");

    source.set("HERO", Behavior::Source("<hero/>".into()));
    binding.retry().expect("retry restarts").await.unwrap();

    assert!(binding.state().is_success());
    assert!(binding.retry().is_none(), "retry only applies to errors");
}

#[tokio::test(start_paused = true)]
async fn test_cached_component_resolves_without_fetch() {
    let (loader, source, _) = loader_parts(slow_source());
    loader.load("HERO", None).await.unwrap();

    let binding = ComponentBinding::new(loader, ComponentId::new("HERO"));
    binding.load().unwrap().await.unwrap();

    assert!(matches!(binding.state(), LoadState::Success(_)));
    assert_eq!(source.call_count("HERO"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_set_identifier_after_unmount_is_ignored() {
    let (loader, _, _) = loader_parts(slow_source());
    let binding = ComponentBinding::new(loader, ComponentId::new("HERO"));
    binding.unmount();

    assert!(!binding.is_mounted());
    assert!(binding.set_identifier(ComponentId::new("CTA")).is_none());
    assert_eq!(binding.transition_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_preload_binding_reports_when_mounted() {
    let (loader, _, _) = loader_parts(slow_source().with("BAD", Behavior::Empty));
    let binding = PreloadBinding::new(loader, ["HERO", "BAD"]);

    let handle = binding.preload().unwrap();
    assert_eq!(binding.state(), PreloadState::Preloading);
    assert!(binding.preload().is_none());
    handle.await.unwrap();

    match binding.state() {
        PreloadState::Done(report) => {
            assert_eq!(report.loaded, vec!["HERO"]);
            assert_eq!(report.failed.len(), 1);
        }
        other => panic!("expected Done, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_preload_binding_unmount_discards_report() {
    let (loader, _, _) = loader_parts(slow_source());
    let binding = PreloadBinding::new(loader.clone(), ["HERO", "CTA"]);

    let handle = binding.preload().unwrap();
    binding.unmount();
    handle.await.unwrap();

    assert_eq!(binding.state(), PreloadState::Preloading);
    assert_eq!(loader.cache_stats().size, 2);
}
