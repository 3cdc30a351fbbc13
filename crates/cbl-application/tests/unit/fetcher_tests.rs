//! Tests for timeout and retry behavior of the fetcher

use crate::test_utils::mock_providers::{Behavior, ScriptedSource};
use crate::test_utils::test_fixtures::shared_config;
use cbl_application::ComponentFetcher;
use cbl_domain::error::FetchError;
use cbl_domain::value_objects::{ComponentId, LoaderConfigPatch};
use std::sync::Arc;
use std::time::Duration;

fn build_fetcher(source: &Arc<ScriptedSource>) -> (ComponentFetcher, cbl_application::SharedConfig) {
    let config = shared_config();
    (ComponentFetcher::new(source.clone(), config.clone()), config)
}

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt() {
    let source = Arc::new(ScriptedSource::new().with_source("HERO", "<hero/>"));
    let (fetcher, _) = build_fetcher(&source);

    let response = fetcher.fetch(&ComponentId::new("HERO")).await.unwrap();

    assert_eq!(response.source_text(), Some("<hero/>"));
    assert_eq!(source.call_count("HERO"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_always_failing_source_is_called_retry_attempts_times() {
    let source = Arc::new(
        ScriptedSource::new().with("HERO", Behavior::Fail(FetchError::transport("refused"))),
    );
    let (fetcher, _) = build_fetcher(&source);

    let error = fetcher.fetch(&ComponentId::new("HERO")).await.unwrap_err();

    assert_eq!(source.call_count("HERO"), 3);
    match error {
        FetchError::Exhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert_eq!(*last, FetchError::transport("refused"));
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_attempts_are_separated_by_retry_delay() {
    let source = Arc::new(ScriptedSource::new().with(
        "HERO",
        Behavior::Fail(FetchError::Status {
            status: 503,
            body: String::new(),
        }),
    ));
    let (fetcher, _) = build_fetcher(&source);

    let _ = fetcher.fetch(&ComponentId::new("HERO")).await;

    let times = source.call_times("HERO");
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_millis(100));
    }
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_transient_failures() {
    let source = Arc::new(ScriptedSource::new().with(
        "HERO",
        Behavior::Flaky {
            failures: 2,
            source: "<hero/>".to_string(),
        },
    ));
    let (fetcher, _) = build_fetcher(&source);

    let response = fetcher.fetch(&ComponentId::new("HERO")).await.unwrap();

    assert_eq!(response.source_text(), Some("<hero/>"));
    assert_eq!(source.call_count("HERO"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_slow_attempt_times_out_and_is_retried() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_source("HERO", "<hero/>")
            .with_latency(Duration::from_secs(5)),
    );
    let (fetcher, config) = build_fetcher(&source);
    config.configure(&LoaderConfigPatch::new().with_retry_attempts(2));

    let error = fetcher.fetch(&ComponentId::new("HERO")).await.unwrap_err();

    assert_eq!(source.call_count("HERO"), 2);
    assert_eq!(
        error,
        FetchError::Exhausted {
            attempts: 2,
            last: Box::new(FetchError::Timeout {
                after: Duration::from_secs(1)
            }),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_logical_failure_is_not_retried() {
    let source = Arc::new(ScriptedSource::new().with("HERO", Behavior::Reject("unknown block".into())));
    let (fetcher, _) = build_fetcher(&source);

    let error = fetcher.fetch(&ComponentId::new("HERO")).await.unwrap_err();

    assert_eq!(
        error,
        FetchError::Rejected {
            message: "unknown block".to_string()
        }
    );
    assert_eq!(source.call_count("HERO"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_source_is_not_retried() {
    let source = Arc::new(ScriptedSource::new().with("HERO", Behavior::Empty));
    let (fetcher, _) = build_fetcher(&source);

    let error = fetcher.fetch(&ComponentId::new("HERO")).await.unwrap_err();

    assert_eq!(error, FetchError::EmptySource);
    assert_eq!(source.call_count("HERO"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_variant_is_fetched_under_its_own_key() {
    let source = Arc::new(ScriptedSource::new().with_source("HERO:dark", "<hero dark/>"));
    let (fetcher, _) = build_fetcher(&source);

    let response = fetcher
        .fetch(&ComponentId::with_variant("HERO", "dark"))
        .await
        .unwrap();

    assert_eq!(response.source_text(), Some("<hero dark/>"));
    assert_eq!(source.call_count("HERO"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_retry_policy_is_read_live() {
    let source = Arc::new(
        ScriptedSource::new().with("HERO", Behavior::Fail(FetchError::transport("refused"))),
    );
    let (fetcher, config) = build_fetcher(&source);
    config.configure(&LoaderConfigPatch::new().with_retry_attempts(5));

    let _ = fetcher.fetch(&ComponentId::new("HERO")).await;
    assert_eq!(source.call_count("HERO"), 5);

    config.configure(&LoaderConfigPatch::new().with_retry_attempts(1));
    let _ = fetcher.fetch(&ComponentId::new("HERO")).await;
    assert_eq!(source.call_count("HERO"), 6);
}
