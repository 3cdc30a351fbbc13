//! Best-effort batch warm-up of the component cache

use crate::loader::ComponentLoader;
use cbl_domain::value_objects::ComponentId;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One identifier that could not be preloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadFailure {
    /// Identifier as given by the caller
    pub identifier: String,
    /// Why it failed
    pub message: String,
}

/// Outcome of a preload batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadReport {
    /// Identifiers that are now cached
    pub loaded: Vec<String>,
    /// Identifiers that failed
    pub failed: Vec<PreloadFailure>,
}

impl PreloadReport {
    /// Whether every identifier loaded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of identifiers in the batch
    pub fn total(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }
}

/// Issues concurrent loads for a batch of identifiers.
///
/// Identifiers may be variant-qualified (`HERO:dark`). One failure never
/// aborts the others.
#[derive(Debug, Clone)]
pub struct Preloader {
    loader: ComponentLoader,
}

impl Preloader {
    /// Preloader over `loader`
    pub fn new(loader: ComponentLoader) -> Self {
        Self { loader }
    }

    /// Load every identifier, logging and ignoring failures
    pub async fn preload<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let report = self.preload_with_report(ids).await;
        debug!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "Preload finished"
        );
    }

    /// Load every identifier and partition the outcomes
    pub async fn preload_with_report<I, S>(&self, ids: I) -> PreloadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requests = ids.into_iter().map(|raw| {
            let raw = raw.as_ref().to_string();
            let loader = self.loader.clone();
            async move {
                let outcome = match ComponentId::parse(&raw) {
                    Ok(id) => loader
                        .load_id(&id)
                        .await
                        .map(|_| ())
                        .map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                (raw, outcome)
            }
        });

        let mut report = PreloadReport::default();
        for (identifier, outcome) in join_all(requests).await {
            match outcome {
                Ok(()) => report.loaded.push(identifier),
                Err(message) => {
                    warn!(identifier = %identifier, error = %message, "Preload failed");
                    report.failed.push(PreloadFailure {
                        identifier,
                        message,
                    });
                }
            }
        }
        report
    }
}
