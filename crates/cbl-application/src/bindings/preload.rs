//! Preload binding
//!
//! Warms the cache for a view that is about to show a set of components.
//! Guarded by a mount token like [`super::ComponentBinding`].

use crate::loader::ComponentLoader;
use crate::preloader::PreloadReport;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// State of a preload binding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreloadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// The batch is in flight
    Preloading,
    /// The batch settled
    Done(PreloadReport),
}

struct PreloadInner {
    loader: ComponentLoader,
    ids: Vec<String>,
    mount: CancellationToken,
    guard: Mutex<()>,
    state: watch::Sender<PreloadState>,
}

impl PreloadInner {
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lifecycle-bound preload of a fixed identifier list
#[derive(Clone)]
pub struct PreloadBinding {
    inner: Arc<PreloadInner>,
}

impl PreloadBinding {
    /// Mounted binding for `ids`
    pub fn new<I, S>(loader: ComponentLoader, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (state, _) = watch::channel(PreloadState::Idle);
        Self {
            inner: Arc::new(PreloadInner {
                loader,
                ids: ids.into_iter().map(Into::into).collect(),
                mount: CancellationToken::new(),
                guard: Mutex::new(()),
                state,
            }),
        }
    }

    /// Start the batch. Only starts once, from `Idle`, while mounted.
    pub fn preload(&self) -> Option<JoinHandle<()>> {
        {
            let _guard = self.inner.lock();
            if self.inner.mount.is_cancelled() || *self.inner.state.borrow() != PreloadState::Idle
            {
                return None;
            }
            self.inner.state.send_replace(PreloadState::Preloading);
        }

        let inner = Arc::clone(&self.inner);
        let token = inner.mount.child_token();
        Some(tokio::spawn(async move {
            let report = inner.loader.preload_with_report(&inner.ids).await;

            let _guard = inner.lock();
            if token.is_cancelled() {
                debug!(total = report.total(), "Discarding preload report after unmount");
                return;
            }
            inner.state.send_replace(PreloadState::Done(report));
        }))
    }

    /// Tear the binding down
    pub fn unmount(&self) {
        let _guard = self.inner.lock();
        self.inner.mount.cancel();
    }

    /// Whether the owning view is still mounted
    pub fn is_mounted(&self) -> bool {
        !self.inner.mount.is_cancelled()
    }

    /// Identifiers this binding preloads
    pub fn identifiers(&self) -> &[String] {
        &self.inner.ids
    }

    /// Current state
    pub fn state(&self) -> PreloadState {
        self.inner.state.borrow().clone()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<PreloadState> {
        self.inner.state.subscribe()
    }
}

impl fmt::Debug for PreloadBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreloadBinding")
            .field("identifiers", &self.inner.ids)
            .field("state", &*self.inner.state.borrow())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
