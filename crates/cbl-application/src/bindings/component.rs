//! Component binding
//!
//! Drives one view's [`LoadState`] for the identifier it currently shows.
//!
//! Each binding owns a mount token. Every request runs in a spawned task under
//! a child token captured when the request starts:
//!
//! - unmounting cancels the mount token, and with it every request token
//! - changing the identifier cancels only the current request token
//!
//! After the load resolves the task checks its captured token and publishes
//! nothing if it was cancelled. The load itself always runs to completion, so
//! an abandoned request still warms the cache.

use crate::loader::ComponentLoader;
use cbl_domain::value_objects::{ComponentId, LoadState};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

struct RequestSlot {
    id: ComponentId,
    token: CancellationToken,
}

struct BindingInner {
    loader: ComponentLoader,
    mount: CancellationToken,
    slot: Mutex<RequestSlot>,
    state: watch::Sender<LoadState>,
    transitions: AtomicU64,
}

impl BindingInner {
    fn lock_slot(&self) -> MutexGuard<'_, RequestSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Callers hold the slot lock
    fn publish(&self, state: LoadState) {
        self.transitions.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(state);
    }
}

/// Lifecycle-bound consumer of a [`ComponentLoader`]
///
/// # Example
///
/// ```ignore
/// let binding = ComponentBinding::new(loader, ComponentId::new("HERO"));
/// let mut states = binding.subscribe();
/// binding.load();
/// states.changed().await?;
/// // on teardown
/// binding.unmount();
/// ```
#[derive(Clone)]
pub struct ComponentBinding {
    inner: Arc<BindingInner>,
}

impl ComponentBinding {
    /// Mounted binding for `id`, starting in [`LoadState::Idle`]
    pub fn new(loader: ComponentLoader, id: ComponentId) -> Self {
        let mount = CancellationToken::new();
        let token = mount.child_token();
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            inner: Arc::new(BindingInner {
                loader,
                mount,
                slot: Mutex::new(RequestSlot { id, token }),
                state,
                transitions: AtomicU64::new(0),
            }),
        }
    }

    /// Start loading the current identifier.
    ///
    /// Only starts from `Idle` while mounted; returns the request task
    /// otherwise `None`.
    pub fn load(&self) -> Option<JoinHandle<()>> {
        let (id, token) = {
            let slot = self.inner.lock_slot();
            if slot.token.is_cancelled() || !self.inner.state.borrow().is_idle() {
                return None;
            }
            self.inner.publish(LoadState::Loading);
            (slot.id.clone(), slot.token.clone())
        };

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let result = inner.loader.load_id(&id).await;

            let _slot = inner.lock_slot();
            if token.is_cancelled() {
                debug!(identifier = %id, "Discarding load result for stale request");
                return;
            }
            inner.publish(match result {
                Ok(component) => LoadState::Success(component),
                Err(error) => LoadState::Error(error),
            });
        }))
    }

    /// Leave `Error` for `Idle` and load again
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        {
            let slot = self.inner.lock_slot();
            if slot.token.is_cancelled() || !self.inner.state.borrow().is_error() {
                return None;
            }
            self.inner.publish(LoadState::Idle);
        }
        self.load()
    }

    /// Switch to `id` and load it.
    ///
    /// A request still in flight for the previous identifier completes in the
    /// background but never touches this binding's state.
    pub fn set_identifier(&self, id: ComponentId) -> Option<JoinHandle<()>> {
        {
            let mut slot = self.inner.lock_slot();
            if self.inner.mount.is_cancelled() {
                return None;
            }
            slot.token.cancel();
            slot.id = id;
            slot.token = self.inner.mount.child_token();
            self.inner.publish(LoadState::Idle);
        }
        self.load()
    }

    /// Tear the binding down. No state is published afterwards.
    pub fn unmount(&self) {
        let _slot = self.inner.lock_slot();
        self.inner.mount.cancel();
    }

    /// Whether the owning view is still mounted
    pub fn is_mounted(&self) -> bool {
        !self.inner.mount.is_cancelled()
    }

    /// Identifier currently bound
    pub fn identifier(&self) -> ComponentId {
        self.inner.lock_slot().id.clone()
    }

    /// Current state
    pub fn state(&self) -> LoadState {
        self.inner.state.borrow().clone()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.inner.state.subscribe()
    }

    /// Number of state publications so far
    pub fn transition_count(&self) -> u64 {
        self.inner.transitions.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for ComponentBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentBinding")
            .field("identifier", &self.identifier())
            .field("state", &self.inner.state.borrow().name())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
