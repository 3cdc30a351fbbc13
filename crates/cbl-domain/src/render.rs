//! Rendering primitives injected into compiled components
//!
//! A compiled component reaches host state only through the capabilities in
//! its [`CapabilitySet`]. Each capability is backed by a slot in the
//! [`RenderScope`] of the component instance being rendered.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A rendering primitive exposed to component code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Persistent per-instance state
    State,
    /// Side effect registration
    Effect,
    /// Mutable reference that survives renders
    Ref,
    /// Memoized value
    Memo,
    /// Memoized callback handle
    Callback,
}

impl Capability {
    /// Every capability, in binding order
    pub const ALL: [Capability; 5] = [
        Capability::State,
        Capability::Effect,
        Capability::Ref,
        Capability::Memo,
        Capability::Callback,
    ];

    /// Name the capability is bound to inside component code
    pub fn binding_name(self) -> &'static str {
        match self {
            Self::State => "use_state",
            Self::Effect => "use_effect",
            Self::Ref => "use_ref",
            Self::Memo => "use_memo",
            Self::Callback => "use_callback",
        }
    }
}

/// The fixed set of capabilities handed to a compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: Vec<Capability>,
}

impl CapabilitySet {
    /// All five rendering primitives
    pub fn standard() -> Self {
        Self {
            capabilities: Capability::ALL.to_vec(),
        }
    }

    /// Whether `capability` is part of the set
    pub fn contains(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Iterate over the capabilities
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    /// Binding names of every capability
    pub fn binding_names(&self) -> Vec<&'static str> {
        self.iter().map(Capability::binding_name).collect()
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Default)]
struct Slots {
    state: HashMap<String, Value>,
    refs: HashMap<String, Value>,
    memos: HashMap<String, Value>,
    callbacks: HashMap<String, String>,
    pending_effects: Vec<String>,
}

/// Per-instance storage behind the injected capabilities.
///
/// Cloning yields another handle to the same slots, so a scope can be moved
/// into compiled closures while the host keeps its own handle.
#[derive(Debug, Clone, Default)]
pub struct RenderScope {
    slots: Arc<Mutex<Slots>>,
}

impl RenderScope {
    /// Empty scope for a fresh component instance
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current value of state slot `key`, storing `initial` on first use
    pub fn use_state(&self, key: &str, initial: Value) -> Value {
        self.slots()
            .state
            .entry(key.to_string())
            .or_insert(initial)
            .clone()
    }

    /// Replace state slot `key`, returning the previous value
    pub fn set_state(&self, key: &str, value: Value) -> Option<Value> {
        self.slots().state.insert(key.to_string(), value)
    }

    /// Read state slot `key` without initializing it
    pub fn state(&self, key: &str) -> Option<Value> {
        self.slots().state.get(key).cloned()
    }

    /// Current value of ref slot `key`, storing `initial` on first use
    pub fn use_ref(&self, key: &str, initial: Value) -> Value {
        self.slots()
            .refs
            .entry(key.to_string())
            .or_insert(initial)
            .clone()
    }

    /// First value memoized under `key`
    pub fn use_memo(&self, key: &str, value: Value) -> Value {
        self.slots()
            .memos
            .entry(key.to_string())
            .or_insert(value)
            .clone()
    }

    /// Stable handle for the callback registered under `key`
    pub fn use_callback(&self, key: &str, name: &str) -> String {
        self.slots()
            .callbacks
            .entry(key.to_string())
            .or_insert_with(|| format!("callback:{key}:{name}"))
            .clone()
    }

    /// Record that effect `key` should run after the render commits
    pub fn use_effect(&self, key: &str) {
        let mut slots = self.slots();
        if !slots.pending_effects.iter().any(|pending| pending == key) {
            slots.pending_effects.push(key.to_string());
        }
    }

    /// Drain the effects recorded since the last call
    pub fn take_effects(&self) -> Vec<String> {
        std::mem::take(&mut self.slots().pending_effects)
    }
}
