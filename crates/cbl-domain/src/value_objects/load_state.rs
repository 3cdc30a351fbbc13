//! Consumer-facing load state

use crate::error::LoadError;
use crate::ports::ExecutableComponent;

/// State of a component load as seen by a view binding.
///
/// Transitions: `Idle -> Loading -> Success | Error`, and `Error -> Idle` on
/// an explicit retry.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The component is ready
    Success(ExecutableComponent),
    /// The load failed
    Error(LoadError),
}

impl LoadState {
    /// Short name of the state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    /// Whether no load has been requested
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the component is ready
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the load failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Loaded component, if any
    pub fn component(&self) -> Option<&ExecutableComponent> {
        match self {
            Self::Success(component) => Some(component),
            _ => None,
        }
    }

    /// Load error, if any
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}
