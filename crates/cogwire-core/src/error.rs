//! Error types shared across the workspace.
//!
//! Both errors here are soft failures: they describe a part that could
//! not be reached or did not finish its work, and the network isolates
//! them at the per-element boundary instead of aborting a tick.

use thiserror::Error;

use crate::position::Locator;

/// A part's persisted state could not be fetched.
///
/// Raised whenever a network element tries to reach the state held by
/// its container and the container is unreachable. This is routine while
/// the world streams chunks in and out and is not a programming error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PartStateError {
    /// The chunk holding the container is not loaded.
    #[error("part state at {locator} is unreachable: chunk not loaded")]
    Unloaded {
        /// The center locator of the part.
        locator: Locator,
    },
    /// The chunk is loaded but no container, or no part on the requested
    /// side, exists at the locator.
    #[error("no part state at {locator}")]
    Absent {
        /// The center locator of the part.
        locator: Locator,
    },
}

impl PartStateError {
    /// The locator that could not be resolved.
    pub fn locator(&self) -> Locator {
        match self {
            Self::Unloaded { locator } | Self::Absent { locator } => *locator,
        }
    }

    /// The chunk is unloaded. Expected during partial loading, unlike a
    /// missing part.
    pub fn is_unloaded(&self) -> bool {
        matches!(self, Self::Unloaded { .. })
    }
}

/// A part failed while executing one of its callbacks.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PartError {
    /// The part's own state (or a state it depends on) was unreachable.
    #[error(transparent)]
    State(#[from] PartStateError),
    /// The part reported a failure of its own.
    #[error("part update failed: {reason}")]
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl PartError {
    /// Shorthand for [`PartError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}
