//! Aspect error types.

use cogwire_core::{Locator, PartError, PartStateError};
use cogwire_value::PropertyError;
use thiserror::Error;

/// Errors from evaluating an aspect.
///
/// Reads never fail on missing world state (they fall back to the output
/// type's default), so most variants come from writes and lookups.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AspectError {
    /// The value's type does not correspond to the type the aspect accepts.
    #[error("aspect {aspect} accepts {expected}, got {found}")]
    TypeMismatch {
        /// Aspect id.
        aspect: &'static str,
        /// Accepted type name.
        expected: &'static str,
        /// Type name of the rejected value.
        found: &'static str,
    },
    /// A property lookup or update failed.
    #[error(transparent)]
    Property(#[from] PropertyError),
    /// The target offers no capability the aspect can write to.
    #[error("aspect {aspect} found no {capability} capability at {locator}")]
    MissingCapability {
        /// Aspect id.
        aspect: &'static str,
        /// The capability that was looked for.
        capability: &'static str,
        /// Where it was looked for.
        locator: Locator,
    },
    /// No aspect of the requested direction is registered under this id.
    #[error("unknown aspect {id:?}")]
    UnknownAspect {
        /// The requested id.
        id: String,
    },
    /// The part holding the aspect's properties could not be reached.
    #[error(transparent)]
    StateUnreachable(#[from] PartStateError),
}

impl From<AspectError> for PartError {
    fn from(err: AspectError) -> Self {
        match err {
            AspectError::StateUnreachable(e) => PartError::State(e),
            other => PartError::failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogwire_core::{DimensionId, Position, Side};

    #[test]
    fn unreachable_state_stays_a_state_error() {
        let locator = Locator::new(Position::new(DimensionId(0), 0, 0, 0), Side::Up);
        let err: PartError = AspectError::StateUnreachable(PartStateError::Unloaded { locator }).into();
        assert_eq!(err, PartError::State(PartStateError::Unloaded { locator }));
    }

    #[test]
    fn other_errors_become_failures() {
        let err: PartError = AspectError::UnknownAspect { id: "x".into() }.into();
        assert_eq!(err, PartError::failed("unknown aspect \"x\""));
    }
}
