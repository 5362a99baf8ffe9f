//! Network error types.

use cogwire_core::{Locator, NetworkId, PartId, PartStateError};
use thiserror::Error;

use crate::element::ElementKey;

/// Errors from structural network operations.
///
/// Per-element failures during a tick are not reported through this type;
/// the tick isolates them and counts them in its
/// [`TickReport`](crate::TickReport).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The element is already part of the network.
    #[error("element {key} is already in the network")]
    Duplicate {
        /// The rejected element.
        key: ElementKey,
    },
    /// The element's container already belongs to another network.
    #[error("element {key} is owned by network {other}")]
    OwnedByOtherNetwork {
        /// The rejected element.
        key: ElementKey,
        /// The network holding the container.
        other: NetworkId,
    },
    /// The part id is already registered at another locator.
    #[error("part id {id} is already registered at {existing}")]
    IndexCollision {
        /// The contested id.
        id: PartId,
        /// Where the id is already registered.
        existing: Locator,
    },
    /// No such element in the network.
    #[error("element {key} is not in the network")]
    UnknownElement {
        /// The missing element.
        key: ElementKey,
    },
    /// The network has been killed and cannot tick.
    #[error("network is killed")]
    Killed,
    /// The element's part state could not be reached.
    #[error(transparent)]
    StateUnreachable(#[from] PartStateError),
}
