//! Error types for world mutation.

use cogwire_core::{Locator, Position};
use thiserror::Error;

/// Errors arising from placing or removing parts in a world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The container already holds a part on that side.
    #[error("side {} of {} is already occupied", .locator.side, .locator.position)]
    Occupied {
        /// The contested locator.
        locator: Locator,
    },
    /// The chunk containing the position is not loaded.
    #[error("position {position} is not loaded")]
    Unloaded {
        /// The unreachable position.
        position: Position,
    },
}
