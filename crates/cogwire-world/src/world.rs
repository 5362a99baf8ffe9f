//! The core `World` trait and `dyn World` downcast support.

use cogwire_core::{Locator, PartStateError, Position};
use std::any::Any;

use crate::capability::{FluidHandler, Signal};
use crate::container::PartContainer;
use crate::state::PartState;

/// Spatial state as seen by networks and aspects.
///
/// Loading is chunk-granular and may change between any two calls. Every
/// accessor answers "absent" for an unloaded position rather than failing,
/// so callers treat unloaded state as routine.
///
/// # Object Safety
///
/// Designed for use as `dyn World`. Use `downcast_ref` / `downcast_mut`
/// to reach backend-specific setup methods.
pub trait World: Any + Send + Sync + 'static {
    /// Whether the chunk containing `pos` is loaded.
    fn is_loaded(&self, pos: &Position) -> bool;

    /// The container at `pos`, if loaded and present.
    fn container(&self, pos: &Position) -> Option<&PartContainer>;

    /// Mutable container at `pos`, if loaded and present.
    fn container_mut(&mut self, pos: &Position) -> Option<&mut PartContainer>;

    /// Fluid capability at `locator`, if any.
    fn fluid_handler(&self, _locator: &Locator) -> Option<&dyn FluidHandler> {
        None
    }

    /// Signal capability at `locator`, if any.
    fn signal(&self, _locator: &Locator) -> Option<&dyn Signal> {
        None
    }

    /// Mutable signal capability at `locator`, if any.
    fn signal_mut(&mut self, _locator: &Locator) -> Option<&mut dyn Signal> {
        None
    }

    /// Resolve the state of the part at `locator`.
    ///
    /// Distinguishes an unloaded chunk from a loaded position without a
    /// part on that side.
    fn part_state(&self, locator: &Locator) -> Result<&PartState, PartStateError> {
        if !self.is_loaded(&locator.position) {
            return Err(PartStateError::Unloaded { locator: *locator });
        }
        self.container(&locator.position)
            .and_then(|c| c.state(locator.side))
            .ok_or(PartStateError::Absent { locator: *locator })
    }

    /// Mutable variant of [`part_state`](Self::part_state).
    fn part_state_mut(&mut self, locator: &Locator) -> Result<&mut PartState, PartStateError> {
        if !self.is_loaded(&locator.position) {
            return Err(PartStateError::Unloaded { locator: *locator });
        }
        self.container_mut(&locator.position)
            .and_then(|c| c.state_mut(locator.side))
            .ok_or(PartStateError::Absent { locator: *locator })
    }
}

impl dyn World {
    /// Attempt to downcast a trait object to a concrete world type.
    pub fn downcast_ref<T: World>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: World>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}
