//! Part containers: one part slot per side of a block.

use cogwire_core::{NetworkId, PartTypeId, Side};
use serde::{Deserialize, Serialize};

use crate::state::PartState;

/// A part placed in a container: its registered type and its state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPart {
    /// Registered part type.
    pub part_type: PartTypeId,
    /// Persisted state.
    pub state: PartState,
}

impl PlacedPart {
    /// Pair a part type with its state.
    pub fn new(part_type: PartTypeId, state: PartState) -> Self {
        Self { part_type, state }
    }
}

/// The block-level holder of up to six parts, one per [`Side`].
///
/// Also records the network the container currently belongs to, which
/// revalidation keeps in sync after structural network changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartContainer {
    slots: [Option<PlacedPart>; 6],
    network: Option<NetworkId>,
}

fn slot_index(side: Side) -> usize {
    side as usize
}

impl PartContainer {
    /// An empty container, not attached to any network.
    pub fn new() -> Self {
        Self::default()
    }

    /// The part on `side`.
    pub fn part(&self, side: Side) -> Option<&PlacedPart> {
        self.slots[slot_index(side)].as_ref()
    }

    /// Mutable access to the part on `side`.
    pub fn part_mut(&mut self, side: Side) -> Option<&mut PlacedPart> {
        self.slots[slot_index(side)].as_mut()
    }

    /// Whether a part occupies `side`.
    pub fn has_part(&self, side: Side) -> bool {
        self.slots[slot_index(side)].is_some()
    }

    /// State of the part on `side`.
    pub fn state(&self, side: Side) -> Option<&PartState> {
        self.part(side).map(|p| &p.state)
    }

    /// Mutable state of the part on `side`.
    pub fn state_mut(&mut self, side: Side) -> Option<&mut PartState> {
        self.part_mut(side).map(|p| &mut p.state)
    }

    /// Put a part on `side`. Hands the part back if the side is taken.
    pub fn insert(&mut self, side: Side, part: PlacedPart) -> Result<(), PlacedPart> {
        let slot = &mut self.slots[slot_index(side)];
        if slot.is_some() {
            return Err(part);
        }
        *slot = Some(part);
        Ok(())
    }

    /// Take the part off `side`.
    pub fn remove(&mut self, side: Side) -> Option<PlacedPart> {
        self.slots[slot_index(side)].take()
    }

    /// Occupied sides, in side order.
    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(|&s| self.has_part(s))
    }

    /// Whether no side holds a part.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The network this container belongs to.
    pub fn network(&self) -> Option<NetworkId> {
        self.network
    }

    /// Re-point the container at a network (or detach it).
    pub fn set_network(&mut self, network: Option<NetworkId>) {
        self.network = network;
    }
}
