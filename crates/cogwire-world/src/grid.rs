//! In-memory world with chunk-granular loading.

use cogwire_core::{ChunkPos, Locator, PartTypeId, Position};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::capability::{FluidHandler, FluidTanks, Signal, SignalPort};
use crate::container::{PartContainer, PlacedPart};
use crate::error::WorldError;
use crate::state::PartState;
use crate::world::World;

/// A world held entirely in memory.
///
/// Every chunk starts loaded. [`unload_chunk`](Self::unload_chunk) hides
/// everything in a chunk from the [`World`] accessors without discarding
/// it, and [`load_chunk`](Self::load_chunk) brings it back unchanged,
/// which is how streaming is simulated in tests.
///
/// Capabilities are side-agnostic: the fluid tanks and signal port at a
/// position answer for every side.
///
/// # Examples
///
/// ```
/// use cogwire_core::{DimensionId, Locator, PartTypeId, Position, Side};
/// use cogwire_world::{GridWorld, PartState, World};
///
/// let mut world = GridWorld::new();
/// let at = Locator::new(Position::new(DimensionId(0), 1, 64, 1), Side::Up);
/// world.place_part(at, PartTypeId(0), PartState::new()).unwrap();
/// assert!(world.part_state(&at).is_ok());
///
/// world.unload_chunk(at.position.chunk());
/// assert!(world.container(&at.position).is_none());
/// ```
#[derive(Debug, Default)]
pub struct GridWorld {
    containers: IndexMap<Position, PartContainer>,
    fluids: IndexMap<Position, FluidTanks>,
    signals: IndexMap<Position, SignalPort>,
    unloaded: IndexSet<ChunkPos>,
}

impl GridWorld {
    /// An empty, fully loaded world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a part, creating the container if needed.
    pub fn place_part(
        &mut self,
        locator: Locator,
        part_type: PartTypeId,
        state: PartState,
    ) -> Result<(), WorldError> {
        self.ensure_loaded(&locator.position)?;
        self.containers
            .entry(locator.position)
            .or_default()
            .insert(locator.side, PlacedPart::new(part_type, state))
            .map_err(|_| WorldError::Occupied { locator })
    }

    /// Take a part out of the world. Drops the container once empty.
    pub fn remove_part(&mut self, locator: &Locator) -> Result<Option<PlacedPart>, WorldError> {
        self.ensure_loaded(&locator.position)?;
        let Some(container) = self.containers.get_mut(&locator.position) else {
            return Ok(None);
        };
        let removed = container.remove(locator.side);
        if container.is_empty() {
            self.containers.shift_remove(&locator.position);
        }
        Ok(removed)
    }

    /// Install fluid tanks at a position, replacing any already there.
    pub fn set_fluid_tanks(&mut self, pos: Position, tanks: FluidTanks) {
        self.fluids.insert(pos, tanks);
    }

    /// Install a signal port at a position.
    pub fn set_signal_port(&mut self, pos: Position, port: SignalPort) {
        self.signals.insert(pos, port);
    }

    /// Hide a chunk from the world accessors.
    pub fn unload_chunk(&mut self, chunk: ChunkPos) {
        if self.unloaded.insert(chunk) {
            debug!(%chunk, "chunk unloaded");
        }
    }

    /// Make a chunk reachable again.
    pub fn load_chunk(&mut self, chunk: ChunkPos) {
        if self.unloaded.shift_remove(&chunk) {
            debug!(%chunk, "chunk loaded");
        }
    }

    /// Number of containers, loaded or not.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    fn ensure_loaded(&self, pos: &Position) -> Result<(), WorldError> {
        if self.is_loaded(pos) {
            Ok(())
        } else {
            Err(WorldError::Unloaded { position: *pos })
        }
    }
}

impl World for GridWorld {
    fn is_loaded(&self, pos: &Position) -> bool {
        !self.unloaded.contains(&pos.chunk())
    }

    fn container(&self, pos: &Position) -> Option<&PartContainer> {
        if !self.is_loaded(pos) {
            return None;
        }
        self.containers.get(pos)
    }

    fn container_mut(&mut self, pos: &Position) -> Option<&mut PartContainer> {
        if !self.is_loaded(pos) {
            return None;
        }
        self.containers.get_mut(pos)
    }

    fn fluid_handler(&self, locator: &Locator) -> Option<&dyn FluidHandler> {
        if !self.is_loaded(&locator.position) {
            return None;
        }
        self.fluids
            .get(&locator.position)
            .map(|t| t as &dyn FluidHandler)
    }

    fn signal(&self, locator: &Locator) -> Option<&dyn Signal> {
        if !self.is_loaded(&locator.position) {
            return None;
        }
        self.signals.get(&locator.position).map(|s| s as &dyn Signal)
    }

    fn signal_mut(&mut self, locator: &Locator) -> Option<&mut dyn Signal> {
        if !self.is_loaded(&locator.position) {
            return None;
        }
        self.signals
            .get_mut(&locator.position)
            .map(|s| s as &mut dyn Signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::FluidTank;
    use crate::compliance;
    use cogwire_core::{DimensionId, PartStateError, Side};
    use cogwire_value::FluidStack;

    fn at(x: i32, z: i32, side: Side) -> Locator {
        Locator::new(Position::new(DimensionId(0), x, 64, z), side)
    }

    fn populated() -> GridWorld {
        let mut world = GridWorld::new();
        world
            .place_part(at(0, 0, Side::Up), PartTypeId(0), PartState::new())
            .unwrap();
        world
            .place_part(at(20, 0, Side::North), PartTypeId(1), PartState::new())
            .unwrap();
        world.set_fluid_tanks(
            at(1, 0, Side::Up).position,
            FluidTanks(vec![FluidTank::filled(FluidStack::new("water", 500), 1000)]),
        );
        world.set_signal_port(at(2, 0, Side::Up).position, SignalPort::new(4));
        world
    }

    #[test]
    fn world_compliance() {
        let mut world = populated();
        for probe in [at(0, 0, Side::Up), at(0, 0, Side::East), at(5, 5, Side::Down)] {
            compliance::run_full_compliance(&mut world, &probe);
            world.unload_chunk(probe.position.chunk());
            compliance::run_full_compliance(&mut world, &probe);
            world.load_chunk(probe.position.chunk());
        }
    }

    #[test]
    fn occupied_side_rejected() {
        let mut world = populated();
        let err = world
            .place_part(at(0, 0, Side::Up), PartTypeId(0), PartState::new())
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::Occupied {
                locator: at(0, 0, Side::Up)
            }
        );
    }

    #[test]
    fn unload_hides_and_reload_restores() {
        let mut world = populated();
        let loc = at(0, 0, Side::Up);
        let id = world.part_state(&loc).unwrap().id();

        world.unload_chunk(loc.position.chunk());
        assert_eq!(
            world.part_state(&loc),
            Err(PartStateError::Unloaded { locator: loc })
        );
        // other chunks are unaffected
        assert!(world.part_state(&at(20, 0, Side::North)).is_ok());

        world.load_chunk(loc.position.chunk());
        assert_eq!(world.part_state(&loc).map(PartState::id), Ok(id));
    }

    #[test]
    fn placing_into_unloaded_chunk_fails() {
        let mut world = GridWorld::new();
        let loc = at(0, 0, Side::Up);
        world.unload_chunk(loc.position.chunk());
        assert!(matches!(
            world.place_part(loc, PartTypeId(0), PartState::new()),
            Err(WorldError::Unloaded { .. })
        ));
    }

    #[test]
    fn removing_last_part_drops_container() {
        let mut world = populated();
        assert_eq!(world.container_count(), 2);
        let removed = world.remove_part(&at(0, 0, Side::Up)).unwrap();
        assert!(removed.is_some());
        assert_eq!(world.container_count(), 1);
        assert!(world.remove_part(&at(0, 0, Side::Up)).unwrap().is_none());
    }

    #[test]
    fn capabilities_follow_loading() {
        let mut world = populated();
        let tank_at = at(1, 0, Side::Down);
        assert_eq!(
            world
                .fluid_handler(&tank_at)
                .and_then(|h| h.tank(0))
                .map(|t| t.contents().amount()),
            Some(500)
        );
        world.unload_chunk(tank_at.position.chunk());
        assert!(world.fluid_handler(&tank_at).is_none());
        assert!(world.signal(&at(2, 0, Side::Up)).is_none());
    }

    #[test]
    fn downcast_through_trait_object() {
        let mut world = populated();
        let dyn_world: &mut dyn World = &mut world;
        let grid = dyn_world.downcast_mut::<GridWorld>().unwrap();
        grid.set_signal_port(at(3, 0, Side::Up).position, SignalPort::new(9));
        assert_eq!(world.signal(&at(3, 0, Side::Up)).map(|s| s.level()), Some(9));
    }
}
