//! World trait compliance test helpers.
//!
//! These functions verify that a World implementation satisfies the
//! contract the network relies on. Each takes a locator to probe; run
//! them once with the probe's chunk loaded and once with it unloaded.

use cogwire_core::{Locator, PartStateError, Side};

use crate::world::World;

/// Assert that `part_state` agrees with the container lookup.
pub fn assert_state_matches_container(world: &dyn World, probe: &Locator) {
    let via_container = world
        .container(&probe.position)
        .and_then(|c| c.state(probe.side))
        .map(|s| s.id());
    let via_state = world.part_state(probe).ok().map(|s| s.id());
    assert_eq!(
        via_container, via_state,
        "part_state({probe}) disagrees with container lookup"
    );
}

/// Assert that the mutable and shared resolutions reach the same state.
pub fn assert_mut_resolves_same_state(world: &mut dyn World, probe: &Locator) {
    let shared = world.part_state(probe).map(|s| s.id());
    let exclusive = world.part_state_mut(probe).map(|s| s.id());
    assert_eq!(shared, exclusive, "part_state_mut({probe}) diverges");
}

/// Assert that empty sides on a loaded position report `Absent`.
pub fn assert_empty_sides_absent(world: &dyn World, probe: &Locator) {
    if !world.is_loaded(&probe.position) {
        return;
    }
    for side in Side::ALL {
        let loc = Locator::new(probe.position, side);
        let occupied = world
            .container(&loc.position)
            .is_some_and(|c| c.has_part(side));
        if !occupied {
            assert_eq!(
                world.part_state(&loc).err(),
                Some(PartStateError::Absent { locator: loc }),
                "empty side {loc} should be absent"
            );
        }
    }
}

/// Assert that an unloaded position exposes nothing.
pub fn assert_unloaded_hides_everything(world: &mut dyn World, probe: &Locator) {
    if world.is_loaded(&probe.position) {
        return;
    }
    assert!(world.container(&probe.position).is_none());
    assert!(world.container_mut(&probe.position).is_none());
    assert!(world.fluid_handler(probe).is_none());
    assert!(world.signal(probe).is_none());
    assert!(world.signal_mut(probe).is_none());
    assert_eq!(
        world.part_state(probe).err(),
        Some(PartStateError::Unloaded { locator: *probe })
    );
}

/// Run all compliance checks against one probe.
pub fn run_full_compliance(world: &mut dyn World, probe: &Locator) {
    assert_state_matches_container(world, probe);
    assert_mut_resolves_same_state(world, probe);
    assert_empty_sides_absent(world, probe);
    assert_unloaded_hides_everything(world, probe);
}
