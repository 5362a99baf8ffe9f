//! Test fixtures and world builders for cogwire development.
//!
//! [`TestWorldBuilder`] places parts into a [`GridWorld`];
//! [`fixtures`] provides parts with observable behavior.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use cogwire_core::{DimensionId, Locator, PartTypeId, Position, Side};
use cogwire_world::{GridWorld, PartState, World};

/// A locator in dimension 0 at `(x, 64, z)`, facing up.
pub fn loc(x: i32, z: i32) -> Locator {
    Locator::new(Position::new(DimensionId(0), x, 64, z), Side::Up)
}

/// A fresh state that asks to be updated, with the given priority.
pub fn updating_state(priority: i32) -> PartState {
    let mut state = PartState::new();
    state.set_update(true);
    state.set_priority(priority);
    state
}

/// Builder for a [`GridWorld`] with parts already placed.
#[derive(Default)]
pub struct TestWorldBuilder {
    parts: Vec<(Locator, PartTypeId, PartState)>,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a part at `locator`.
    pub fn part(mut self, locator: Locator, part_type: PartTypeId, state: PartState) -> Self {
        self.parts.push((locator, part_type, state));
        self
    }

    /// Place an updating part with `priority` at `locator`.
    pub fn updating(self, locator: Locator, part_type: PartTypeId, priority: i32) -> Self {
        self.part(locator, part_type, updating_state(priority))
    }

    /// Build the world.
    ///
    /// # Panics
    ///
    /// If two parts share a locator.
    pub fn build(self) -> GridWorld {
        let mut world = GridWorld::new();
        for (locator, part_type, state) in self.parts {
            if let Err(e) = world.place_part(locator, part_type, state) {
                panic!("test world: {e}");
            }
        }
        world
    }
}

/// Read an integer stored value from the part at `locator`, defaulting to 0.
pub fn stored_integer(world: &dyn World, locator: &Locator, key: &str) -> i32 {
    world
        .part_state(locator)
        .ok()
        .and_then(|s| s.value(key))
        .and_then(|v| v.as_integer())
        .unwrap_or(0)
}
