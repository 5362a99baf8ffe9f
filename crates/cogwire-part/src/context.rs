//! Contexts lent to parts during network callbacks.
//!
//! [`HookContext`] carries what every lifecycle hook receives: the owning
//! network, a read-only view of its part index, and the current tick.
//! [`UpdateContext`] adds mutable world access for `update`, which runs
//! while the part's own state is detached from its container.

use cogwire_core::{Locator, NetworkId, PartId, TickId};
use cogwire_world::World;

/// Read-only view of a network's `PartId -> Locator` index.
pub trait PartIndex {
    /// Where the part with `id` lives, if it belongs to the network.
    fn locate(&self, id: PartId) -> Option<Locator>;

    /// Number of registered parts.
    fn len(&self) -> usize;

    /// Whether no parts are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Context passed to every lifecycle hook.
#[derive(Clone, Copy)]
pub struct HookContext<'a> {
    network: NetworkId,
    parts: &'a dyn PartIndex,
    tick_id: TickId,
}

impl<'a> HookContext<'a> {
    /// Construct a hook context.
    ///
    /// Typically called by the network, not by parts directly.
    pub fn new(network: NetworkId, parts: &'a dyn PartIndex, tick_id: TickId) -> Self {
        Self {
            network,
            parts,
            tick_id,
        }
    }

    /// The owning network.
    pub fn network_id(&self) -> NetworkId {
        self.network
    }

    /// The network's part index.
    pub fn parts(&self) -> &'a dyn PartIndex {
        self.parts
    }

    /// The network's current tick.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }
}

/// Context passed to [`Part::update`](crate::Part::update).
pub struct UpdateContext<'a> {
    hook: HookContext<'a>,
    world: &'a mut dyn World,
}

impl<'a> UpdateContext<'a> {
    /// Construct an update context.
    pub fn new(hook: HookContext<'a>, world: &'a mut dyn World) -> Self {
        Self { hook, world }
    }

    /// The hook-level context.
    pub fn hook(&self) -> HookContext<'a> {
        self.hook
    }

    /// The owning network.
    pub fn network_id(&self) -> NetworkId {
        self.hook.network_id()
    }

    /// The current tick.
    pub fn tick_id(&self) -> TickId {
        self.hook.tick_id()
    }

    /// The world. The updating part's own state is not reachable
    /// through it.
    pub fn world(&self) -> &dyn World {
        self.world
    }

    /// Mutable world access.
    pub fn world_mut(&mut self) -> &mut dyn World {
        self.world
    }
}
