//! Network elements: the network's schedulable handle on one part.
//!
//! A [`PartNetworkElement`] pairs a registered part type with the
//! [`PartTarget`] it is bound to. It holds no state of its own; every
//! operation resolves the part's state through the world at call time,
//! and treats an unreachable state as a soft failure.
//!
//! # Ordering
//!
//! [`PartNetworkElement::compare`] is the pairwise tie-break chain:
//!
//! 1. part kind
//! 2. descending priority, only when both chunks are loaded
//! 3. part type id
//! 4. center position
//! 5. center side
//!
//! A loaded position without a part ranks at priority 0. Tier 2 is
//! skipped whenever either side is unloaded, so the chain is a total
//! order over sets that are uniformly loaded or uniformly unloaded, but
//! not over a mix of the two. The tick loop therefore sorts by
//! [`OrderKey`], which agrees with `compare` among loaded elements and
//! places every unloaded element after them.

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::sync::Arc;

use cogwire_core::{
    Locator, NetworkId, PartError, PartId, PartStateError, PartTarget, PartTypeId, Position,
    Side, TickId,
};
use cogwire_part::{HookContext, ItemStack, Part, PartKind, PartRegistry, UpdateContext};
use cogwire_world::{PartContainer, PartState, World};
use tracing::warn;

use crate::error::NetworkError;
use crate::index::PartNetwork;

// ── ElementKey ─────────────────────────────────────────────────────

/// Identity of an element within a network.
///
/// Two elements with the same key wrap the same part: a container holds
/// one part per side, so the center locator and part type pin it down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey {
    /// Part category.
    pub kind: PartKind,
    /// Registered part type.
    pub part_type: PartTypeId,
    /// Where the part lives.
    pub center: Locator,
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}@{}", self.kind, self.part_type, self.center)
    }
}

// ── OrderKey ───────────────────────────────────────────────────────

/// Sort key for the tick order. Loaded elements first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct OrderKey {
    unloaded: bool,
    kind: PartKind,
    priority: Reverse<i32>,
    part_type: PartTypeId,
    position: Position,
    side: Side,
}

impl OrderKey {
    pub(crate) fn is_loaded(&self) -> bool {
        !self.unloaded
    }
}

// ── PartNetworkElement ─────────────────────────────────────────────

/// A schedulable wrapper around one part.
#[derive(Clone)]
pub struct PartNetworkElement {
    part: Arc<dyn Part>,
    part_type: PartTypeId,
    target: PartTarget,
}

impl PartNetworkElement {
    /// Wrap `part`, registered as `part_type`, bound to `target`.
    pub fn new(part: Arc<dyn Part>, part_type: PartTypeId, target: PartTarget) -> Self {
        Self {
            part,
            part_type,
            target,
        }
    }

    /// Wrap the part registered as `part_type`, if any.
    pub fn from_registry(
        registry: &PartRegistry,
        part_type: PartTypeId,
        target: PartTarget,
    ) -> Option<Self> {
        registry
            .get(part_type)
            .map(|part| Self::new(Arc::clone(part), part_type, target))
    }

    /// Identity within a network.
    pub fn key(&self) -> ElementKey {
        ElementKey {
            kind: self.kind(),
            part_type: self.part_type,
            center: self.center(),
        }
    }

    /// The wrapped part.
    pub fn part(&self) -> &Arc<dyn Part> {
        &self.part
    }

    /// Registered part type.
    pub fn part_type(&self) -> PartTypeId {
        self.part_type
    }

    /// Part category.
    pub fn kind(&self) -> PartKind {
        self.part.kind()
    }

    /// Where the part lives and what it acts on.
    pub fn target(&self) -> &PartTarget {
        &self.target
    }

    /// Where the part lives.
    pub fn center(&self) -> Locator {
        self.target.center()
    }

    // ── State resolution ───────────────────────────────────────────

    /// Whether the chunk holding the part is loaded.
    pub fn is_loaded(&self, world: &dyn World) -> bool {
        world.is_loaded(&self.center().position)
    }

    /// The container holding the part. Absent when unloaded.
    pub fn part_container<'w>(&self, world: &'w dyn World) -> Option<&'w PartContainer> {
        world.container(&self.center().position)
    }

    /// Loaded, and the container holds a part of this element's type on
    /// the center side.
    ///
    /// Check this before fetching state on any path where an absent
    /// state is expected rather than exceptional.
    pub fn has_part_state(&self, world: &dyn World) -> bool {
        self.part_container(world)
            .and_then(|c| c.part(self.center().side))
            .is_some_and(|p| p.part_type == self.part_type)
    }

    /// The part's state.
    pub fn part_state<'w>(&self, world: &'w dyn World) -> Result<&'w PartState, PartStateError> {
        world.part_state(&self.center())
    }

    /// The part's state, mutably.
    pub fn part_state_mut<'w>(
        &self,
        world: &'w mut dyn World,
    ) -> Result<&'w mut PartState, PartStateError> {
        world.part_state_mut(&self.center())
    }

    fn unreachable(&self, world: &dyn World) -> PartStateError {
        let locator = self.center();
        if self.is_loaded(world) {
            PartStateError::Absent { locator }
        } else {
            PartStateError::Unloaded { locator }
        }
    }

    // ── Ordering ───────────────────────────────────────────────────

    /// Pairwise tie-break chain. See the module docs.
    pub fn compare(&self, other: &Self, world: &dyn World) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| {
                if self.is_loaded(world) && other.is_loaded(world) {
                    other.loaded_priority(world).cmp(&self.loaded_priority(world))
                } else {
                    Ordering::Equal
                }
            })
            .then(self.part_type.cmp(&other.part_type))
            .then(self.center().position.cmp(&other.center().position))
            .then(self.center().side.cmp(&other.center().side))
    }

    /// Same element by the tie-break chain.
    pub fn same_as(&self, other: &Self, world: &dyn World) -> bool {
        self.compare(other, world) == Ordering::Equal
    }

    pub(crate) fn order_key(&self, world: &dyn World) -> OrderKey {
        let center = self.center();
        OrderKey {
            unloaded: !self.is_loaded(world),
            kind: self.kind(),
            priority: Reverse(self.loaded_priority(world)),
            part_type: self.part_type,
            position: center.position,
            side: center.side,
        }
    }

    // Missing parts rank as priority 0.
    fn loaded_priority(&self, world: &dyn World) -> i32 {
        self.priority(world).unwrap_or(0)
    }

    // ── Part queries ───────────────────────────────────────────────

    /// Current priority.
    pub fn priority(&self, world: &dyn World) -> Result<i32, PartStateError> {
        self.part_state(world).map(|s| self.part.priority(s))
    }

    /// Change the priority; the network re-sorts on its next tick.
    pub fn set_priority(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
        priority: i32,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.set_priority(ctx, &self.target, state, priority);
        Ok(())
    }

    /// Energy consumed per update.
    pub fn consumption_rate(&self, world: &dyn World) -> Result<u64, PartStateError> {
        self.part_state(world).map(|s| self.part.consumption_rate(s))
    }

    /// Ticks between updates. At least 1.
    pub fn update_interval(&self, world: &dyn World) -> Result<u32, PartStateError> {
        self.part_state(world)
            .map(|s| self.part.update_interval(s).max(1))
    }

    /// Whether the network should drive updates.
    pub fn is_update(&self, world: &dyn World) -> Result<bool, PartStateError> {
        self.part_state(world).map(|s| self.part.is_update(s))
    }

    // ── Revalidation ───────────────────────────────────────────────

    /// Whether the container is reachable for revalidation.
    pub fn can_revalidate(&self, world: &dyn World) -> bool {
        self.part_container(world).is_some()
    }

    /// Re-point the container at `network`. No-op returning `false` when
    /// the container is unreachable.
    pub fn revalidate(&self, network: NetworkId, world: &mut dyn World) -> bool {
        match world.container_mut(&self.center().position) {
            Some(container) => {
                container.set_network(Some(network));
                true
            }
            None => false,
        }
    }

    pub(crate) fn detach_network(&self, network: NetworkId, world: &mut dyn World) {
        if let Some(container) = world.container_mut(&self.center().position) {
            if container.network() == Some(network) {
                container.set_network(None);
            }
        }
    }

    // ── Membership ─────────────────────────────────────────────────

    /// Register the part in `index`, then fire its addition hook.
    ///
    /// Atomic: on an id collision the index is unchanged and the hook
    /// does not fire. Returns the registered id.
    pub fn on_network_addition(
        &self,
        network: NetworkId,
        index: &mut PartNetwork,
        tick_id: TickId,
        world: &mut dyn World,
    ) -> Result<PartId, NetworkError> {
        let state = self.part_state_mut(world)?;
        let id = state.id();
        index
            .register(id, self.center())
            .map_err(|existing| NetworkError::IndexCollision { id, existing })?;
        let ctx = HookContext::new(network, index, tick_id);
        self.part.on_network_addition(&ctx, &self.target, state);
        Ok(id)
    }

    /// Deregister `id` from `index`, then fire the removal hook.
    ///
    /// Unconditional: the index is cleaned even when the state is
    /// unreachable, in which case the hook sees `None`.
    pub fn on_network_removal(
        &self,
        network: NetworkId,
        index: &mut PartNetwork,
        id: PartId,
        tick_id: TickId,
        world: &mut dyn World,
    ) {
        index.deregister(id);
        let ctx = HookContext::new(network, index, tick_id);
        let state = self.part_state_mut(world).ok();
        self.part.on_network_removal(&ctx, &self.target, state);
    }

    // ── Lifecycle hooks ────────────────────────────────────────────

    /// Fire `before_network_kill`.
    pub fn before_network_kill(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.before_network_kill(ctx, &self.target, state);
        Ok(())
    }

    /// Fire `after_network_alive`.
    pub fn after_network_alive(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.after_network_alive(ctx, &self.target, state);
        Ok(())
    }

    /// Fire `after_network_re_alive`.
    pub fn after_network_re_alive(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.after_network_re_alive(ctx, &self.target, state);
        Ok(())
    }

    /// Fire `on_pre_removed`.
    pub fn on_pre_removed(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.on_pre_removed(ctx, &self.target, state);
        Ok(())
    }

    /// Fire `on_post_removed` with the detached state.
    pub fn on_post_removed(&self, ctx: &HookContext<'_>, state: &mut PartState) {
        self.part.on_post_removed(ctx, &self.target, state);
    }

    /// Fire `on_neighbor_change`.
    pub fn on_neighbor_change(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
        neighbor: Position,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.on_neighbor_change(ctx, &self.target, state, neighbor);
        Ok(())
    }

    /// Append the part's drops.
    pub fn add_drops(
        &self,
        world: &dyn World,
        drops: &mut Vec<ItemStack>,
        drop_main: bool,
    ) -> Result<(), PartStateError> {
        let state = self.part_state(world)?;
        self.part.add_drops(&self.target, state, drops, drop_main);
        Ok(())
    }

    // ── Update ─────────────────────────────────────────────────────

    /// Run the part's update.
    ///
    /// The state is detached from its container for the duration of the
    /// call so the part can hold the world mutably alongside it, then put
    /// back. If the slot cannot take it back (the container vanished or
    /// the side was re-occupied during the update), the detached state is
    /// dropped with a warning.
    pub fn update(&self, ctx: HookContext<'_>, world: &mut dyn World) -> Result<(), PartError> {
        let center = self.center();
        let Some(mut placed) = world
            .container_mut(&center.position)
            .and_then(|c| c.remove(center.side))
        else {
            return Err(self.unreachable(world).into());
        };

        let result = {
            let mut uctx = UpdateContext::new(ctx, world);
            self.part.update(&mut uctx, &self.target, &mut placed.state)
        };

        match world.container_mut(&center.position) {
            Some(container) => {
                if let Err(rejected) = container.insert(center.side, placed) {
                    warn!(
                        locator = %center,
                        part_id = %rejected.state.id(),
                        "side re-occupied during update; detached state dropped"
                    );
                }
            }
            None => {
                warn!(
                    locator = %center,
                    part_id = %placed.state.id(),
                    "container unreachable after update; detached state dropped"
                );
            }
        }
        result
    }

    /// Fire `post_update`.
    pub fn post_update(
        &self,
        ctx: &HookContext<'_>,
        world: &mut dyn World,
        updated: bool,
    ) -> Result<(), PartStateError> {
        let state = self.part_state_mut(world)?;
        self.part.post_update(ctx, &self.target, state, updated);
        Ok(())
    }
}

impl fmt::Debug for PartNetworkElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartNetworkElement")
            .field("part", &self.part.name())
            .field("part_type", &self.part_type)
            .field("target", &self.target)
            .finish()
    }
}
