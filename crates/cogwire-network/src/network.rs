//! The network: element storage, tick loop, energy, and lifecycle.
//!
//! A [`Network`] owns a set of [`PartNetworkElement`]s and drives their
//! updates one tick at a time. It never owns part state: every callback
//! resolves state through the [`World`] passed in, so an element whose
//! chunk is unloaded simply drops out of the tick until it comes back.
//!
//! # Tick order
//!
//! Each tick recomputes the order from current state (see
//! [`element`](crate::element) for the tie-break chain). Elements the
//! energy budget deferred on the previous tick run first, in that same
//! order, followed by everyone else.

use std::time::Instant;

use cogwire_core::{NetworkId, PartId, PartStateError, Position, TickId};
use cogwire_part::{HookContext, ItemStack};
use cogwire_world::{PartContainer, World};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::arena::{ElementArena, ElementHandle};
use crate::config::{ConfigError, NetworkConfig};
use crate::element::{ElementKey, OrderKey, PartNetworkElement};
use crate::error::NetworkError;
use crate::index::PartNetwork;
use crate::metrics::{NetworkMetrics, TickReport};

// ── Lifecycle ──────────────────────────────────────────────────────

/// Where a network is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, never initialized.
    Fresh,
    /// Initialized and ticking.
    Alive,
    /// Killed. Can be brought back with [`Network::initialize`].
    Killed,
}

// ── Slot ───────────────────────────────────────────────────────────

#[derive(Debug)]
struct Slot {
    element: PartNetworkElement,
    /// Captured at addition so removal can clean the index even when the
    /// state is unreachable.
    part_id: PartId,
    /// Ticks until the element is next due. Zero means due.
    countdown: u32,
    /// Consecutive ticks deferred for lack of energy.
    deferred_streak: u32,
}

// ── Network ────────────────────────────────────────────────────────

/// A logic network.
#[derive(Debug)]
pub struct Network {
    id: NetworkId,
    config: NetworkConfig,
    elements: ElementArena<Slot>,
    by_key: IndexMap<ElementKey, ElementHandle>,
    index: PartNetwork,
    deferred: Vec<ElementHandle>,
    lifecycle: Lifecycle,
    tick_id: TickId,
    metrics: NetworkMetrics,
}

impl Network {
    /// An empty network with a fresh id.
    pub fn new(config: NetworkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            id: NetworkId::next(),
            config,
            elements: ElementArena::new(),
            by_key: IndexMap::new(),
            index: PartNetwork::new(),
            deferred: Vec::new(),
            lifecycle: Lifecycle::Fresh,
            tick_id: TickId::default(),
            metrics: NetworkMetrics::default(),
        })
    }

    /// This network's id.
    pub fn id(&self) -> NetworkId {
        self.id
    }

    /// The configuration the network was built with.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the network has been killed.
    pub fn is_killed(&self) -> bool {
        self.lifecycle == Lifecycle::Killed
    }

    /// The last tick executed.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// Cumulative metrics.
    pub fn metrics(&self) -> &NetworkMetrics {
        &self.metrics
    }

    /// The `PartId -> Locator` index.
    pub fn part_network(&self) -> &PartNetwork {
        &self.index
    }

    /// Number of elements, loaded or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the network holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 0
    }

    /// Whether the element is in the network.
    pub fn contains(&self, key: &ElementKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// The element with `key`.
    pub fn element(&self, key: &ElementKey) -> Option<&PartNetworkElement> {
        let handle = self.by_key.get(key)?;
        self.elements.get(*handle).map(|s| &s.element)
    }

    /// Keys of all elements, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &ElementKey> + '_ {
        self.by_key.keys()
    }

    /// Whether the element was deferred on the last tick.
    pub fn is_deferred(&self, key: &ElementKey) -> bool {
        self.by_key
            .get(key)
            .is_some_and(|h| self.deferred.contains(h))
    }

    fn hook_context(&self) -> HookContext<'_> {
        HookContext::new(self.id, &self.index, self.tick_id)
    }

    /// Loaded elements in tick order, and how many were unloaded.
    fn ordered(&self, world: &dyn World) -> (Vec<ElementHandle>, u32) {
        let mut keyed: Vec<(OrderKey, ElementHandle)> = self
            .elements
            .iter()
            .map(|(handle, slot)| (slot.element.order_key(world), handle))
            .collect();
        keyed.sort_by_key(|(key, _)| *key);
        let mut unreachable = 0;
        let ordered = keyed
            .into_iter()
            .filter_map(|(key, handle)| {
                if key.is_loaded() {
                    Some(handle)
                } else {
                    unreachable += 1;
                    None
                }
            })
            .collect();
        (ordered, unreachable)
    }

    // ── Membership ─────────────────────────────────────────────────

    /// Add an element.
    ///
    /// Registers the part in the index, fires its addition hook, and
    /// points its container at this network. The element's state must be
    /// reachable, and its container must not belong to another network.
    /// A duplicate, a foreign owner, or an index collision leaves the
    /// network unchanged.
    pub fn add_element(
        &mut self,
        element: PartNetworkElement,
        world: &mut dyn World,
    ) -> Result<(), NetworkError> {
        let key = element.key();
        if self.by_key.contains_key(&key) {
            return Err(NetworkError::Duplicate { key });
        }
        if let Some(other) = element
            .part_container(world)
            .and_then(PartContainer::network)
            .filter(|owner| *owner != self.id)
        {
            return Err(NetworkError::OwnedByOtherNetwork { key, other });
        }
        let part_id =
            element.on_network_addition(self.id, &mut self.index, self.tick_id, world)?;
        element.revalidate(self.id, world);
        let handle = self.elements.insert(Slot {
            element,
            part_id,
            countdown: 0,
            deferred_streak: 0,
        });
        self.by_key.insert(key, handle);
        debug!(network = %self.id, element = %key, part_id = %part_id, "element added");
        Ok(())
    }

    /// Remove an element and return it.
    ///
    /// The index entry is always cleaned first; the removal hook then
    /// fires with the state, or with `None` if the state is unreachable.
    pub fn remove_element(
        &mut self,
        key: &ElementKey,
        world: &mut dyn World,
    ) -> Result<PartNetworkElement, NetworkError> {
        let handle = self
            .by_key
            .shift_remove(key)
            .ok_or(NetworkError::UnknownElement { key: *key })?;
        let slot = self
            .elements
            .remove(handle)
            .ok_or(NetworkError::UnknownElement { key: *key })?;
        self.deferred.retain(|h| *h != handle);
        slot.element
            .on_network_removal(self.id, &mut self.index, slot.part_id, self.tick_id, world);
        slot.element.detach_network(self.id, world);
        debug!(network = %self.id, element = %key, part_id = %slot.part_id, "element removed");
        Ok(slot.element)
    }

    // ── Tick ───────────────────────────────────────────────────────

    /// Run one tick.
    ///
    /// Per-element failures are logged and counted in the report; only a
    /// killed network makes the tick itself fail.
    pub fn tick(&mut self, world: &mut dyn World) -> Result<TickReport, NetworkError> {
        // 0. Killed networks do not tick.
        if self.is_killed() {
            return Err(NetworkError::Killed);
        }
        let tick_start = Instant::now();
        self.tick_id = self.tick_id.next();
        debug!(network = %self.id, tick = %self.tick_id, elements = self.len(), "tick start");

        let mut report = TickReport {
            tick_id: self.tick_id,
            ..TickReport::default()
        };

        // 1. Order loaded elements; unloaded ones sit this tick out.
        let (ordered, unreachable) = self.ordered(world);
        report.skipped_unreachable = unreachable;

        // 2. Last tick's deferrals go first, keeping this tick's order.
        let previous = std::mem::take(&mut self.deferred);
        let (mut schedule, rest): (Vec<_>, Vec<_>) =
            ordered.into_iter().partition(|h| previous.contains(h));
        schedule.extend(rest);

        // 3. Run due elements against a fresh budget.
        let mut budget = self.config.energy_per_tick;
        let ctx = HookContext::new(self.id, &self.index, self.tick_id);
        for handle in schedule {
            let Some(slot) = self.elements.get_mut(handle) else {
                continue;
            };
            let element = &slot.element;
            let key = element.key();

            // 3a. Only updatable elements whose countdown elapsed are due.
            match element.is_update(world) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    report.skipped_unreachable += 1;
                    debug!(network = %self.id, element = %key, error = %e, "skipped");
                    continue;
                }
            }
            if slot.countdown > 0 {
                slot.countdown -= 1;
                continue;
            }
            report.due += 1;

            // 3b. Energy.
            let rate = match element.consumption_rate(world) {
                Ok(rate) => rate,
                Err(e) => {
                    report.skipped_unreachable += 1;
                    debug!(network = %self.id, element = %key, error = %e, "skipped");
                    continue;
                }
            };
            if let Some(remaining) = budget.as_mut() {
                if rate > *remaining {
                    report.deferred += 1;
                    slot.deferred_streak += 1;
                    self.deferred.push(handle);
                    debug!(
                        network = %self.id,
                        element = %key,
                        rate,
                        remaining = *remaining,
                        streak = slot.deferred_streak,
                        "update deferred"
                    );
                    if self.config.max_deferred_ticks == Some(slot.deferred_streak) {
                        self.metrics.starvation_events += 1;
                        warn!(
                            network = %self.id,
                            element = %key,
                            streak = slot.deferred_streak,
                            "element starved of energy"
                        );
                    }
                    post_update(element, &ctx, world, false);
                    continue;
                }
                *remaining -= rate;
            }
            report.energy_consumed = report.energy_consumed.saturating_add(rate);
            slot.deferred_streak = 0;

            // 3c. Update with the state detached, then record the outcome.
            let updated = match element.update(ctx, world) {
                Ok(()) => {
                    report.updated += 1;
                    if let Ok(state) = element.part_state_mut(world) {
                        state.clear_last_error();
                    }
                    true
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(network = %self.id, element = %key, error = %e, "update failed");
                    if let Ok(state) = element.part_state_mut(world) {
                        state.set_last_error(e.to_string());
                    }
                    false
                }
            };
            slot.countdown = element.update_interval(world).unwrap_or(1) - 1;
            post_update(element, &ctx, world, updated);
        }

        // 4. Metrics.
        report.total_us = tick_start.elapsed().as_micros() as u64;
        self.metrics.record(&report);
        debug!(
            network = %self.id,
            tick = %self.tick_id,
            updated = report.updated,
            deferred = report.deferred,
            failed = report.failed,
            skipped = report.skipped_unreachable,
            energy = report.energy_consumed,
            "tick finish"
        );
        Ok(report)
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Bring the network alive.
    ///
    /// Fires `after_network_alive` the first time and
    /// `after_network_re_alive` after a kill. No-op if already alive.
    pub fn initialize(&mut self, world: &mut dyn World) {
        let revived = match self.lifecycle {
            Lifecycle::Alive => return,
            Lifecycle::Fresh => false,
            Lifecycle::Killed => true,
        };
        let (ordered, unreachable) = self.ordered(world);
        let ctx = self.hook_context();
        for handle in ordered {
            let Some(slot) = self.elements.get(handle) else {
                continue;
            };
            let result = if revived {
                slot.element.after_network_re_alive(&ctx, world)
            } else {
                slot.element.after_network_alive(&ctx, world)
            };
            log_hook_failure(self.id, &slot.element, result);
        }
        self.lifecycle = Lifecycle::Alive;
        info!(network = %self.id, revived, elements = self.len(), unreachable, "network alive");
    }

    /// Tear the network down.
    ///
    /// Fires `before_network_kill` on every reachable element. Idempotent.
    pub fn kill(&mut self, world: &mut dyn World) {
        if self.is_killed() {
            return;
        }
        let (ordered, unreachable) = self.ordered(world);
        let ctx = self.hook_context();
        for handle in ordered {
            let Some(slot) = self.elements.get(handle) else {
                continue;
            };
            log_hook_failure(self.id, &slot.element, slot.element.before_network_kill(&ctx, world));
        }
        self.lifecycle = Lifecycle::Killed;
        self.deferred.clear();
        info!(network = %self.id, elements = self.len(), unreachable, "network killed");
    }

    // ── Structural operations ──────────────────────────────────────

    /// Move every element of `other` into this network.
    ///
    /// Fails without moving anything if any element is already here.
    /// Elements whose state is unreachable stay in `other`, as do elements
    /// whose part id collides with one already indexed here. Returns the
    /// number moved.
    pub fn merge(
        &mut self,
        other: &mut Network,
        world: &mut dyn World,
    ) -> Result<usize, NetworkError> {
        if let Some(key) = other.keys().find(|k| self.contains(k)) {
            return Err(NetworkError::Duplicate { key: *key });
        }
        let keys: Vec<ElementKey> = other.keys().copied().collect();
        let mut moved = 0;
        let mut left = 0;
        for key in keys {
            let reachable = other
                .element(&key)
                .is_some_and(|e| e.has_part_state(world));
            if !reachable {
                left += 1;
                continue;
            }
            let element = other.remove_element(&key, world)?;
            match self.add_element(element.clone(), world) {
                Ok(()) => moved += 1,
                Err(e) => {
                    left += 1;
                    warn!(source = %other.id, target = %self.id, element = %key, error = %e, "merge kept element in source");
                    if let Err(e) = other.add_element(element, world) {
                        warn!(network = %other.id, element = %key, error = %e, "element lost during merge");
                    }
                }
            }
        }
        self.revalidate(world);
        info!(source = %other.id, target = %self.id, moved, left, "networks merged");
        Ok(moved)
    }

    /// Point every reachable element's container at this network.
    /// Returns how many were revalidated.
    pub fn revalidate(&mut self, world: &mut dyn World) -> usize {
        let mut revalidated = 0;
        for (_, slot) in self.elements.iter() {
            if slot.element.revalidate(self.id, world) {
                revalidated += 1;
            }
        }
        revalidated
    }

    /// Tell elements next to `position` that it changed. Returns how many
    /// were notified.
    pub fn neighbor_changed(&mut self, world: &mut dyn World, position: Position) -> usize {
        let neighbours = position.neighbours();
        let (ordered, _) = self.ordered(world);
        let ctx = self.hook_context();
        let mut notified = 0;
        for handle in ordered {
            let Some(slot) = self.elements.get(handle) else {
                continue;
            };
            if !neighbours.contains(&slot.element.center().position) {
                continue;
            }
            match slot.element.on_neighbor_change(&ctx, world, position) {
                Ok(()) => notified += 1,
                Err(e) => log_hook_failure(self.id, &slot.element, Err(e)),
            }
        }
        notified
    }

    /// Destroy an element's part in the world and collect its drops.
    ///
    /// Fires `on_pre_removed`, collects drops including the part item,
    /// removes the element from the network, takes the part out of its
    /// container, then fires `on_post_removed` on the detached state.
    /// Fails before changing anything if the state is unreachable.
    pub fn destroy_element(
        &mut self,
        key: &ElementKey,
        world: &mut dyn World,
    ) -> Result<Vec<ItemStack>, NetworkError> {
        let element = self
            .element(key)
            .cloned()
            .ok_or(NetworkError::UnknownElement { key: *key })?;

        element.on_pre_removed(&self.hook_context(), world)?;
        let mut drops = Vec::new();
        element.add_drops(world, &mut drops, true)?;
        self.remove_element(key, world)?;

        let center = element.center();
        let detached = world
            .container_mut(&center.position)
            .and_then(|c| c.remove(center.side));
        match detached {
            Some(mut placed) => element.on_post_removed(&self.hook_context(), &mut placed.state),
            None => warn!(network = %self.id, element = %key, "part vanished before detach"),
        }
        info!(network = %self.id, element = %key, drops = drops.len(), "element destroyed");
        Ok(drops)
    }

    /// Change an element's priority. Takes effect on the next tick.
    pub fn set_priority(
        &mut self,
        key: &ElementKey,
        world: &mut dyn World,
        priority: i32,
    ) -> Result<(), NetworkError> {
        let element = self
            .element(key)
            .ok_or(NetworkError::UnknownElement { key: *key })?;
        element.set_priority(&self.hook_context(), world, priority)?;
        Ok(())
    }

    /// Energy all reachable elements would consume if updated this tick.
    pub fn consumption_rate(&self, world: &dyn World) -> u64 {
        self.elements
            .iter()
            .filter_map(|(_, slot)| slot.element.consumption_rate(world).ok())
            .fold(0, u64::saturating_add)
    }
}

fn post_update(
    element: &PartNetworkElement,
    ctx: &HookContext<'_>,
    world: &mut dyn World,
    updated: bool,
) {
    if let Err(e) = element.post_update(ctx, world, updated) {
        warn!(network = %ctx.network_id(), element = %element.key(), error = %e, "post_update skipped");
    }
}

fn log_hook_failure(
    network: NetworkId,
    element: &PartNetworkElement,
    result: Result<(), PartStateError>,
) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_unloaded() => {
            debug!(network = %network, element = %element.key(), error = %e, "hook skipped");
        }
        Err(e) => {
            warn!(network = %network, element = %element.key(), error = %e, "hook skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cogwire_core::{DimensionId, Locator, PartTarget, PartTypeId, Side};
    use cogwire_part::{Part, PartKind};
    use cogwire_world::{GridWorld, PartState};

    struct Idle;

    impl Part for Idle {
        fn name(&self) -> &str {
            "idle"
        }

        fn kind(&self) -> PartKind {
            PartKind::Panel
        }
    }

    fn element_at(world: &mut GridWorld, x: i32) -> PartNetworkElement {
        let center = Locator::new(Position::new(DimensionId(0), x, 64, 0), Side::Up);
        world
            .place_part(center, PartTypeId(0), PartState::new())
            .unwrap();
        PartNetworkElement::new(Arc::new(Idle), PartTypeId(0), PartTarget::from_center(center))
    }

    #[test]
    fn invalid_config_rejected() {
        assert_eq!(
            Network::new(NetworkConfig::with_energy(0)).unwrap_err(),
            ConfigError::ZeroEnergyBudget
        );
    }

    #[test]
    fn add_points_container_at_network_and_remove_detaches() {
        let mut world = GridWorld::new();
        let mut net = Network::new(NetworkConfig::default()).unwrap();
        let el = element_at(&mut world, 0);
        let key = el.key();
        net.add_element(el, &mut world).unwrap();
        let pos = key.center.position;
        assert_eq!(world.container(&pos).unwrap().network(), Some(net.id()));

        net.remove_element(&key, &mut world).unwrap();
        assert_eq!(world.container(&pos).unwrap().network(), None);
        assert!(net.is_empty());
    }

    #[test]
    fn unknown_element_errors() {
        let mut world = GridWorld::new();
        let mut net = Network::new(NetworkConfig::default()).unwrap();
        let key = element_at(&mut world, 0).key();
        assert_eq!(
            net.remove_element(&key, &mut world).unwrap_err(),
            NetworkError::UnknownElement { key }
        );
        assert!(net.set_priority(&key, &mut world, 3).is_err());
    }

    #[test]
    fn lifecycle_transitions() {
        let mut world = GridWorld::new();
        let mut net = Network::new(NetworkConfig::default()).unwrap();
        assert_eq!(net.lifecycle(), Lifecycle::Fresh);
        net.initialize(&mut world);
        assert_eq!(net.lifecycle(), Lifecycle::Alive);
        net.kill(&mut world);
        assert!(net.is_killed());
        assert_eq!(net.tick(&mut world).unwrap_err(), NetworkError::Killed);
        net.initialize(&mut world);
        assert_eq!(net.lifecycle(), Lifecycle::Alive);
        assert!(net.tick(&mut world).is_ok());
    }

    #[test]
    fn tick_ids_advance() {
        let mut world = GridWorld::new();
        let mut net = Network::new(NetworkConfig::default()).unwrap();
        assert_eq!(net.tick(&mut world).unwrap().tick_id, TickId(1));
        assert_eq!(net.tick(&mut world).unwrap().tick_id, TickId(2));
        assert_eq!(net.metrics().ticks, 2);
    }
}
