//! The [`Part`] trait and item drops.

use cogwire_core::{PartError, PartTarget, Position};
use cogwire_world::PartState;

use crate::context::{HookContext, UpdateContext};
use crate::kind::PartKind;

/// An item produced when a part is destroyed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    /// Item name.
    pub item: String,
    /// Number of items.
    pub count: u32,
}

impl ItemStack {
    /// Construct a stack.
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// A behavior bound to a locator and driven by a network.
///
/// # Contract
///
/// - `&self`: parts are stateless; everything that changes lives in the
///   [`PartState`] lent to each callback, never cached across ticks.
/// - Each lifecycle hook fires exactly once per transition.
/// - `update` may be skipped on any tick the network runs out of energy;
///   it must tolerate being called later than its interval asked for.
///
/// # Object safety
///
/// This trait is object-safe; registries store parts as
/// `Arc<dyn Part>`.
///
/// # Examples
///
/// A part that counts its updates in a stored value:
///
/// ```
/// use cogwire_core::{PartError, PartTarget};
/// use cogwire_part::{Part, PartKind, UpdateContext};
/// use cogwire_value::Value;
/// use cogwire_world::PartState;
///
/// struct Tally;
///
/// impl Part for Tally {
///     fn name(&self) -> &str { "tally" }
///
///     fn kind(&self) -> PartKind { PartKind::Panel }
///
///     fn update(
///         &self,
///         _ctx: &mut UpdateContext<'_>,
///         _target: &PartTarget,
///         state: &mut PartState,
///     ) -> Result<(), PartError> {
///         let n = state.value("count").and_then(Value::as_integer).unwrap_or(0);
///         state.set_value("count", Value::Integer(n + 1));
///         Ok(())
///     }
/// }
///
/// assert_eq!(Tally.kind(), PartKind::Panel);
/// ```
pub trait Part: Send + Sync + 'static {
    /// Unique registry name.
    fn name(&self) -> &str;

    /// Category, used as the first ordering tier.
    fn kind(&self) -> PartKind;

    /// Update priority. Higher runs earlier within a kind.
    fn priority(&self, state: &PartState) -> i32 {
        state.priority()
    }

    /// Change the priority. The network picks it up on its next tick.
    fn set_priority(
        &self,
        _ctx: &HookContext<'_>,
        _target: &PartTarget,
        state: &mut PartState,
        priority: i32,
    ) {
        state.set_priority(priority);
    }

    /// Ticks between updates.
    fn update_interval(&self, state: &PartState) -> u32 {
        state.update_interval()
    }

    /// Whether the network should drive `update` at all.
    fn is_update(&self, state: &PartState) -> bool {
        state.is_update()
    }

    /// Energy consumed per update.
    fn consumption_rate(&self, _state: &PartState) -> u64 {
        0
    }

    /// Do one tick of work.
    fn update(
        &self,
        _ctx: &mut UpdateContext<'_>,
        _target: &PartTarget,
        _state: &mut PartState,
    ) -> Result<(), PartError> {
        Ok(())
    }

    /// Called after every tick the part was due, whether or not `update`
    /// actually ran.
    fn post_update(
        &self,
        _ctx: &HookContext<'_>,
        _target: &PartTarget,
        _state: &mut PartState,
        _updated: bool,
    ) {
    }

    /// The part joined a network.
    fn on_network_addition(&self, _ctx: &HookContext<'_>, _target: &PartTarget, _state: &mut PartState) {}

    /// The part left a network. `state` is `None` when unreachable.
    fn on_network_removal(
        &self,
        _ctx: &HookContext<'_>,
        _target: &PartTarget,
        _state: Option<&mut PartState>,
    ) {
    }

    /// The network is being torn down while the part persists.
    fn before_network_kill(&self, _ctx: &HookContext<'_>, _target: &PartTarget, _state: &mut PartState) {}

    /// The network came alive for the first time.
    fn after_network_alive(&self, _ctx: &HookContext<'_>, _target: &PartTarget, _state: &mut PartState) {}

    /// The network came alive again after a kill.
    fn after_network_re_alive(
        &self,
        _ctx: &HookContext<'_>,
        _target: &PartTarget,
        _state: &mut PartState,
    ) {
    }

    /// The part is about to be removed from the world.
    fn on_pre_removed(&self, _ctx: &HookContext<'_>, _target: &PartTarget, _state: &mut PartState) {}

    /// The part was removed from the world. `state` is the detached state.
    fn on_post_removed(&self, _ctx: &HookContext<'_>, _target: &PartTarget, _state: &mut PartState) {}

    /// A block next to the part changed.
    fn on_neighbor_change(
        &self,
        _ctx: &HookContext<'_>,
        _target: &PartTarget,
        _state: &mut PartState,
        _neighbor: Position,
    ) {
    }

    /// Append the items this part leaves behind when destroyed.
    ///
    /// `drop_main` includes the part item itself. Pure append.
    fn add_drops(
        &self,
        _target: &PartTarget,
        _state: &PartState,
        drops: &mut Vec<ItemStack>,
        drop_main: bool,
    ) {
        if drop_main {
            drops.push(ItemStack::new(self.name(), 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogwire_core::{DimensionId, Locator, Side};

    struct Bare;

    impl Part for Bare {
        fn name(&self) -> &str {
            "bare"
        }

        fn kind(&self) -> PartKind {
            PartKind::Connector
        }
    }

    fn target() -> PartTarget {
        PartTarget::from_center(Locator::new(
            Position::new(DimensionId(0), 0, 0, 0),
            Side::Up,
        ))
    }

    #[test]
    fn defaults_read_state() {
        let mut state = PartState::new();
        state.set_priority(4);
        state.set_update_interval(3);
        assert_eq!(Bare.priority(&state), 4);
        assert_eq!(Bare.update_interval(&state), 3);
        assert!(!Bare.is_update(&state));
        assert_eq!(Bare.consumption_rate(&state), 0);
    }

    #[test]
    fn default_drops_append_main_item_only_when_asked() {
        let state = PartState::new();
        let mut drops = vec![ItemStack::new("existing", 2)];
        Bare.add_drops(&target(), &state, &mut drops, false);
        assert_eq!(drops.len(), 1);
        Bare.add_drops(&target(), &state, &mut drops, true);
        assert_eq!(drops, vec![ItemStack::new("existing", 2), ItemStack::new("bare", 1)]);
    }
}
