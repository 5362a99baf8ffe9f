//! Reusable part fixtures.
//!
//! - [`CountingPart`]: counts its updates in stored state, with a
//!   configurable energy rate.
//! - [`FailingPart`]: fails deterministically after N successful calls.
//! - [`RecordingPart`]: logs every callback into a shared [`HookLog`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cogwire_core::{Locator, PartError, PartTarget, Position};
use cogwire_part::{HookContext, Part, PartKind, UpdateContext};
use cogwire_value::Value;
use cogwire_world::PartState;
use parking_lot::Mutex;

/// Stored-value key [`CountingPart`] increments.
pub const UPDATES: &str = "updates";

fn bump(state: &mut PartState) {
    let n = state.value(UPDATES).and_then(Value::as_integer).unwrap_or(0);
    state.set_value(UPDATES, Value::Integer(n + 1));
}

/// Increments the `updates` stored value on every update.
pub struct CountingPart {
    pub name: String,
    pub kind: PartKind,
    pub rate: u64,
}

impl CountingPart {
    pub fn new(name: impl Into<String>, kind: PartKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rate: 0,
        }
    }

    /// Consume `rate` energy per update.
    pub fn with_rate(mut self, rate: u64) -> Self {
        self.rate = rate;
        self
    }
}

impl Part for CountingPart {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PartKind {
        self.kind
    }

    fn consumption_rate(&self, _state: &PartState) -> u64 {
        self.rate
    }

    fn update(
        &self,
        _ctx: &mut UpdateContext<'_>,
        _target: &PartTarget,
        state: &mut PartState,
    ) -> Result<(), PartError> {
        bump(state);
        Ok(())
    }
}

/// Succeeds `succeed_count` times, then fails every update.
pub struct FailingPart {
    pub name: String,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingPart {
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Updates attempted so far.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Part for FailingPart {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PartKind {
        PartKind::Panel
    }

    fn update(
        &self,
        _ctx: &mut UpdateContext<'_>,
        _target: &PartTarget,
        state: &mut PartState,
    ) -> Result<(), PartError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(PartError::failed(format!(
                "failed after {} successful calls",
                self.succeed_count
            )));
        }
        bump(state);
        Ok(())
    }
}

/// One observed callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookEvent {
    Added(Locator),
    Removed { at: Locator, had_state: bool },
    Killed(Locator),
    Alive(Locator),
    ReAlive(Locator),
    PreRemoved(Locator),
    PostRemoved(Locator),
    Neighbor { at: Locator, changed: Position },
    Updated(Locator),
    PostUpdate { at: Locator, updated: bool },
    PrioritySet { at: Locator, priority: i32 },
}

/// Shared, thread-safe event log.
pub type HookLog = Arc<Mutex<Vec<HookEvent>>>;

/// Records every callback it receives.
pub struct RecordingPart {
    pub name: String,
    pub kind: PartKind,
    pub rate: u64,
    log: HookLog,
}

impl RecordingPart {
    pub fn new(name: impl Into<String>, kind: PartKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rate: 0,
            log: HookLog::default(),
        }
    }

    pub fn with_rate(mut self, rate: u64) -> Self {
        self.rate = rate;
        self
    }

    /// Record into an existing log, so several parts share one timeline.
    pub fn sharing(mut self, log: &HookLog) -> Self {
        self.log = Arc::clone(log);
        self
    }

    /// Handle on the log, for inspection after the part is moved into a
    /// registry or element.
    pub fn log(&self) -> HookLog {
        Arc::clone(&self.log)
    }

    fn push(&self, event: HookEvent) {
        self.log.lock().push(event);
    }
}

impl Part for RecordingPart {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PartKind {
        self.kind
    }

    fn consumption_rate(&self, _state: &PartState) -> u64 {
        self.rate
    }

    fn set_priority(
        &self,
        _ctx: &HookContext<'_>,
        target: &PartTarget,
        state: &mut PartState,
        priority: i32,
    ) {
        state.set_priority(priority);
        self.push(HookEvent::PrioritySet {
            at: target.center(),
            priority,
        });
    }

    fn update(
        &self,
        _ctx: &mut UpdateContext<'_>,
        target: &PartTarget,
        state: &mut PartState,
    ) -> Result<(), PartError> {
        bump(state);
        self.push(HookEvent::Updated(target.center()));
        Ok(())
    }

    fn post_update(
        &self,
        _ctx: &HookContext<'_>,
        target: &PartTarget,
        _state: &mut PartState,
        updated: bool,
    ) {
        self.push(HookEvent::PostUpdate {
            at: target.center(),
            updated,
        });
    }

    fn on_network_addition(&self, _ctx: &HookContext<'_>, target: &PartTarget, _state: &mut PartState) {
        self.push(HookEvent::Added(target.center()));
    }

    fn on_network_removal(
        &self,
        _ctx: &HookContext<'_>,
        target: &PartTarget,
        state: Option<&mut PartState>,
    ) {
        self.push(HookEvent::Removed {
            at: target.center(),
            had_state: state.is_some(),
        });
    }

    fn before_network_kill(&self, _ctx: &HookContext<'_>, target: &PartTarget, _state: &mut PartState) {
        self.push(HookEvent::Killed(target.center()));
    }

    fn after_network_alive(&self, _ctx: &HookContext<'_>, target: &PartTarget, _state: &mut PartState) {
        self.push(HookEvent::Alive(target.center()));
    }

    fn after_network_re_alive(
        &self,
        _ctx: &HookContext<'_>,
        target: &PartTarget,
        _state: &mut PartState,
    ) {
        self.push(HookEvent::ReAlive(target.center()));
    }

    fn on_pre_removed(&self, _ctx: &HookContext<'_>, target: &PartTarget, _state: &mut PartState) {
        self.push(HookEvent::PreRemoved(target.center()));
    }

    fn on_post_removed(&self, _ctx: &HookContext<'_>, target: &PartTarget, _state: &mut PartState) {
        self.push(HookEvent::PostRemoved(target.center()));
    }

    fn on_neighbor_change(
        &self,
        _ctx: &HookContext<'_>,
        target: &PartTarget,
        _state: &mut PartState,
        neighbor: Position,
    ) {
        self.push(HookEvent::Neighbor {
            at: target.center(),
            changed: neighbor,
        });
    }
}
