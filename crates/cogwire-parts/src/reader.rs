//! A part that samples a read aspect.

use cogwire_aspect::{aspects, AspectError, ReadAspect};
use cogwire_core::{PartError, PartTarget};
use cogwire_part::{HookContext, Part, PartKind, UpdateContext};
use cogwire_value::Value;
use cogwire_world::PartState;
use tracing::trace;

use crate::seed_properties;

/// Reads one aspect at its target every update.
///
/// The result is stored in the part's state under the aspect id, so the
/// latest sample survives unloads and is visible to anything that can
/// reach the state.
///
/// # Examples
///
/// ```
/// use cogwire_part::{Part, PartKind};
/// use cogwire_parts::ReaderPart;
///
/// let reader = ReaderPart::new("tank_reader", "fluid.amount").with_rate(2);
/// assert_eq!(reader.kind(), PartKind::Reader);
/// assert_eq!(reader.aspect(), "fluid.amount");
/// ```
#[derive(Debug)]
pub struct ReaderPart {
    name: String,
    aspect: &'static str,
    rate: u64,
}

impl ReaderPart {
    /// A reader of the read aspect `aspect`. Consumes no energy.
    pub fn new(name: impl Into<String>, aspect: &'static str) -> Self {
        Self {
            name: name.into(),
            aspect,
            rate: 0,
        }
    }

    /// Consume `rate` energy per update.
    #[must_use]
    pub fn with_rate(mut self, rate: u64) -> Self {
        self.rate = rate;
        self
    }

    /// The aspect this part reads.
    pub fn aspect(&self) -> &'static str {
        self.aspect
    }

    /// The last sampled value, if any update has run.
    pub fn last_value<'s>(&self, state: &'s PartState) -> Option<&'s Value> {
        state.value(self.aspect)
    }

    fn read_aspect(&self) -> Result<&'static dyn ReadAspect, AspectError> {
        aspects()
            .read_aspect(self.aspect)
            .map(|a| a.as_ref())
            .ok_or_else(|| AspectError::UnknownAspect {
                id: self.aspect.to_string(),
            })
    }
}

impl Part for ReaderPart {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PartKind {
        PartKind::Reader
    }

    fn consumption_rate(&self, _state: &PartState) -> u64 {
        self.rate
    }

    fn on_network_addition(&self, _ctx: &HookContext<'_>, _target: &PartTarget, state: &mut PartState) {
        if let Ok(aspect) = self.read_aspect() {
            seed_properties(state, self.aspect, aspect.create_default_properties());
        }
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        target: &PartTarget,
        state: &mut PartState,
    ) -> Result<(), PartError> {
        let aspect = self.read_aspect()?;
        let value = match state.aspect_properties(self.aspect) {
            Some(props) => aspect.read(ctx.world(), target, props),
            None => aspect.read(ctx.world(), target, &aspect.create_default_properties()),
        };
        trace!(part = %self.name, aspect = self.aspect, %value, "aspect read");
        state.set_value(self.aspect, value);
        Ok(())
    }
}
