//! A part that applies a stored value through a write aspect.

use cogwire_aspect::{aspects, AspectError, WriteAspect};
use cogwire_core::{PartError, PartTarget};
use cogwire_part::{HookContext, Part, PartKind, UpdateContext};
use cogwire_value::Value;
use cogwire_world::PartState;
use tracing::trace;

use crate::seed_properties;

/// Stored-value key a [`WriterPart`] takes its value from by default.
pub const WRITE_VALUE: &str = "write_value";

/// Writes a value from its own state to its target every update.
///
/// Idle while the source key holds no value. A value the aspect does not
/// accept fails the update and leaves the world untouched.
#[derive(Debug)]
pub struct WriterPart {
    name: String,
    aspect: &'static str,
    source: String,
    rate: u64,
}

impl WriterPart {
    /// A writer through the write aspect `aspect`, fed from [`WRITE_VALUE`].
    pub fn new(name: impl Into<String>, aspect: &'static str) -> Self {
        Self {
            name: name.into(),
            aspect,
            source: WRITE_VALUE.to_string(),
            rate: 0,
        }
    }

    /// Take the value from a different stored key.
    #[must_use]
    pub fn with_source(mut self, key: impl Into<String>) -> Self {
        self.source = key.into();
        self
    }

    /// Consume `rate` energy per update.
    #[must_use]
    pub fn with_rate(mut self, rate: u64) -> Self {
        self.rate = rate;
        self
    }

    /// The aspect this part writes through.
    pub fn aspect(&self) -> &'static str {
        self.aspect
    }

    /// The stored key the written value comes from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Store `value` under the source key as the next value to apply.
    pub fn set_input(&self, state: &mut PartState, value: Value) {
        state.set_value(self.source.clone(), value);
    }

    fn write_aspect(&self) -> Result<&'static dyn WriteAspect, AspectError> {
        aspects()
            .write_aspect(self.aspect)
            .map(|a| a.as_ref())
            .ok_or_else(|| AspectError::UnknownAspect {
                id: self.aspect.to_string(),
            })
    }
}

impl Part for WriterPart {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PartKind {
        PartKind::Writer
    }

    fn consumption_rate(&self, _state: &PartState) -> u64 {
        self.rate
    }

    fn on_network_addition(&self, _ctx: &HookContext<'_>, _target: &PartTarget, state: &mut PartState) {
        if let Ok(aspect) = self.write_aspect() {
            seed_properties(state, self.aspect, aspect.create_default_properties());
        }
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        target: &PartTarget,
        state: &mut PartState,
    ) -> Result<(), PartError> {
        let aspect = self.write_aspect()?;
        let Some(value) = state.value(&self.source) else {
            return Ok(());
        };
        match state.aspect_properties(self.aspect) {
            Some(props) => aspect.write(ctx.world_mut(), target, props, value)?,
            None => aspect.write(
                ctx.world_mut(),
                target,
                &aspect.create_default_properties(),
                value,
            )?,
        }
        trace!(part = %self.name, aspect = self.aspect, %value, "aspect written");
        Ok(())
    }
}
