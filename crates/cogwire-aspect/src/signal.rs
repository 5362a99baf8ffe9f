//! Aspects over a target's signal port.

use cogwire_core::PartTarget;
use cogwire_value::{AspectProperties, Value, ValueType, BOOLEAN, INTEGER};
use cogwire_world::{Signal, World, MAX_SIGNAL};

use crate::aspect::{Aspect, ReadAspect, WriteAspect};
use crate::error::AspectError;

fn set_level(
    aspect: &'static str,
    world: &mut dyn World,
    target: &PartTarget,
    level: i32,
) -> Result<(), AspectError> {
    let locator = target.target();
    let port = world
        .signal_mut(&locator)
        .ok_or(AspectError::MissingCapability {
            aspect,
            capability: "signal",
            locator,
        })?;
    port.set_level(level);
    Ok(())
}

/// Current signal level at the target.
#[derive(Debug, Default)]
pub struct SignalLevel;

impl Aspect for SignalLevel {
    fn id(&self) -> &'static str {
        "signal.level"
    }

    fn value_type(&self) -> &'static ValueType {
        &INTEGER
    }
}

impl ReadAspect for SignalLevel {
    fn read(&self, world: &dyn World, target: &PartTarget, _properties: &AspectProperties) -> Value {
        world
            .signal(&target.target())
            .map(|s| Value::Integer(s.level()))
            .unwrap_or_else(|| INTEGER.default_value())
    }
}

/// Emit an integer as the signal level. Clamped by the port.
#[derive(Debug, Default)]
pub struct SignalInteger;

impl Aspect for SignalInteger {
    fn id(&self) -> &'static str {
        "signal.integer"
    }

    fn value_type(&self) -> &'static ValueType {
        &INTEGER
    }
}

impl WriteAspect for SignalInteger {
    fn apply(
        &self,
        world: &mut dyn World,
        target: &PartTarget,
        _properties: &AspectProperties,
        value: &Value,
    ) -> Result<(), AspectError> {
        let level = value.as_integer().ok_or(AspectError::TypeMismatch {
            aspect: self.id(),
            expected: INTEGER.name(),
            found: value.value_type().name(),
        })?;
        set_level(self.id(), world, target, level)
    }
}

/// Emit full strength for `true`, nothing for `false`.
#[derive(Debug, Default)]
pub struct SignalBoolean;

impl Aspect for SignalBoolean {
    fn id(&self) -> &'static str {
        "signal.boolean"
    }

    fn value_type(&self) -> &'static ValueType {
        &BOOLEAN
    }
}

impl WriteAspect for SignalBoolean {
    fn apply(
        &self,
        world: &mut dyn World,
        target: &PartTarget,
        _properties: &AspectProperties,
        value: &Value,
    ) -> Result<(), AspectError> {
        let on = value.as_boolean().ok_or(AspectError::TypeMismatch {
            aspect: self.id(),
            expected: BOOLEAN.name(),
            found: value.value_type().name(),
        })?;
        set_level(self.id(), world, target, if on { MAX_SIGNAL } else { 0 })
    }
}
