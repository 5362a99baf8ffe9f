//! Read aspects over a target's fluid tanks.
//!
//! All but [`FluidTankCount`] look at a single tank chosen by the
//! [`TANK_ID`] integer property. An out-of-range or negative index, or a
//! target with no fluid capability, reads as the output type's default.

use cogwire_core::PartTarget;
use cogwire_value::{AspectProperties, Value, ValueType, BLOCK, INTEGER};
use cogwire_world::{FluidHandler, FluidTank, World};

use crate::aspect::{Aspect, PropertyDecl, ReadAspect};

/// Property selecting the active tank.
pub const TANK_ID: &str = "tank_id";

static TANK_PROPERTIES: [PropertyDecl; 1] = [PropertyDecl {
    key: TANK_ID,
    ty: &INTEGER,
    default: Value::Integer(0),
}];

fn active_tank<'w>(
    world: &'w dyn World,
    target: &PartTarget,
    properties: &AspectProperties,
) -> Option<&'w FluidTank> {
    let handler = world.fluid_handler(&target.target())?;
    let index = properties.get_integer(TANK_ID).unwrap_or(0);
    usize::try_from(index).ok().and_then(|i| handler.tank(i))
}

/// The block placed by the active tank's fluid. Air when empty.
#[derive(Debug, Default)]
pub struct FluidBlock;

impl Aspect for FluidBlock {
    fn id(&self) -> &'static str {
        "fluid.block"
    }

    fn value_type(&self) -> &'static ValueType {
        &BLOCK
    }

    fn properties(&self) -> &[PropertyDecl] {
        &TANK_PROPERTIES
    }
}

impl ReadAspect for FluidBlock {
    fn read(&self, world: &dyn World, target: &PartTarget, properties: &AspectProperties) -> Value {
        active_tank(world, target, properties)
            .map(|tank| Value::Block(tank.contents().block()))
            .unwrap_or_else(|| BLOCK.default_value())
    }
}

/// Amount held by the active tank.
#[derive(Debug, Default)]
pub struct FluidAmount;

impl Aspect for FluidAmount {
    fn id(&self) -> &'static str {
        "fluid.amount"
    }

    fn value_type(&self) -> &'static ValueType {
        &INTEGER
    }

    fn properties(&self) -> &[PropertyDecl] {
        &TANK_PROPERTIES
    }
}

impl ReadAspect for FluidAmount {
    fn read(&self, world: &dyn World, target: &PartTarget, properties: &AspectProperties) -> Value {
        active_tank(world, target, properties)
            .map(|tank| Value::Integer(tank.contents().amount()))
            .unwrap_or_else(|| INTEGER.default_value())
    }
}

/// Capacity of the active tank.
#[derive(Debug, Default)]
pub struct FluidCapacity;

impl Aspect for FluidCapacity {
    fn id(&self) -> &'static str {
        "fluid.capacity"
    }

    fn value_type(&self) -> &'static ValueType {
        &INTEGER
    }

    fn properties(&self) -> &[PropertyDecl] {
        &TANK_PROPERTIES
    }
}

impl ReadAspect for FluidCapacity {
    fn read(&self, world: &dyn World, target: &PartTarget, properties: &AspectProperties) -> Value {
        active_tank(world, target, properties)
            .map(|tank| Value::Integer(tank.capacity()))
            .unwrap_or_else(|| INTEGER.default_value())
    }
}

/// Number of tanks the target exposes.
#[derive(Debug, Default)]
pub struct FluidTankCount;

impl Aspect for FluidTankCount {
    fn id(&self) -> &'static str {
        "fluid.tank_count"
    }

    fn value_type(&self) -> &'static ValueType {
        &INTEGER
    }
}

impl ReadAspect for FluidTankCount {
    fn read(&self, world: &dyn World, target: &PartTarget, _properties: &AspectProperties) -> Value {
        world
            .fluid_handler(&target.target())
            .map(|h| Value::Integer(i32::try_from(h.tank_count()).unwrap_or(i32::MAX)))
            .unwrap_or_else(|| INTEGER.default_value())
    }
}
