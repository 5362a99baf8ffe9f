//! Value type descriptors and the built-in type set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValueError;
use crate::value::{BlockState, FluidStack, Value};

/// Payload shape of a value type.
///
/// Closed set: every [`Value`] variant maps to exactly one kind, and the
/// abstract [`ValueKind::Object`] groups the world-object kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// The wildcard. Carries no payload.
    Any,
    /// `true` or `false`.
    Boolean,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit float.
    Double,
    /// UTF-8 text.
    String,
    /// Abstract supertype of world objects.
    Object,
    /// A block state.
    Block,
    /// A fluid stack.
    Fluid,
}

/// Pack an RGB triple into `0xRRGGBB`.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Describes one kind of value.
///
/// Types are identified by name; two descriptors with the same name are
/// the same type. Descriptors are `'static` and immutable.
#[derive(Debug)]
pub struct ValueType {
    name: &'static str,
    color: u32,
    unit: &'static str,
    kind: ValueKind,
    parent: Option<&'static ValueType>,
}

/// The wildcard type.
pub static ANY: ValueType = ValueType::new("any", rgb(240, 240, 240), "", ValueKind::Any, None);
/// Booleans.
pub static BOOLEAN: ValueType =
    ValueType::new("boolean", rgb(43, 47, 172), "", ValueKind::Boolean, None);
/// Integers.
pub static INTEGER: ValueType =
    ValueType::new("integer", rgb(243, 150, 4), "", ValueKind::Integer, None);
/// Doubles.
pub static DOUBLE: ValueType =
    ValueType::new("double", rgb(235, 234, 23), "", ValueKind::Double, None);
/// Strings.
pub static STRING: ValueType =
    ValueType::new("string", rgb(250, 10, 13), "", ValueKind::String, None);
/// Abstract world-object supertype.
pub static OBJECT: ValueType =
    ValueType::new("object", rgb(135, 135, 135), "", ValueKind::Object, None);
/// Block states.
pub static BLOCK: ValueType =
    ValueType::new("block", rgb(74, 135, 12), "", ValueKind::Block, Some(&OBJECT));
/// Fluid stacks.
pub static FLUID: ValueType =
    ValueType::new("fluid", rgb(40, 80, 200), "mB", ValueKind::Fluid, Some(&OBJECT));

impl ValueType {
    /// Construct a descriptor. Intended for `static` items.
    pub const fn new(
        name: &'static str,
        color: u32,
        unit: &'static str,
        kind: ValueKind,
        parent: Option<&'static ValueType>,
    ) -> Self {
        Self {
            name,
            color,
            unit,
            kind,
            parent,
        }
    }

    /// The built-in descriptor for a payload kind.
    pub fn of(kind: ValueKind) -> &'static ValueType {
        match kind {
            ValueKind::Any => &ANY,
            ValueKind::Boolean => &BOOLEAN,
            ValueKind::Integer => &INTEGER,
            ValueKind::Double => &DOUBLE,
            ValueKind::String => &STRING,
            ValueKind::Object => &OBJECT,
            ValueKind::Block => &BLOCK,
            ValueKind::Fluid => &FLUID,
        }
    }

    /// Unique name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Display color as `0xRRGGBB`.
    pub fn color(&self) -> u32 {
        self.color
    }

    /// Unit suffix appended when displaying values (may be empty).
    pub fn unit(&self) -> &'static str {
        self.unit
    }

    /// Payload shape.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Supertype, if any.
    pub fn parent(&self) -> Option<&'static ValueType> {
        self.parent
    }

    /// Whether this is the wildcard type.
    pub fn is_wildcard(&self) -> bool {
        self.kind == ValueKind::Any
    }

    /// Whether this type is abstract (has no values of its own).
    pub fn is_abstract(&self) -> bool {
        self.kind == ValueKind::Object
    }

    /// Whether a value of type `other` may be used where `self` is expected.
    ///
    /// Reflexive. The wildcard accepts every type; no other type accepts
    /// the wildcard. A type also accepts its descendants in the hierarchy.
    pub fn corresponds_to(&self, other: &ValueType) -> bool {
        if self.is_wildcard() || self == other {
            return true;
        }
        let mut ancestor = other.parent;
        while let Some(t) = ancestor {
            if t == self {
                return true;
            }
            ancestor = t.parent;
        }
        false
    }

    /// Canonical default value, used when a computation cannot produce a
    /// real one.
    ///
    /// The abstract object type defaults to the block default, which is a
    /// valid object.
    pub fn default_value(&self) -> Value {
        match self.kind {
            ValueKind::Any => Value::Any,
            ValueKind::Boolean => Value::Boolean(false),
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Double => Value::Double(0.0),
            ValueKind::String => Value::String(String::new()),
            ValueKind::Object | ValueKind::Block => Value::Block(BlockState::air()),
            ValueKind::Fluid => Value::Fluid(FluidStack::empty()),
        }
    }

    /// Parse a compact string produced by [`Value::to_compact_string`].
    pub fn from_compact_string(&self, input: &str) -> Result<Value, ValueError> {
        let parse_err = || ValueError::Parse {
            type_name: self.name,
            input: input.to_string(),
        };
        match self.kind {
            ValueKind::Any => {
                if input == Value::ANY_LITERAL {
                    Ok(Value::Any)
                } else {
                    Err(parse_err())
                }
            }
            ValueKind::Boolean => input.parse().map(Value::Boolean).map_err(|_| parse_err()),
            ValueKind::Integer => input.parse().map(Value::Integer).map_err(|_| parse_err()),
            ValueKind::Double => input.parse().map(Value::Double).map_err(|_| parse_err()),
            ValueKind::String => Ok(Value::String(input.to_string())),
            ValueKind::Object => Err(ValueError::Abstract {
                type_name: self.name,
            }),
            ValueKind::Block => {
                if input.is_empty() {
                    Err(parse_err())
                } else {
                    Ok(Value::Block(BlockState::new(input)))
                }
            }
            ValueKind::Fluid => FluidStack::from_compact(input)
                .map(Value::Fluid)
                .ok_or_else(parse_err),
        }
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
