//! Value instances and their object payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_type::{ValueKind, ValueType};

/// A block state, identified by its registry name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    name: String,
}

impl BlockState {
    /// Name of the empty block.
    pub const AIR: &'static str = "air";

    /// Construct a block state by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The empty block.
    pub fn air() -> Self {
        Self::new(Self::AIR)
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the empty block.
    pub fn is_air(&self) -> bool {
        self.name == Self::AIR
    }
}

/// An amount of a named fluid, in millibuckets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidStack {
    fluid: String,
    amount: i32,
}

impl FluidStack {
    const EMPTY_LITERAL: &'static str = "empty";

    /// Construct a stack. A non-positive amount yields the empty stack.
    pub fn new(fluid: impl Into<String>, amount: i32) -> Self {
        if amount <= 0 {
            return Self::empty();
        }
        Self {
            fluid: fluid.into(),
            amount,
        }
    }

    /// The empty stack.
    pub fn empty() -> Self {
        Self {
            fluid: String::new(),
            amount: 0,
        }
    }

    /// Fluid name (empty for the empty stack).
    pub fn fluid(&self) -> &str {
        &self.fluid
    }

    /// Amount in millibuckets.
    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Whether the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.amount <= 0
    }

    /// Block placed by this fluid (air for the empty stack).
    pub fn block(&self) -> BlockState {
        if self.is_empty() {
            BlockState::air()
        } else {
            BlockState::new(self.fluid.clone())
        }
    }

    pub(crate) fn to_compact(&self) -> String {
        if self.is_empty() {
            Self::EMPTY_LITERAL.to_string()
        } else {
            format!("{}:{}", self.fluid, self.amount)
        }
    }

    pub(crate) fn from_compact(input: &str) -> Option<Self> {
        if input == Self::EMPTY_LITERAL {
            return Some(Self::empty());
        }
        let (fluid, amount) = input.rsplit_once(':')?;
        let amount: i32 = amount.parse().ok()?;
        if fluid.is_empty() || amount <= 0 {
            return None;
        }
        Some(Self::new(fluid, amount))
    }
}

/// A typed unit of data.
///
/// The payload shape always matches [`Value::value_type`]. Equality
/// matches the compact string: doubles compare by bit pattern, so a NaN
/// equals itself and `0.0` differs from `-0.0`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// The wildcard value. Carries no payload.
    Any,
    /// A boolean.
    Boolean(bool),
    /// An integer.
    Integer(i32),
    /// A double.
    Double(f64),
    /// A string.
    String(String),
    /// A block state.
    Block(BlockState),
    /// A fluid stack.
    Fluid(FluidStack),
}

impl Value {
    /// Compact rendering of the wildcard value.
    pub const ANY_LITERAL: &'static str = "any";

    /// The payload kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Any => ValueKind::Any,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Double(_) => ValueKind::Double,
            Self::String(_) => ValueKind::String,
            Self::Block(_) => ValueKind::Block,
            Self::Fluid(_) => ValueKind::Fluid,
        }
    }

    /// The type of this value.
    pub fn value_type(&self) -> &'static ValueType {
        ValueType::of(self.kind())
    }

    /// Short textual form for display and logging.
    ///
    /// Parse it back with [`ValueType::from_compact_string`].
    pub fn to_compact_string(&self) -> String {
        match self {
            Self::Any => Self::ANY_LITERAL.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Double(d) => d.to_string(),
            Self::String(s) => s.clone(),
            Self::Block(b) => b.name().to_string(),
            Self::Fluid(f) => f.to_compact(),
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The double payload, if this is a double.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, Self::Any) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Block(a), Self::Block(b)) => a == b,
            (Self::Fluid(a), Self::Fluid(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_string())?;
        let unit = self.value_type().unit();
        if !unit.is_empty() && !matches!(self, Self::Fluid(s) if s.is_empty()) {
            f.write_str(unit)?;
        }
        Ok(())
    }
}
