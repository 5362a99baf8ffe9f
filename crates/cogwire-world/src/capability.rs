//! World capabilities reachable by aspects.
//!
//! A capability is something the world exposes at a locator that aspects
//! translate to and from values: fluid tanks to read, signal ports to
//! read and drive.

use cogwire_value::FluidStack;

/// Highest signal level a port holds.
pub const MAX_SIGNAL: i32 = 15;

/// One fluid tank: contents and capacity, both in millibuckets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FluidTank {
    contents: FluidStack,
    capacity: i32,
}

impl FluidTank {
    /// An empty tank.
    pub fn empty(capacity: i32) -> Self {
        Self {
            contents: FluidStack::empty(),
            capacity: capacity.max(0),
        }
    }

    /// A tank holding `contents`, truncated to the capacity.
    pub fn filled(contents: FluidStack, capacity: i32) -> Self {
        let capacity = capacity.max(0);
        let amount = contents.amount().min(capacity);
        Self {
            contents: FluidStack::new(contents.fluid(), amount),
            capacity,
        }
    }

    /// Current contents.
    pub fn contents(&self) -> &FluidStack {
        &self.contents
    }

    /// Capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }
}

/// Something that holds fluid in one or more indexed tanks.
pub trait FluidHandler: Send + Sync {
    /// Number of tanks.
    fn tank_count(&self) -> usize;

    /// The tank at `index`, or `None` if out of range.
    fn tank(&self, index: usize) -> Option<&FluidTank>;
}

/// A plain list of tanks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FluidTanks(pub Vec<FluidTank>);

impl FluidHandler for FluidTanks {
    fn tank_count(&self) -> usize {
        self.0.len()
    }

    fn tank(&self, index: usize) -> Option<&FluidTank> {
        self.0.get(index)
    }
}

/// A signal emitted or received at a locator.
pub trait Signal: Send + Sync {
    /// Current level in `0..=MAX_SIGNAL`.
    fn level(&self) -> i32;

    /// Drive the level. Out-of-range levels are clamped.
    fn set_level(&mut self, level: i32);
}

/// A single signal level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignalPort {
    level: i32,
}

impl SignalPort {
    /// A port at `level`, clamped.
    pub fn new(level: i32) -> Self {
        Self {
            level: level.clamp(0, MAX_SIGNAL),
        }
    }
}

impl Signal for SignalPort {
    fn level(&self) -> i32 {
        self.level
    }

    fn set_level(&mut self, level: i32) {
        self.level = level.clamp(0, MAX_SIGNAL);
    }
}
