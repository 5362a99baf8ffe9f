//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`PartId`] allocation.
static PART_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique [`NetworkId`] allocation.
static NETWORK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one placed part instance.
///
/// Allocated when a part is placed into the world and persisted with the
/// part's state, so it survives save/load. The network's part index maps
/// these ids to the locator the part lives at; two parts in the same
/// network must never share an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(pub u64);

impl PartId {
    /// Allocate a fresh, process-unique part id.
    ///
    /// Ids restored from persisted state are constructed directly and do
    /// not advance the counter.
    pub fn next() -> Self {
        Self(PART_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PartId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a network instance.
///
/// Every network allocates a fresh id at construction; containers record
/// the id of the network they currently belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub u64);

impl NetworkId {
    /// Allocate a fresh, process-unique network id. Thread-safe.
    pub fn next() -> Self {
        Self(NETWORK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a registered part type.
///
/// Assigned sequentially by the part registry at startup. Used as the
/// part-identity tier of the element ordering, so it must be stable for
/// the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartTypeId(pub u32);

impl fmt::Display for PartTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PartTypeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time a network runs its update loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a dimension (an independent world layer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DimensionId(pub i32);

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for DimensionId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
