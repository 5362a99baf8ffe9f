//! Addressing: positions, sides, locators, and part targets.
//!
//! Every spatial reference in a network flows through these types. All of
//! them are totally ordered so that element ordering can fall back to
//! location as a deterministic tie-breaker.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

use crate::id::DimensionId;

/// Width of a chunk column along x and z. Loading is chunk-granular.
pub const CHUNK_SIZE: i32 = 16;

/// A block position within a dimension.
///
/// Ordered by dimension, then `y`, then `z`, then `x` (layer-major), which
/// keeps the ordering stable across dimensions and independent of how the
/// position was constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// The dimension this position lives in.
    pub dimension: DimensionId,
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(dimension: DimensionId, x: i32, y: i32, z: i32) -> Self {
        Self { dimension, x, y, z }
    }

    /// The neighbouring position one step towards `side`.
    ///
    /// Coordinates wrap at the `i32` limits.
    pub fn offset(&self, side: Side) -> Self {
        let (dx, dy, dz) = side.direction();
        Self {
            dimension: self.dimension,
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    /// All six face-adjacent positions, in [`Side::ALL`] order.
    pub fn neighbours(&self) -> SmallVec<[Position; 6]> {
        Side::ALL.iter().map(|&side| self.offset(side)).collect()
    }

    /// The chunk column containing this position.
    pub fn chunk(&self) -> ChunkPos {
        ChunkPos {
            dimension: self.dimension,
            x: self.x.div_euclid(CHUNK_SIZE),
            z: self.z.div_euclid(CHUNK_SIZE),
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dimension
            .cmp(&other.dimension)
            .then(self.y.cmp(&other.y))
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({}, {}, {})", self.dimension, self.x, self.y, self.z)
    }
}

/// A chunk column: the unit at which the world loads and unloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    /// The dimension this chunk lives in.
    pub dimension: DimensionId,
    /// Chunk x index (`block x / 16`, rounded towards negative infinity).
    pub x: i32,
    /// Chunk z index (`block z / 16`, rounded towards negative infinity).
    pub z: i32,
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@[{}, {}]", self.dimension, self.x, self.z)
    }
}

/// One of the six faces of a block.
///
/// Declaration order is the total order used for tie-breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Negative y.
    Down,
    /// Positive y.
    Up,
    /// Negative z.
    North,
    /// Positive z.
    South,
    /// Negative x.
    West,
    /// Positive x.
    East,
}

impl Side {
    /// All sides in ordinal order.
    pub const ALL: [Side; 6] = [
        Side::Down,
        Side::Up,
        Side::North,
        Side::South,
        Side::West,
        Side::East,
    ];

    /// The face pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Unit offset `(dx, dy, dz)` of this face.
    pub fn direction(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }

    /// Lower-case name, as used in logs and compact strings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A connection point in the world: a position plus the face of interest.
///
/// Ordered by position, then side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Locator {
    /// Where.
    pub position: Position,
    /// Which face.
    pub side: Side,
}

impl Locator {
    /// Construct a locator.
    pub const fn new(position: Position, side: Side) -> Self {
        Self { position, side }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.position, self.side)
    }
}

/// Precise identification of a part instance.
///
/// `center` is where the part assembly lives (the container position and
/// the side the part is attached to); `target` is the locator the part
/// acts upon. Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartTarget {
    center: Locator,
    target: Locator,
}

impl PartTarget {
    /// Construct a target with an explicit acted-upon locator.
    pub const fn new(center: Locator, target: Locator) -> Self {
        Self { center, target }
    }

    /// Derive the target from a center locator: the part acts on the
    /// neighbouring block on its side, addressing the face that points
    /// back at the part.
    pub fn from_center(center: Locator) -> Self {
        let target = Locator::new(center.position.offset(center.side), center.side.opposite());
        Self { center, target }
    }

    /// Where the part lives.
    pub fn center(&self) -> Locator {
        self.center
    }

    /// What the part acts on.
    pub fn target(&self) -> Locator {
        self.target
    }
}

impl fmt::Display for PartTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.center, self.target)
    }
}
