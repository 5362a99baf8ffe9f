//! Core types for cogwire logic networks.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the addressing model shared by every other crate (positions, sides,
//! locators, part targets), the strongly-typed identifiers, and the
//! error types for unreachable part state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod position;

pub use error::{PartError, PartStateError};
pub use id::{DimensionId, NetworkId, PartId, PartTypeId, TickId};
pub use position::{ChunkPos, Locator, PartTarget, Position, Side};
