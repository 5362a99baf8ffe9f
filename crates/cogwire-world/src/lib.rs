//! World interface for cogwire logic networks.
//!
//! This crate defines the [`World`] trait, the boundary through which
//! networks and aspects reach spatial state, along with the data the
//! world owns on their behalf: [`PartContainer`]s holding one part per
//! side, the persisted [`PartState`] of each part, and the capabilities
//! aspects read and write.
//!
//! # Backends
//!
//! - [`GridWorld`]: in-memory world with chunk-granular load toggles

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod container;
pub mod error;
pub mod grid;
pub mod state;
pub mod world;

#[cfg(test)]
pub(crate) mod compliance;

pub use capability::{FluidHandler, FluidTank, FluidTanks, Signal, SignalPort, MAX_SIGNAL};
pub use container::{PartContainer, PlacedPart};
pub use error::WorldError;
pub use grid::GridWorld;
pub use state::PartState;
pub use world::World;
