//! Aspects: typed adapters between world state and values.
//!
//! A [`ReadAspect`] turns the state at a part's target into a [`Value`];
//! a [`WriteAspect`] applies a value back, after checking it against the
//! type it accepts. Both are parameterized by [`AspectProperties`] whose
//! keys and defaults each aspect declares.
//!
//! [`Value`]: cogwire_value::Value

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aspect;
pub mod error;
pub mod fluid;
pub mod registry;
pub mod signal;

pub use aspect::{default_properties, Aspect, PropertyDecl, ReadAspect, WriteAspect};
pub use cogwire_value::AspectProperties;
pub use error::AspectError;
pub use fluid::{FluidAmount, FluidBlock, FluidCapacity, FluidTankCount, TANK_ID};
pub use registry::{aspects, install_aspects, AspectRegistry, AspectRegistryBuilder};
pub use signal::{SignalBoolean, SignalInteger, SignalLevel};
