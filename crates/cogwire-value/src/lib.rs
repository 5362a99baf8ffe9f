//! Typed value system for cogwire logic networks.
//!
//! Every computation flowing through a network produces or consumes a
//! [`Value`]. Each value has a [`ValueType`]; types know their default
//! value, their compact string form, and which other types they accept
//! through [`ValueType::corresponds_to`]. Exactly one type, [`ANY`], is
//! the wildcard: it accepts every type, and no other type accepts it.
//!
//! This crate has no internal dependencies.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod properties;
pub mod registry;
pub mod value;
pub mod value_type;

pub use error::{PropertyError, RegistryError, ValueError};
pub use properties::AspectProperties;
pub use registry::{value_types, ValueTypeRegistry};
pub use value::{BlockState, FluidStack, Value};
pub use value_type::{ValueKind, ValueType, ANY, BLOCK, BOOLEAN, DOUBLE, FLUID, INTEGER, OBJECT, STRING};
