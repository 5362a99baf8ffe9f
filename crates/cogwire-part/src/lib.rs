//! Part trait, hook contexts, and part registry for cogwire networks.
//!
//! A [`Part`] is a stateless behavior bound to a locator. Its mutable
//! data lives in the [`PartState`](cogwire_world::PartState) owned by the
//! world, which the network lends to the part for the duration of each
//! callback through a [`HookContext`] or [`UpdateContext`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod kind;
pub mod part;
pub mod registry;

pub use context::{HookContext, PartIndex, UpdateContext};
pub use kind::PartKind;
pub use part::{ItemStack, Part};
pub use registry::{PartRegistry, PartRegistryBuilder};
