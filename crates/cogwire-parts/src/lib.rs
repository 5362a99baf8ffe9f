//! Reference parts for cogwire logic networks.
//!
//! Both parts delegate their work to an aspect from the process-wide
//! registry ([`cogwire_aspect::aspects`]) and keep that aspect's
//! properties in their own [`PartState`]:
//!
//! - [`ReaderPart`]: evaluates a read aspect each update and stores the
//!   result under the aspect id.
//! - [`WriterPart`]: takes a stored value and applies it through a write
//!   aspect.
//!
//! Properties are seeded with the aspect defaults when the part joins a
//! network, and may be edited through
//! [`PartState::aspect_properties_mut`] afterwards.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod reader;
pub mod writer;

pub use reader::ReaderPart;
pub use writer::{WriterPart, WRITE_VALUE};

use cogwire_value::AspectProperties;
use cogwire_world::PartState;

/// Store `defaults` under `aspect` unless properties are already there.
pub(crate) fn seed_properties(state: &mut PartState, aspect: &str, defaults: AspectProperties) {
    if state.aspect_properties(aspect).is_none() {
        state.set_aspect_properties(aspect, defaults);
    }
}
