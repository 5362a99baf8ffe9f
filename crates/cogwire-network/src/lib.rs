//! Logic networks: elements, ordering, and the tick loop.
//!
//! A [`Network`] holds [`PartNetworkElement`]s, each a handle on one part
//! living in a world container. Every tick it orders its reachable
//! elements, spends a per-tick energy budget on the ones that are due,
//! and isolates per-element failures so one broken part never stops the
//! rest.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cogwire_core::{DimensionId, Locator, PartTarget, PartTypeId, Position, Side};
//! use cogwire_network::{Network, NetworkConfig, PartNetworkElement};
//! use cogwire_part::{Part, PartKind};
//! use cogwire_world::{GridWorld, PartState};
//!
//! struct Lamp;
//!
//! impl Part for Lamp {
//!     fn name(&self) -> &str { "lamp" }
//!     fn kind(&self) -> PartKind { PartKind::Panel }
//! }
//!
//! let mut world = GridWorld::new();
//! let center = Locator::new(Position::new(DimensionId(0), 0, 64, 0), Side::Up);
//! let mut state = PartState::new();
//! state.set_update(true);
//! world.place_part(center, PartTypeId(0), state).unwrap();
//!
//! let mut network = Network::new(NetworkConfig::default()).unwrap();
//! let lamp = PartNetworkElement::new(Arc::new(Lamp), PartTypeId(0), PartTarget::from_center(center));
//! network.add_element(lamp, &mut world).unwrap();
//! network.initialize(&mut world);
//!
//! let report = network.tick(&mut world).unwrap();
//! assert_eq!(report.updated, 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arena;
pub mod config;
pub mod element;
pub mod error;
pub mod index;
pub mod metrics;
pub mod network;

pub use arena::ElementHandle;
pub use config::{ConfigError, NetworkConfig};
pub use element::{ElementKey, PartNetworkElement};
pub use error::NetworkError;
pub use index::PartNetwork;
pub use metrics::{NetworkMetrics, TickReport};
pub use network::{Lifecycle, Network};
