//! Cogwire: deterministic logic networks over a partially loaded world.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all cogwire sub-crates, plus a handful of free functions covering the
//! common path: build a network, add elements, tick it, and evaluate
//! aspects through the process-wide registry.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cogwire::prelude::*;
//! use cogwire::parts::ReaderPart;
//!
//! let center = Locator::new(Position::new(DimensionId(0), 0, 64, 0), Side::Up);
//! let target = PartTarget::from_center(center);
//!
//! let mut world = GridWorld::new();
//! let mut state = PartState::new();
//! state.set_update(true);
//! world.place_part(center, PartTypeId(0), state).unwrap();
//! world.set_signal_port(target.target().position, SignalPort::new(7));
//!
//! let reader: Arc<dyn Part> = Arc::new(ReaderPart::new("reader", "signal.level"));
//! let mut network = cogwire::create_network(NetworkConfig::default()).unwrap();
//! cogwire::add_element(
//!     &mut network,
//!     PartNetworkElement::new(reader, PartTypeId(0), target),
//!     &mut world,
//! )
//! .unwrap();
//! network.initialize(&mut world);
//!
//! let report = cogwire::tick(&mut network, &mut world).unwrap();
//! assert_eq!(report.updated, 1);
//! let sampled = world.part_state(&center).unwrap().value("signal.level").cloned();
//! assert_eq!(sampled, Some(Value::Integer(7)));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cogwire-core` | Positions, sides, locators, ids, part errors |
//! | [`value`] | `cogwire-value` | Values, value types, aspect properties |
//! | [`world`] | `cogwire-world` | World trait, containers, part state, capabilities |
//! | [`part`] | `cogwire-part` | Part trait, kinds, contexts, part registry |
//! | [`network`] | `cogwire-network` | Elements, ordering, tick loop, metrics |
//! | [`aspect`] | `cogwire-aspect` | Read and write aspects, aspect registry |
//! | [`parts`] | `cogwire-parts` | Reference reader and writer parts |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Positions, sides, locators, ids, and part errors (`cogwire-core`).
pub use cogwire_core as types;

/// Values, value types, and aspect properties (`cogwire-value`).
///
/// [`value::ANY`] is the single wildcard type.
pub use cogwire_value as value;

/// The world boundary (`cogwire-world`).
///
/// [`world::GridWorld`] is the in-memory backend.
pub use cogwire_world as world;

/// Part trait, contexts, and part registry (`cogwire-part`).
pub use cogwire_part as part;

/// Network elements and the tick loop (`cogwire-network`).
pub use cogwire_network as network;

/// Aspect evaluation (`cogwire-aspect`).
pub use cogwire_aspect as aspect;

/// Reference parts (`cogwire-parts`).
pub use cogwire_parts as parts;

use cogwire_aspect::{aspects, AspectError};
use cogwire_core::PartTarget;
use cogwire_network::{
    ConfigError, ElementKey, Network, NetworkConfig, NetworkError, PartNetworkElement, TickReport,
};
use cogwire_value::{AspectProperties, Value};
use cogwire_world::World;

/// Build a network from a validated configuration.
pub fn create_network(config: NetworkConfig) -> Result<Network, ConfigError> {
    Network::new(config)
}

/// Add an element to `network`. See [`Network::add_element`].
pub fn add_element(
    network: &mut Network,
    element: PartNetworkElement,
    world: &mut dyn World,
) -> Result<(), NetworkError> {
    network.add_element(element, world)
}

/// Remove the element keyed `key` from `network`.
///
/// Succeeds even when the element's state is unreachable.
pub fn remove_element(
    network: &mut Network,
    key: &ElementKey,
    world: &mut dyn World,
) -> Result<PartNetworkElement, NetworkError> {
    network.remove_element(key, world)
}

/// Run one tick of `network`.
pub fn tick(network: &mut Network, world: &mut dyn World) -> Result<TickReport, NetworkError> {
    network.tick(world)
}

/// Evaluate the registered read aspect `id` at `target`.
pub fn read_aspect(
    id: &str,
    world: &dyn World,
    target: &PartTarget,
    properties: &AspectProperties,
) -> Result<Value, AspectError> {
    aspects().read(id, world, target, properties)
}

/// Apply `value` through the registered write aspect `id` at `target`.
///
/// A value whose type the aspect does not accept is rejected and the
/// world is left unchanged.
pub fn write_aspect(
    id: &str,
    world: &mut dyn World,
    target: &PartTarget,
    properties: &AspectProperties,
    value: &Value,
) -> Result<(), AspectError> {
    aspects().write(id, world, target, properties, value)
}

/// Common imports for typical cogwire usage.
///
/// ```rust
/// use cogwire::prelude::*;
/// ```
pub mod prelude {
    // Addressing and ids
    pub use cogwire_core::{
        DimensionId, Locator, NetworkId, PartId, PartTarget, PartTypeId, Position, Side, TickId,
    };

    // Errors
    pub use cogwire_core::{PartError, PartStateError};

    // Values
    pub use cogwire_value::{AspectProperties, Value, ValueType, ANY};

    // World
    pub use cogwire_world::{GridWorld, PartState, SignalPort, World};

    // Parts
    pub use cogwire_part::{HookContext, Part, PartKind, PartRegistry, UpdateContext};

    // Network
    pub use cogwire_network::{
        ElementKey, Lifecycle, Network, NetworkConfig, NetworkError, PartNetworkElement,
        TickReport,
    };

    // Aspects
    pub use cogwire_aspect::{aspects, AspectError, ReadAspect, WriteAspect};
}
