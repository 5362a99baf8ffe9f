//! The facade's free functions end to end.

use std::sync::Arc;

use cogwire::prelude::*;
use cogwire::network::ConfigError;
use cogwire::parts::{WriterPart, WRITE_VALUE};
use cogwire_test_utils::{loc, TestWorldBuilder};

fn target() -> PartTarget {
    PartTarget::from_center(loc(0, 0))
}

#[test]
fn invalid_config_rejected() {
    let config = NetworkConfig {
        energy_per_tick: Some(0),
        ..NetworkConfig::default()
    };
    assert!(matches!(
        cogwire::create_network(config),
        Err(ConfigError::ZeroEnergyBudget)
    ));
}

#[test]
fn writer_drives_signal_until_removed() {
    let mut world = TestWorldBuilder::new()
        .updating(loc(0, 0), PartTypeId(0), 0)
        .build();
    world.set_signal_port(target().target().position, SignalPort::new(0));
    world
        .part_state_mut(&loc(0, 0))
        .unwrap()
        .set_value(WRITE_VALUE, Value::Integer(5));

    let writer: Arc<dyn Part> = Arc::new(WriterPart::new("emitter", "signal.integer"));
    let element = PartNetworkElement::new(writer, PartTypeId(0), target());
    let key = element.key();
    let mut network = cogwire::create_network(NetworkConfig::default()).unwrap();
    cogwire::add_element(&mut network, element, &mut world).unwrap();
    network.initialize(&mut world);

    cogwire::tick(&mut network, &mut world).unwrap();
    let none = AspectProperties::new();
    assert_eq!(
        cogwire::read_aspect("signal.level", &world, &target(), &none),
        Ok(Value::Integer(5))
    );

    let removed = cogwire::remove_element(&mut network, &key, &mut world).unwrap();
    assert_eq!(removed.key(), key);
    assert!(network.is_empty());
    let report = cogwire::tick(&mut network, &mut world).unwrap();
    assert_eq!(report.updated, 0);
    assert!(matches!(
        cogwire::remove_element(&mut network, &key, &mut world),
        Err(NetworkError::UnknownElement { .. })
    ));
}

#[test]
fn wildcard_write_leaves_world_unchanged() {
    let mut world = GridWorld::new();
    world.set_signal_port(target().target().position, SignalPort::new(3));
    let none = AspectProperties::new();
    let err = cogwire::write_aspect("signal.integer", &mut world, &target(), &none, &Value::Any)
        .unwrap_err();
    assert!(matches!(err, AspectError::TypeMismatch { .. }));
    assert_eq!(
        cogwire::read_aspect("signal.level", &world, &target(), &none),
        Ok(Value::Integer(3))
    );
}

#[test]
fn killed_network_refuses_ticks() {
    let mut world = GridWorld::new();
    let mut network = cogwire::create_network(NetworkConfig::default()).unwrap();
    network.initialize(&mut world);
    network.kill(&mut world);
    assert_eq!(network.lifecycle(), Lifecycle::Killed);
    assert!(matches!(
        cogwire::tick(&mut network, &mut world),
        Err(NetworkError::Killed)
    ));
}
