//! Tick loop behavior: energy, intervals, deferral, failure isolation.

use std::sync::Arc;

use cogwire_core::{Locator, PartTarget, PartTypeId};
use cogwire_network::{Network, NetworkConfig, PartNetworkElement};
use cogwire_part::{Part, PartKind};
use cogwire_test_utils::fixtures::{CountingPart, FailingPart, HookEvent, RecordingPart, UPDATES};
use cogwire_test_utils::{loc, stored_integer, TestWorldBuilder};
use cogwire_world::{GridWorld, World};
use tracing_subscriber::EnvFilter;

// Run with RUST_LOG=cogwire_network=debug to see the per-tick trace.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn element(part: Arc<dyn Part>, center: Locator) -> PartNetworkElement {
    PartNetworkElement::new(part, PartTypeId(0), PartTarget::from_center(center))
}

fn network_with(
    config: NetworkConfig,
    world: &mut GridWorld,
    part: Arc<dyn Part>,
    centers: &[Locator],
) -> Network {
    let mut net = Network::new(config).unwrap();
    for &c in centers {
        net.add_element(element(Arc::clone(&part), c), world).unwrap();
    }
    net.initialize(world);
    net
}

fn counts(world: &GridWorld, centers: &[Locator]) -> Vec<i32> {
    centers
        .iter()
        .map(|c| stored_integer(world, c, UPDATES))
        .collect()
}

#[test]
fn energy_budget_defers_and_prioritizes_deferred() {
    init_tracing();
    let (a, b, c) = (loc(0, 0), loc(1, 0), loc(2, 0));
    let centers = [a, b, c];
    let mut world = TestWorldBuilder::new()
        .updating(a, PartTypeId(0), 0)
        .updating(b, PartTypeId(0), 0)
        .updating(c, PartTypeId(0), 0)
        .build();
    let part: Arc<dyn Part> = Arc::new(CountingPart::new("consumer", PartKind::Panel).with_rate(5));
    let mut net = network_with(NetworkConfig::with_energy(12), &mut world, part, &centers);
    let keys: Vec<_> = net.keys().copied().collect();

    // Tick 1: A and B fit the budget, C does not.
    let report = net.tick(&mut world).unwrap();
    assert_eq!((report.updated, report.deferred), (2, 1));
    assert_eq!(report.energy_consumed, 10);
    assert_eq!(counts(&world, &centers), vec![1, 1, 0]);
    assert!(net.is_deferred(&keys[2]));

    // Tick 2: C runs first, then A; B is deferred.
    let report = net.tick(&mut world).unwrap();
    assert_eq!((report.updated, report.deferred), (2, 1));
    assert_eq!(counts(&world, &centers), vec![2, 1, 1]);
    assert!(net.is_deferred(&keys[1]));
    assert!(!net.is_deferred(&keys[2]));

    // Tick 3: B runs first, then A; C is deferred again.
    net.tick(&mut world).unwrap();
    assert_eq!(counts(&world, &centers), vec![3, 2, 1]);
    assert_eq!(net.metrics().energy_consumed, 30);
}

#[test]
fn unlimited_energy_updates_everyone() {
    let centers = [loc(0, 0), loc(1, 0)];
    let mut world = TestWorldBuilder::new()
        .updating(centers[0], PartTypeId(0), 0)
        .updating(centers[1], PartTypeId(0), 0)
        .build();
    let part: Arc<dyn Part> = Arc::new(CountingPart::new("c", PartKind::Reader).with_rate(1_000));
    let mut net = network_with(NetworkConfig::default(), &mut world, part, &centers);
    let report = net.tick(&mut world).unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(report.energy_consumed, 2_000);
}

#[test]
fn energy_totals_saturate() {
    let centers = [loc(0, 0), loc(1, 0)];
    let mut world = TestWorldBuilder::new()
        .updating(centers[0], PartTypeId(0), 0)
        .updating(centers[1], PartTypeId(0), 0)
        .build();
    let part: Arc<dyn Part> =
        Arc::new(CountingPart::new("hungry", PartKind::Reader).with_rate(u64::MAX));
    let mut net = network_with(NetworkConfig::default(), &mut world, part, &centers);
    assert_eq!(net.consumption_rate(&world), u64::MAX);

    let report = net.tick(&mut world).unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(report.energy_consumed, u64::MAX);
    net.tick(&mut world).unwrap();
    assert_eq!(net.metrics().energy_consumed, u64::MAX);
}

#[test]
fn update_interval_spaces_updates() {
    let center = loc(0, 0);
    let mut state = cogwire_test_utils::updating_state(0);
    state.set_update_interval(3);
    let mut world = TestWorldBuilder::new()
        .part(center, PartTypeId(0), state)
        .build();
    let part: Arc<dyn Part> = Arc::new(CountingPart::new("slow", PartKind::Panel));
    let mut net = network_with(NetworkConfig::default(), &mut world, part, &[center]);

    let mut seen = Vec::new();
    for _ in 0..7 {
        seen.push(net.tick(&mut world).unwrap().updated);
    }
    assert_eq!(seen, vec![1, 0, 0, 1, 0, 0, 1]);
}

#[test]
fn non_updating_parts_are_never_due() {
    let center = loc(0, 0);
    let mut world = TestWorldBuilder::new()
        .part(center, PartTypeId(0), cogwire_world::PartState::new())
        .build();
    let part: Arc<dyn Part> = Arc::new(CountingPart::new("inert", PartKind::Panel));
    let mut net = network_with(NetworkConfig::default(), &mut world, part, &[center]);
    let report = net.tick(&mut world).unwrap();
    assert_eq!(report.due, 0);
    assert_eq!(stored_integer(&world, &center, UPDATES), 0);
}

#[test]
fn failing_element_does_not_stop_the_tick() {
    init_tracing();
    let (bad, good) = (loc(0, 0), loc(1, 0));
    let mut world = TestWorldBuilder::new()
        .updating(bad, PartTypeId(0), 10)
        .updating(good, PartTypeId(1), 0)
        .build();
    let mut net = Network::new(NetworkConfig::default()).unwrap();
    net.add_element(
        PartNetworkElement::new(
            Arc::new(FailingPart::new("flaky", 0)),
            PartTypeId(0),
            PartTarget::from_center(bad),
        ),
        &mut world,
    )
    .unwrap();
    net.add_element(
        PartNetworkElement::new(
            Arc::new(CountingPart::new("steady", PartKind::Panel)),
            PartTypeId(1),
            PartTarget::from_center(good),
        ),
        &mut world,
    )
    .unwrap();

    let report = net.tick(&mut world).unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(stored_integer(&world, &good, UPDATES), 1);
    let err = world.part_state(&bad).unwrap().last_error().map(str::to_owned);
    assert!(err.unwrap().contains("failed after 0"));
}

#[test]
fn deferred_elements_get_post_update_false() {
    let center = loc(0, 0);
    let mut world = TestWorldBuilder::new()
        .updating(center, PartTypeId(0), 0)
        .build();
    let part = RecordingPart::new("hungry", PartKind::Writer).with_rate(10);
    let log = part.log();
    let mut net = network_with(NetworkConfig::with_energy(5), &mut world, Arc::new(part), &[center]);
    log.lock().clear();

    let report = net.tick(&mut world).unwrap();
    assert_eq!(report.deferred, 1);
    assert_eq!(
        *log.lock(),
        vec![HookEvent::PostUpdate {
            at: center,
            updated: false
        }]
    );
}

#[test]
fn starvation_is_reported_but_element_kept() {
    let center = loc(0, 0);
    let mut world = TestWorldBuilder::new()
        .updating(center, PartTypeId(0), 0)
        .build();
    let config = NetworkConfig {
        energy_per_tick: Some(5),
        max_deferred_ticks: Some(2),
    };
    let part: Arc<dyn Part> = Arc::new(CountingPart::new("hungry", PartKind::Panel).with_rate(10));
    let mut net = network_with(config, &mut world, part, &[center]);

    for _ in 0..3 {
        net.tick(&mut world).unwrap();
    }
    assert_eq!(net.metrics().starvation_events, 1);
    assert_eq!(net.metrics().deferrals, 3);
    assert_eq!(net.len(), 1);
}

#[test]
fn higher_priority_updates_first_and_reorders_next_tick() {
    let (low, high) = (loc(0, 0), loc(1, 0));
    let mut world = TestWorldBuilder::new()
        .updating(low, PartTypeId(0), 1)
        .updating(high, PartTypeId(0), 5)
        .build();
    let part = RecordingPart::new("rec", PartKind::Reader);
    let log = part.log();
    let mut net = network_with(NetworkConfig::default(), &mut world, Arc::new(part), &[low, high]);
    let low_key = *net.keys().next().unwrap();

    let updated_order = |log: &cogwire_test_utils::fixtures::HookLog| -> Vec<Locator> {
        log.lock()
            .iter()
            .filter_map(|e| match e {
                HookEvent::Updated(at) => Some(*at),
                _ => None,
            })
            .collect()
    };

    log.lock().clear();
    net.tick(&mut world).unwrap();
    assert_eq!(updated_order(&log), vec![high, low]);

    net.set_priority(&low_key, &mut world, 10).unwrap();
    log.lock().clear();
    net.tick(&mut world).unwrap();
    assert_eq!(updated_order(&log), vec![low, high]);
}

#[test]
fn kinds_run_in_ordinal_order() {
    let (writer, reader) = (loc(0, 0), loc(1, 0));
    let mut world = TestWorldBuilder::new()
        .updating(writer, PartTypeId(0), 100)
        .updating(reader, PartTypeId(1), 0)
        .build();
    let w = RecordingPart::new("writer", PartKind::Writer);
    let log = w.log();
    let r = RecordingPart::new("reader", PartKind::Reader).sharing(&log);
    let mut net = Network::new(NetworkConfig::default()).unwrap();
    net.add_element(
        PartNetworkElement::new(Arc::new(w), PartTypeId(0), PartTarget::from_center(writer)),
        &mut world,
    )
    .unwrap();
    net.add_element(
        PartNetworkElement::new(Arc::new(r), PartTypeId(1), PartTarget::from_center(reader)),
        &mut world,
    )
    .unwrap();
    log.lock().clear();

    net.tick(&mut world).unwrap();
    assert_eq!(
        *log.lock(),
        vec![
            HookEvent::Updated(reader),
            HookEvent::PostUpdate { at: reader, updated: true },
            HookEvent::Updated(writer),
            HookEvent::PostUpdate { at: writer, updated: true },
        ]
    );
}
