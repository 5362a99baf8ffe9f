//! Ordering properties of the element tie-break chain.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use cogwire_core::{Locator, PartTarget, PartTypeId, Side};
use cogwire_network::PartNetworkElement;
use cogwire_part::PartKind;
use cogwire_test_utils::fixtures::CountingPart;
use cogwire_test_utils::{loc, updating_state};
use cogwire_world::GridWorld;
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Layout {
    kind: PartKind,
    priority: i32,
    part_type: u32,
    center: Locator,
}

fn arb_layout() -> impl Strategy<Value = Layout> {
    (0usize..5, -3i32..4, 0u32..3, 0i32..6, 0i32..3, 0usize..6).prop_map(
        |(kind, priority, part_type, x, z, side)| {
            let mut center = loc(x, z);
            center.side = Side::ALL[side];
            Layout {
                kind: PartKind::ALL[kind],
                priority,
                part_type,
                center,
            }
        },
    )
}

/// At most one part per locator.
fn arb_layouts() -> impl Strategy<Value = Vec<Layout>> {
    prop::collection::vec(arb_layout(), 1..12).prop_map(|layouts| {
        layouts
            .into_iter()
            .map(|s| (s.center, s))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .collect()
    })
}

fn build(layouts: &[Layout], unloaded: bool) -> (GridWorld, Vec<PartNetworkElement>) {
    let mut world = GridWorld::new();
    let elements = layouts
        .iter()
        .map(|s| {
            world
                .place_part(s.center, PartTypeId(s.part_type), updating_state(s.priority))
                .unwrap();
            PartNetworkElement::new(
                Arc::new(CountingPart::new("p", s.kind)),
                PartTypeId(s.part_type),
                PartTarget::from_center(s.center),
            )
        })
        .collect();
    if unloaded {
        world.unload_chunk(loc(0, 0).position.chunk());
    }
    (world, elements)
}

#[test]
fn missing_part_ranks_as_priority_zero() {
    let mut world = GridWorld::new();
    let (low, empty) = (loc(0, 0), loc(1, 0));
    world.place_part(low, PartTypeId(0), updating_state(-5)).unwrap();
    let element = |center| {
        PartNetworkElement::new(
            Arc::new(CountingPart::new("p", PartKind::Reader)),
            PartTypeId(0),
            PartTarget::from_center(center),
        )
    };
    let (a, b) = (element(low), element(empty));
    assert!(!b.has_part_state(&world));
    assert_eq!(b.compare(&a, &world), Ordering::Less);
    assert_eq!(a.compare(&b, &world), Ordering::Greater);
}

fn assert_total_order(world: &GridWorld, elements: &[PartNetworkElement]) {
    for a in elements {
        assert_eq!(a.compare(a, world), Ordering::Equal);
        for b in elements {
            let ab = a.compare(b, world);
            assert_eq!(ab, b.compare(a, world).reverse());
            if ab == Ordering::Equal {
                assert_eq!(a.key(), b.key());
            }
            for c in elements {
                if ab != Ordering::Greater && b.compare(c, world) != Ordering::Greater {
                    assert_ne!(a.compare(c, world), Ordering::Greater);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn compare_is_total_when_all_loaded(layouts in arb_layouts()) {
        let (world, elements) = build(&layouts, false);
        assert_total_order(&world, &elements);
    }

    #[test]
    fn compare_is_total_when_all_unloaded(layouts in arb_layouts()) {
        let (world, elements) = build(&layouts, true);
        assert_total_order(&world, &elements);
    }

    #[test]
    fn compare_is_total_with_missing_parts(layouts in arb_layouts()) {
        let (mut world, elements) = build(&layouts, false);
        for e in elements.iter().step_by(2) {
            world.remove_part(&e.center()).unwrap();
        }
        assert_total_order(&world, &elements);
    }

    #[test]
    fn unloaded_order_ignores_priority(layouts in arb_layouts(), shift in 1i32..50) {
        let (world_a, elements) = build(&layouts, true);
        let shifted: Vec<Layout> = layouts
            .iter()
            .enumerate()
            .map(|(i, s)| Layout { priority: shift * i as i32 - s.priority, ..s.clone() })
            .collect();
        let (world_b, _) = build(&shifted, true);

        for a in &elements {
            for b in &elements {
                prop_assert_eq!(a.compare(b, &world_a), a.compare(b, &world_b));
            }
        }
    }

    #[test]
    fn loaded_priority_descends_within_kind_and_type(layouts in arb_layouts()) {
        let (world, mut elements) = build(&layouts, false);
        elements.sort_by(|a, b| a.compare(b, &world));
        for pair in elements.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.kind() == b.kind() {
                prop_assert!(a.priority(&world).unwrap() >= b.priority(&world).unwrap());
            }
        }
    }
}
