// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the quadtree and spatial hash broad-phases.

use dungeon_collision::{
    build_broad_phase, Aabb, BroadPhase, BroadPhaseSettings, Quadtree, QuadtreeSettings,
    SpatialHashGrid, SpatialHashSettings, UpAxis, Vec3,
};
use proptest::prelude::*;

fn bx(min: [f32; 3], max: [f32; 3]) -> Aabb {
    Aabb::new(Vec3::from(min), Vec3::from(max))
}

fn arb_box() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-200.0f32..200.0),
        prop::array::uniform3(0.0f32..60.0),
    )
        .prop_map(|(min, size)| {
            let min = Vec3::from(min);
            Aabb::new(min, min.add(&Vec3::from(size)))
        })
}

fn arb_up() -> impl Strategy<Value = UpAxis> {
    prop::sample::select(UpAxis::ALL.to_vec())
}

fn arb_settings() -> impl Strategy<Value = BroadPhaseSettings> {
    prop_oneof![
        (1usize..6, 0usize..8, -40.0f32..40.0, 1.0f32..80.0).prop_map(
            |(capacity, depth, origin, extent)| {
                BroadPhaseSettings::Quadtree(QuadtreeSettings {
                    initial_bounds: bx(
                        [origin, 0.0, origin],
                        [origin + extent, extent, origin + extent],
                    ),
                    max_objects_per_node: capacity,
                    max_depth: depth,
                })
            }
        ),
        (2.0f32..80.0).prop_map(|cell_size| {
            BroadPhaseSettings::SpatialHash(SpatialHashSettings { cell_size })
        }),
    ]
}

/// Canonical multiset form so results can be compared regardless of order.
fn canonical(boxes: &[Aabb]) -> Vec<[u32; 6]> {
    let mut out: Vec<[u32; 6]> = boxes
        .iter()
        .map(|b| {
            let [a, c, e] = b.min().to_array();
            let [g, h, i] = b.max().to_array();
            [a, c, e, g, h, i].map(f32::to_bits)
        })
        .collect();
    out.sort_unstable();
    out
}

fn query(index: &dyn BroadPhase, q: &Aabb) -> Vec<Aabb> {
    let mut out = Vec::new();
    index.query(q, &mut out);
    out
}

proptest! {
    #[test]
    fn query_has_no_false_negatives(
        settings in arb_settings(),
        up in arb_up(),
        stored in prop::collection::vec(arb_box(), 0..40),
        q in arb_box(),
    ) {
        let mut index = build_broad_phase(&settings, up).unwrap().unwrap();
        for b in &stored {
            index.insert(*b);
        }
        let found = query(index.as_ref(), &q);
        let expected: Vec<Aabb> = stored.iter().copied().filter(|b| b.overlaps(&q)).collect();
        prop_assert_eq!(canonical(&found), canonical(&expected));
        prop_assert_eq!(index.len(), stored.len());
    }

    #[test]
    fn quadtree_root_contains_everything_inserted(
        up in arb_up(),
        stored in prop::collection::vec(arb_box(), 1..40),
    ) {
        let settings = QuadtreeSettings::new(bx([-5.0, 0.0, -5.0], [5.0, 1.0, 5.0]));
        let mut tree = Quadtree::new(&settings, up).unwrap();
        for (i, b) in stored.iter().enumerate() {
            tree.insert(*b);
            let root = tree.root_bounds();
            for earlier in &stored[..=i] {
                prop_assert!(root.planar_contains(earlier, up));
            }
        }
    }

    #[test]
    fn insert_then_remove_restores_query_results(
        settings in arb_settings(),
        up in arb_up(),
        stored in prop::collection::vec(arb_box(), 0..30),
        extra in arb_box(),
        q in arb_box(),
    ) {
        let mut index = build_broad_phase(&settings, up).unwrap().unwrap();
        for b in &stored {
            index.insert(*b);
        }
        let before = canonical(&query(index.as_ref(), &q));
        index.insert(extra);
        prop_assert!(index.remove(&extra));
        let after = canonical(&query(index.as_ref(), &q));
        prop_assert_eq!(before, after);
        prop_assert_eq!(index.len(), stored.len());
    }
}

#[test]
fn spatial_hash_finds_box_across_cell_boundary() {
    let settings = SpatialHashSettings { cell_size: 40.0 };
    let mut grid = SpatialHashGrid::new(&settings, UpAxis::PosY).unwrap();
    let placed = bx([0.0, 0.0, 0.0], [10.0, 0.0, 10.0]);
    grid.insert(placed);
    assert_eq!(
        query(&grid, &bx([5.0, 0.0, 5.0], [45.0, 0.0, 45.0])),
        vec![placed]
    );
}

#[test]
fn quadtree_grows_to_fit_far_insert() {
    let initial = bx([-50.0, 0.0, -50.0], [50.0, 10.0, 50.0]);
    let mut tree = Quadtree::new(&QuadtreeSettings::new(initial), UpAxis::PosY).unwrap();
    let nodes_before = tree.node_count();
    let far = bx([60.0, 0.0, 60.0], [70.0, 0.0, 70.0]);
    tree.insert(far);

    assert!(tree.node_count() > nodes_before, "root must double at least once");
    let root = tree.root_bounds();
    assert!(root.planar_contains(&initial, UpAxis::PosY));
    assert!(root.planar_contains(&far, UpAxis::PosY));
    assert_eq!(query(&tree, &far), vec![far]);
}

#[test]
fn quadtree_ignores_up_extent_for_partitioning() {
    let initial = bx([-50.0, 0.0, -50.0], [50.0, 10.0, 50.0]);
    let mut tree = Quadtree::new(&QuadtreeSettings::new(initial), UpAxis::PosY).unwrap();
    let high = bx([0.0, 1000.0, 0.0], [5.0, 1010.0, 5.0]);
    tree.insert(high);
    assert_eq!(tree.root_bounds(), initial);
    assert_eq!(query(&tree, &bx([1.0, 1005.0, 1.0], [2.0, 1006.0, 2.0])), vec![high]);
    assert!(query(&tree, &bx([1.0, 0.0, 1.0], [2.0, 5.0, 2.0])).is_empty());
}

#[test]
fn quadtree_remove_visits_every_intersecting_node() {
    let initial = bx([0.0, 0.0, 0.0], [100.0, 1.0, 100.0]);
    let settings = QuadtreeSettings {
        initial_bounds: initial,
        max_objects_per_node: 1,
        max_depth: 6,
    };
    let mut tree = Quadtree::new(&settings, UpAxis::PosY).unwrap();
    let boxes = [
        bx([1.0, 0.0, 1.0], [2.0, 1.0, 2.0]),
        bx([60.0, 0.0, 60.0], [61.0, 1.0, 61.0]),
        bx([40.0, 0.0, 40.0], [60.0, 1.0, 60.0]),
        bx([3.0, 0.0, 3.0], [4.0, 1.0, 4.0]),
    ];
    for b in boxes {
        tree.insert(b);
    }
    for b in &boxes {
        assert!(tree.remove(b));
    }
    assert!(tree.is_empty());
    assert!(query(&tree, &initial).is_empty());
    assert!(!tree.remove(&boxes[0]));
}

#[test]
fn clear_empties_both_indexes() {
    for settings in [
        BroadPhaseSettings::Quadtree(QuadtreeSettings::default()),
        BroadPhaseSettings::SpatialHash(SpatialHashSettings::default()),
    ] {
        let mut index = build_broad_phase(&settings, UpAxis::PosY).unwrap().unwrap();
        index.insert(bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]));
        index.clear();
        assert!(index.is_empty());
        assert!(query(index.as_ref(), &bx([-9.0, -9.0, -9.0], [9.0, 9.0, 9.0])).is_empty());
    }
}

#[test]
fn equal_boxes_are_removed_one_at_a_time() {
    let twin = bx([3.0, 0.0, 3.0], [6.0, 2.0, 6.0]);
    for settings in [
        BroadPhaseSettings::Quadtree(QuadtreeSettings {
            max_objects_per_node: 1,
            ..QuadtreeSettings::default()
        }),
        BroadPhaseSettings::SpatialHash(SpatialHashSettings { cell_size: 2.0 }),
    ] {
        let mut index = build_broad_phase(&settings, UpAxis::PosY).unwrap().unwrap();
        index.insert(twin);
        index.insert(twin);
        assert!(index.remove(&twin), "{settings:?}");
        assert_eq!(index.len(), 1, "{settings:?}");
        assert_eq!(query(index.as_ref(), &twin), vec![twin], "{settings:?}");
        assert!(index.remove(&twin), "{settings:?}");
        assert!(query(index.as_ref(), &twin).is_empty(), "{settings:?}");
        assert!(!index.remove(&twin), "{settings:?}");
    }
}
