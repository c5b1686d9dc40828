// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the narrow-phase AABB predicates.

use dungeon_geom::{Aabb, UpAxis, Vec3};
use proptest::prelude::*;

fn arb_box() -> impl Strategy<Value = Aabb> {
    let coord = -100.0f32..100.0;
    let size = 0.0f32..40.0;
    (
        prop::array::uniform3(coord),
        prop::array::uniform3(size),
    )
        .prop_map(|(min, size)| {
            let min = Vec3::from(min);
            Aabb::new(min, min.add(&Vec3::from(size)))
        })
}

fn arb_up() -> impl Strategy<Value = UpAxis> {
    prop::sample::select(UpAxis::ALL.to_vec())
}

proptest! {
    #[test]
    fn strict_overlap_implies_inclusive_overlap(a in arb_box(), b in arb_box()) {
        if a.overlaps_with_tolerance(&b, 0.0) {
            prop_assert!(a.overlaps(&b));
        }
    }

    #[test]
    fn overlap_predicates_are_symmetric(a in arb_box(), b in arb_box(), up in arb_up()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(
            a.overlaps_with_tolerance(&b, 0.25),
            b.overlaps_with_tolerance(&a, 0.25)
        );
        prop_assert_eq!(
            a.overlaps_or_overhangs(&b, up, 0.0),
            b.overlaps_or_overhangs(&a, up, 0.0)
        );
    }

    #[test]
    fn overhang_test_is_never_looser_than_plain_overlap(
        a in arb_box(),
        b in arb_box(),
        up in arb_up(),
        tol in -2.0f32..2.0,
    ) {
        if a.overlaps_with_tolerance(&b, tol) {
            prop_assert!(a.overlaps_or_overhangs(&b, up, tol));
        }
    }

    #[test]
    fn union_contains_both_inputs(a in arb_box(), b in arb_box()) {
        let u = a.union(&b);
        prop_assert!(u.contains(&a));
        prop_assert!(u.contains(&b));
    }
}

#[test]
fn padding_requires_clearance_between_unrelated_tiles() {
    let placed = Aabb::new(Vec3::ZERO, Vec3::new(10.0, 4.0, 10.0));
    let candidate = Aabb::new(Vec3::new(10.5, 0.0, 0.0), Vec3::new(20.0, 4.0, 10.0));
    // Half a unit of clearance satisfies zero padding but not a padding of one.
    assert!(!candidate.overlaps_with_tolerance(&placed, -0.0));
    assert!(candidate.overlaps_with_tolerance(&placed, -1.0));
}
