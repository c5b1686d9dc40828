// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for tile placement.

This crate provides:
- A small `f32` vector (`Vec3`).
- Axis-aligned bounding boxes (`Aabb`) with containment, inclusive overlap,
  tolerance overlap, and overlap-or-overhang tests.
- The signed up-axis (`UpAxis`) that selects the two planar axes used for
  2D partitioning by the collision broad-phase.

Design notes:
- Boxes are accepted as-is: degenerate (zero-size) and inverted boxes are not
  rejected. Callers own well-formedness.
- Float32 throughout; comparisons are inclusive on faces unless a tolerance is
  supplied explicitly.
"]

/// Foundational geometric types.
pub mod types;

pub use types::aabb::Aabb;
pub use types::up_axis::UpAxis;
pub use types::vec3::Vec3;
