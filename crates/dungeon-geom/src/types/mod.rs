// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by tile placement (vector, AABB, up-axis).
//!
//! Overlap semantics:
//! - `Aabb::overlaps` is inclusive on faces; touching boxes overlap. The
//!   broad-phase indexes use this so contact boundaries never produce false
//!   negatives.
//! - Narrow-phase tests (`overlaps_with_tolerance`, `overlaps_or_overhangs`)
//!   compare per-axis penetration depth against an explicit signed tolerance.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Signed up-axis direction and planar axis selection."]
pub mod up_axis;
#[doc = "Plain `f32` three-component vector."]
pub mod vec3;
