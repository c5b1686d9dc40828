// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use super::up_axis::UpAxis;
use super::vec3::Vec3;

/// Axis-aligned bounding box in world coordinates.
///
/// Boxes are not validated: `min <= max` is expected componentwise but
/// inverted inputs are stored unchanged, and zero-size boxes (for example an
/// infinitesimally thin tile) are fully supported.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx, hy, hz);
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Builds an AABB centered at `center` with full edge lengths `size`.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let he = size.scale(0.5);
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Builds the minimal AABB that contains all `points`, or `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Full edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    /// Half edge lengths.
    #[must_use]
    pub fn extents(&self) -> Vec3 {
        self.size().scale(0.5)
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        // Inclusive to treat touching faces as overlap for broad-phase queries.
        !(a_max[0] < b_min[0]
            || a_min[0] > b_max[0]
            || a_max[1] < b_min[1]
            || a_min[1] > b_max[1]
            || a_max[2] < b_min[2]
            || a_min[2] > b_max[2])
    }

    /// Returns `true` if `other` lies entirely inside this box (inclusive on faces).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        (0..3).all(|axis| self.contains_on_axis(other, axis))
    }

    /// Like [`Aabb::contains`] but only over the two axes orthogonal to `up`.
    #[must_use]
    pub fn planar_contains(&self, other: &Self, up: UpAxis) -> bool {
        let (a, b) = up.planar_axes();
        self.contains_on_axis(other, a) && self.contains_on_axis(other, b)
    }

    /// Like [`Aabb::overlaps`] but only over the two axes orthogonal to `up`.
    #[must_use]
    pub fn planar_overlaps(&self, other: &Self, up: UpAxis) -> bool {
        let (a, b) = up.planar_axes();
        self.overlaps_on_axis(other, a) && self.overlaps_on_axis(other, b)
    }

    /// Per-axis penetration depth: `min(a.max, b.max) - max(a.min, b.min)`.
    ///
    /// Positive values are interpenetration, zero is touching, negative values
    /// are the gap between the boxes on that axis.
    #[must_use]
    pub fn overlap_depths(&self, other: &Self) -> [f32; 3] {
        let hi = self.max.min(&other.max);
        let lo = self.min.max(&other.min);
        hi.sub(&lo).to_array()
    }

    /// Narrow-phase overlap with a signed tolerance.
    ///
    /// The boxes collide when the smallest per-axis penetration exceeds
    /// `max_overlap`. A positive tolerance permits that much interpenetration;
    /// a negative tolerance requires a clearance of at least `-max_overlap`.
    #[must_use]
    pub fn overlaps_with_tolerance(&self, other: &Self, max_overlap: f32) -> bool {
        let [x, y, z] = self.overlap_depths(other);
        x.min(y).min(z) > max_overlap
    }

    /// Narrow-phase overlap that also rejects overhangs.
    ///
    /// Only the two planar axes are compared, so a box whose footprint overlaps
    /// another's collides even when the two are separated along `up`. The sign
    /// of `up` is irrelevant.
    #[must_use]
    pub fn overlaps_or_overhangs(&self, other: &Self, up: UpAxis, max_overlap: f32) -> bool {
        let depths = self.overlap_depths(other);
        let (a, b) = up.planar_axes();
        depths[a].min(depths[b]) > max_overlap
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::splat(m);
        Self {
            min: self.min.sub(&delta),
            max: self.max.add(&delta),
        }
    }

    /// The twelve edges of the box as `(from, to)` segments, for debug drawing.
    #[must_use]
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let [x0, y0, z0] = self.min.to_array();
        let [x1, y1, z1] = self.max.to_array();
        let c = [
            Vec3::new(x0, y0, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x1, y0, z1),
            Vec3::new(x0, y0, z1),
            Vec3::new(x0, y1, z0),
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y1, z1),
            Vec3::new(x0, y1, z1),
        ];
        [
            (c[0], c[1]),
            (c[1], c[2]),
            (c[2], c[3]),
            (c[3], c[0]),
            (c[4], c[5]),
            (c[5], c[6]),
            (c[6], c[7]),
            (c[7], c[4]),
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }

    fn contains_on_axis(&self, other: &Self, axis: usize) -> bool {
        self.min.component(axis) <= other.min.component(axis)
            && other.max.component(axis) <= self.max.component(axis)
    }

    fn overlaps_on_axis(&self, other: &Self, axis: usize) -> bool {
        self.min.component(axis) <= other.max.component(axis)
            && other.min.component(axis) <= self.max.component(axis)
    }
}
