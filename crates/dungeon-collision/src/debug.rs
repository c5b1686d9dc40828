// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for diagnostic drawing of broad-phase structure without depending on
//! a specific renderer. Purely informational; nothing here affects results.

use dungeon_geom::{Aabb, Vec3};

/// Colors used by the built-in debug drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugColor {
    /// Quadtree node bounds.
    White,
    /// Bounds stored in a quadtree.
    Green,
    /// Occupied spatial hash cells.
    Cyan,
    /// Bounds stored in a spatial hash.
    Yellow,
    /// Active tiles when no broad-phase is configured.
    Blue,
    /// Static obstacles when no broad-phase is configured.
    Red,
}

/// Line-segment sink for debug drawing.
pub trait DebugDraw {
    /// Draw a segment that stays visible for `duration` seconds.
    fn line(&mut self, from: Vec3, to: Vec3, color: DebugColor, duration: f32);

    /// Draw the twelve edges of `bounds`.
    fn aabb(&mut self, bounds: &Aabb, color: DebugColor, duration: f32) {
        for (from, to) in bounds.edges() {
            self.line(from, to, color, duration);
        }
    }
}

/// Discards every draw call; for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDebugDraw;

impl DebugDraw for NoopDebugDraw {
    fn line(&mut self, _from: Vec3, _to: Vec3, _color: DebugColor, _duration: f32) {}
}
