// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use dungeon_geom::{Aabb, UpAxis};

/// What the generator knows about the scene when a collision pass starts.
#[derive(Debug, Clone, Default)]
pub struct GeneratorContext {
    /// World up direction for this generation pass.
    pub up_axis: UpAxis,
    /// The dungeon attaches to another dungeon already in the scene.
    pub attach_to_other_dungeon: bool,
    /// When set, every tile must lie fully inside this region.
    pub placement_bounds: Option<Aabb>,
    /// User-supplied no-build bounds; always avoided.
    pub additional_bounds: Vec<Aabb>,
    /// Bounds of pre-existing scene geometry and other dungeons. Only avoided
    /// when avoiding other instances or attaching to another dungeon.
    pub other_dungeon_bounds: Vec<Aabb>,
}

impl GeneratorContext {
    /// Context with the given up-axis and nothing else.
    pub fn new(up_axis: UpAxis) -> Self {
        Self {
            up_axis,
            ..Self::default()
        }
    }

    /// Mark this pass as attaching to another dungeon.
    pub fn attach_to_other_dungeon(mut self, attach: bool) -> Self {
        self.attach_to_other_dungeon = attach;
        self
    }

    /// Restrict placement to `bounds`.
    pub fn with_placement_bounds(mut self, bounds: Aabb) -> Self {
        self.placement_bounds = Some(bounds);
        self
    }

    /// Add user no-build bounds.
    pub fn with_additional_bounds(mut self, bounds: impl IntoIterator<Item = Aabb>) -> Self {
        self.additional_bounds.extend(bounds);
        self
    }

    /// Add bounds belonging to other dungeons or existing scene geometry.
    pub fn with_other_dungeon_bounds(mut self, bounds: impl IntoIterator<Item = Aabb>) -> Self {
        self.other_dungeon_bounds.extend(bounds);
        self
    }
}
