// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision and broad-phase settings, loadable from JSON.

use std::fmt;
use std::sync::Arc;

use dungeon_geom::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::CollisionError;

/// Default penetration allowed against the connected neighbor.
pub const DEFAULT_OVERLAP_THRESHOLD: f32 = 0.01;
/// Default quadtree node capacity before subdividing.
pub const DEFAULT_MAX_OBJECTS_PER_NODE: usize = 4;
/// Default quadtree subdivision depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 10;
/// Default spatial hash cell edge length.
pub const DEFAULT_CELL_SIZE: f32 = 40.0;

/// Optional override run after the narrow-phase.
///
/// Receives the candidate bounds and the result so far; its return value is
/// the final answer, so it can both veto and permit a placement.
pub type AdditionalPredicate = Arc<dyn Fn(&Aabb, bool) -> bool + Send + Sync>;

/// Quadtree broad-phase parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeSettings {
    /// Starting root bounds; the root grows on demand.
    pub initial_bounds: Aabb,
    /// A leaf holding more than this many objects subdivides.
    pub max_objects_per_node: usize,
    /// Leaves at this depth never subdivide.
    pub max_depth: usize,
}

impl QuadtreeSettings {
    /// Settings with the given root bounds and default limits.
    pub fn new(initial_bounds: Aabb) -> Self {
        Self {
            initial_bounds,
            ..Self::default()
        }
    }
}

impl Default for QuadtreeSettings {
    fn default() -> Self {
        Self {
            initial_bounds: Aabb::new(Vec3::new(-50.0, 0.0, -50.0), Vec3::new(50.0, 10.0, 50.0)),
            max_objects_per_node: DEFAULT_MAX_OBJECTS_PER_NODE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Spatial hash broad-phase parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialHashSettings {
    /// Edge length of a grid cell on both planar axes.
    pub cell_size: f32,
}

impl Default for SpatialHashSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Which broad-phase index, if any, backs collision queries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BroadPhaseSettings {
    /// Self-expanding quadtree over the planar axes.
    Quadtree(QuadtreeSettings),
    /// Uniform grid hashed on the planar axes.
    SpatialHash(SpatialHashSettings),
    /// No index; every tile and obstacle is tested.
    #[default]
    None,
}

impl BroadPhaseSettings {
    /// Stable variant name, as used in JSON and error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Quadtree(_) => "quadtree",
            Self::SpatialHash(_) => "spatial_hash",
            Self::None => "none",
        }
    }
}

/// Narrow-phase policy plus broad-phase selection.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Reject footprints that overlap unrelated tiles even when separated vertically.
    pub disallow_overhangs: bool,
    /// Maximum penetration allowed against the connected neighbor.
    pub overlap_threshold: f32,
    /// Clearance required from every other tile and obstacle.
    pub padding: f32,
    /// Also avoid bounds belonging to other dungeons in the scene.
    pub avoid_other_instances: bool,
    /// Broad-phase index selection.
    pub broad_phase: BroadPhaseSettings,
    /// Runtime-only override applied after the narrow-phase.
    #[serde(skip)]
    pub additional_predicate: Option<AdditionalPredicate>,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            disallow_overhangs: false,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            padding: 0.0,
            avoid_other_instances: false,
            broad_phase: BroadPhaseSettings::None,
            additional_predicate: None,
        }
    }
}

impl fmt::Debug for CollisionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionSettings")
            .field("disallow_overhangs", &self.disallow_overhangs)
            .field("overlap_threshold", &self.overlap_threshold)
            .field("padding", &self.padding)
            .field("avoid_other_instances", &self.avoid_other_instances)
            .field("broad_phase", &self.broad_phase)
            .field(
                "additional_predicate",
                &self.additional_predicate.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl CollisionSettings {
    /// Parse settings from JSON bytes; absent fields take their defaults.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CollisionError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse settings from a JSON string; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CollisionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the data-bearing fields as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, CollisionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Install the post narrow-phase override.
    pub fn with_additional_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Aabb, bool) -> bool + Send + Sync + 'static,
    {
        self.additional_predicate = Some(Arc::new(predicate));
        self
    }
}
