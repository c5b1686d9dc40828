// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interface and its two implementations.
//!
//! Contract shared by every implementation:
//! - `query` never produces false negatives: every stored box that overlaps
//!   the query box (inclusive on faces, all three axes) is appended.
//! - Partitioning happens on the two planar axes selected by the up-axis; the
//!   up-axis extent of stored boxes is kept and tested but never partitioned.
//! - `remove` matches by value, not identity. Two stored boxes with equal
//!   bounds are interchangeable.

use std::fmt;

use dungeon_geom::{Aabb, UpAxis};

use crate::debug::DebugDraw;
use crate::error::CollisionError;
use crate::settings::BroadPhaseSettings;

#[doc = "Self-expanding quadtree stored in a node arena."]
pub mod quadtree;
#[doc = "Uniform spatial hash grid over the planar axes."]
pub mod spatial_hash;

/// Spatial index that narrows a placement query to a small candidate set.
pub trait BroadPhase: fmt::Debug + Send {
    /// Stable name of the settings variant this index accepts.
    fn kind(&self) -> &'static str;
    /// Reset the index and apply `settings`.
    ///
    /// Fails when `settings` names a different variant or carries invalid
    /// parameters; the index is left unchanged in that case.
    fn init(&mut self, settings: &BroadPhaseSettings, up: UpAxis) -> Result<(), CollisionError>;
    /// Store `aabb`.
    fn insert(&mut self, aabb: Aabb);
    /// Remove one stored box equal to `aabb`. Returns whether anything was removed.
    fn remove(&mut self, aabb: &Aabb) -> bool;
    /// Append every stored box overlapping `aabb` to `results`.
    fn query(&self, aabb: &Aabb, results: &mut Vec<Aabb>);
    /// Number of stored boxes.
    fn len(&self) -> usize;
    /// Returns `true` when nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Drop every stored box, keeping the current settings.
    fn clear(&mut self);
    /// Emit structure and stored boxes to `draw`.
    fn draw_debug(&self, draw: &mut dyn DebugDraw, duration: f32);
}

/// Construct and initialize the index selected by `settings`.
///
/// Returns `Ok(None)` for [`BroadPhaseSettings::None`].
pub fn build_broad_phase(
    settings: &BroadPhaseSettings,
    up: UpAxis,
) -> Result<Option<Box<dyn BroadPhase>>, CollisionError> {
    let mut index: Box<dyn BroadPhase> = match settings {
        BroadPhaseSettings::Quadtree(_) => Box::new(quadtree::Quadtree::default()),
        BroadPhaseSettings::SpatialHash(_) => Box::new(spatial_hash::SpatialHashGrid::default()),
        BroadPhaseSettings::None => return Ok(None),
    };
    index.init(settings, up)?;
    Ok(Some(index))
}
