// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision manager: static obstacle cache, active tiles, broad-phase, and
//! the ordered narrow-phase used to accept or reject tile placements.

use dungeon_geom::{Aabb, UpAxis};
use tracing::{debug, trace};

use crate::broad::{build_broad_phase, BroadPhase};
use crate::context::GeneratorContext;
use crate::debug::{DebugColor, DebugDraw};
use crate::error::CollisionError;
use crate::settings::CollisionSettings;
use crate::tile::Tile;

/// Owns every piece of collision state for one generation pass.
///
/// Not thread-safe by contract: callers serialize `initialize`, queries, and
/// tile mutations.
#[derive(Debug)]
pub struct CollisionManager {
    settings: CollisionSettings,
    up_axis: UpAxis,
    placement_bounds: Option<Aabb>,
    tiles: Vec<Tile>,
    cached_bounds: Vec<Aabb>,
    broad_phase: Option<Box<dyn BroadPhase>>,
    candidates: Vec<Aabb>,
}

impl CollisionManager {
    /// Creates an empty manager. Call [`CollisionManager::initialize`] before use.
    pub fn new(settings: CollisionSettings) -> Self {
        Self {
            settings,
            up_axis: UpAxis::default(),
            placement_bounds: None,
            tiles: Vec::new(),
            cached_bounds: Vec::new(),
            broad_phase: None,
            candidates: Vec::new(),
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &CollisionSettings {
        &self.settings
    }

    /// Up-axis of the current pass.
    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    /// Tiles added since the last initialize, in insertion order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Static obstacle bounds gathered at initialize.
    pub fn cached_bounds(&self) -> &[Aabb] {
        &self.cached_bounds
    }

    /// The configured broad-phase, if any.
    pub fn broad_phase(&self) -> Option<&dyn BroadPhase> {
        self.broad_phase.as_deref()
    }

    /// Reset all state, cache static obstacles, and build the broad-phase.
    ///
    /// Bounds of other dungeons are only cached when `avoid_other_instances`
    /// is set or the pass attaches to another dungeon; user bounds always are.
    /// A broad-phase configuration error is returned here rather than at
    /// query time.
    pub fn initialize(&mut self, context: &GeneratorContext) -> Result<(), CollisionError> {
        self.clear();
        self.up_axis = context.up_axis;
        self.placement_bounds = context.placement_bounds;

        if self.settings.avoid_other_instances || context.attach_to_other_dungeon {
            self.cached_bounds
                .extend_from_slice(&context.other_dungeon_bounds);
        }
        self.cached_bounds
            .extend_from_slice(&context.additional_bounds);

        let mut broad_phase = build_broad_phase(&self.settings.broad_phase, context.up_axis)?;
        if let Some(index) = broad_phase.as_mut() {
            for bounds in &self.cached_bounds {
                index.insert(*bounds);
            }
        }
        self.broad_phase = broad_phase;

        debug!(
            broad_phase = self.settings.broad_phase.kind(),
            cached = self.cached_bounds.len(),
            up = ?self.up_axis,
            "collision manager initialized"
        );
        Ok(())
    }

    /// Drop tiles, cached bounds, and the broad-phase.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.cached_bounds.clear();
        self.candidates.clear();
        self.placement_bounds = None;
        self.broad_phase = None;
    }

    /// Record a placed tile.
    pub fn add_tile(&mut self, tile: Tile) {
        if let Some(index) = self.broad_phase.as_mut() {
            index.insert(tile.bounds);
        }
        self.tiles.push(tile);
        trace!(tile = tile.id.0, "tile added");
    }

    /// Forget a placed tile. Returns whether the tile was in the list.
    ///
    /// The tile list matches by id, but the broad-phase matches by bounds: if
    /// several stored boxes share `tile.bounds`, any one of them may be the
    /// one removed from the index.
    pub fn remove_tile(&mut self, tile: &Tile) -> bool {
        let listed = match self.tiles.iter().position(|t| t.id == tile.id) {
            Some(pos) => {
                self.tiles.remove(pos);
                true
            }
            None => false,
        };
        if let Some(index) = self.broad_phase.as_mut() {
            index.remove(&tile.bounds);
        }
        trace!(tile = tile.id.0, listed, "tile removed");
        listed
    }

    /// Returns `true` if `candidate` may not be placed.
    ///
    /// `previous` is the tile the candidate connects to; it is always tested
    /// first and may interpenetrate by up to `overlap_threshold`. Every other
    /// tile and obstacle must clear the candidate by `padding`, and with
    /// `disallow_overhangs` a footprint overlap alone collides. A candidate
    /// outside the placement bounds collides. The additional predicate, when
    /// set, receives the result and decides the final answer.
    pub fn is_colliding_with_any_tile(
        &mut self,
        up: UpAxis,
        candidate: &Aabb,
        previous: Option<&Tile>,
    ) -> bool {
        let outside = self
            .placement_bounds
            .is_some_and(|region| !region.contains(candidate));
        let colliding = outside || self.narrow_phase(up, candidate, previous);

        match &self.settings.additional_predicate {
            Some(predicate) => predicate(candidate, colliding),
            None => colliding,
        }
    }

    /// Emit broad-phase structure, or every tile and obstacle when there is
    /// no broad-phase.
    pub fn draw_debug(&self, draw: &mut dyn DebugDraw, duration: f32) {
        if let Some(index) = &self.broad_phase {
            index.draw_debug(draw, duration);
            return;
        }
        for tile in &self.tiles {
            draw.aabb(&tile.bounds, DebugColor::Blue, duration);
        }
        for bounds in &self.cached_bounds {
            draw.aabb(bounds, DebugColor::Red, duration);
        }
    }

    fn narrow_phase(&mut self, up: UpAxis, candidate: &Aabb, previous: Option<&Tile>) -> bool {
        let mut candidates = std::mem::take(&mut self.candidates);
        self.gather_candidates(up, candidate, previous, &mut candidates);

        let neighbor_tolerance = self.settings.overlap_threshold;
        let clearance_tolerance = -self.settings.padding;
        let disallow_overhangs = self.settings.disallow_overhangs;
        let colliding = candidates.iter().enumerate().any(|(i, other)| {
            let is_neighbor = i == 0 && previous.is_some();
            if is_neighbor {
                candidate.overlaps_with_tolerance(other, neighbor_tolerance)
            } else if disallow_overhangs {
                candidate.overlaps_or_overhangs(other, up, clearance_tolerance)
            } else {
                candidate.overlaps_with_tolerance(other, clearance_tolerance)
            }
        });

        self.candidates = candidates;
        colliding
    }

    /// Fills `out` with the ordered candidate list; the connected neighbor,
    /// when present, is always at index 0 and appears nowhere else.
    ///
    /// The broad-phase projects along the pass's up-axis, so it only serves
    /// queries made with that same axis. Any other axis scans every tile and
    /// obstacle.
    fn gather_candidates(
        &self,
        up: UpAxis,
        candidate: &Aabb,
        previous: Option<&Tile>,
        out: &mut Vec<Aabb>,
    ) {
        out.clear();
        let index = self
            .broad_phase
            .as_deref()
            .filter(|_| up.axis_index() == self.up_axis.axis_index());
        let Some(index) = index else {
            out.extend(previous.map(|p| p.bounds));
            out.extend(
                self.tiles
                    .iter()
                    .filter(|t| !previous.is_some_and(|p| p.id == t.id))
                    .map(|t| t.bounds),
            );
            out.extend_from_slice(&self.cached_bounds);
            return;
        };

        index.query(&self.query_bounds(candidate), out);
        if let Some(prev) = previous {
            if let Some(pos) = out.iter().position(|b| *b == prev.bounds) {
                out.remove(pos);
            }
            out.insert(0, prev.bounds);
        }
    }

    /// Broad-phase query region: the candidate grown by the required
    /// clearance and, when overhangs are disallowed, unbounded along the
    /// pass's up-axis, so the index returns everything the narrow-phase could
    /// reject on.
    fn query_bounds(&self, candidate: &Aabb) -> Aabb {
        let mut bounds = candidate.inflate(self.settings.padding.max(0.0));
        if self.settings.disallow_overhangs {
            let axis = self.up_axis.axis_index();
            bounds = Aabb::new(
                bounds.min().with_component(axis, f32::MIN),
                bounds.max().with_component(axis, f32::MAX),
            );
        }
        bounds
    }
}
