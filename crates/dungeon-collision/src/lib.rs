// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Collision checks for tile-by-tile dungeon placement.

A generator asks [`CollisionManager::is_colliding_with_any_tile`] whether a
candidate tile's bounds may be placed. The manager narrows the question with a
pluggable broad-phase ([`Quadtree`] or [`SpatialHashGrid`], chosen by
[`BroadPhaseSettings`]) and then runs tolerance-aware AABB tests:

- The connected neighbor (the tile being attached to) is always tested first
  and may interpenetrate by up to `overlap_threshold`.
- Every other tile and static obstacle must clear the candidate by `padding`.
- With `disallow_overhangs`, footprint overlap alone is a collision.

Without a broad-phase, or when a query's up-axis differs from the one the
index was built for, the manager enumerates every tile and obstacle. The
broad-phase indexes never return false negatives, and for a `previous` tile
that was added through `add_tile` both paths give the same answer. An
unlisted `previous` whose bounds equal an indexed obstacle takes that
obstacle's place in the indexed candidate list, so only the neighbor
tolerance is applied to it.

Usage is single-threaded and sequential: `initialize`, then interleave
queries with `add_tile`/`remove_tile`.
"]

/// Broad-phase trait and its quadtree and spatial-hash implementations.
pub mod broad;
mod context;
/// Outbound port for diagnostic line drawing.
pub mod debug;
mod error;
mod manager;
mod settings;
mod tile;

pub use broad::quadtree::Quadtree;
pub use broad::spatial_hash::SpatialHashGrid;
pub use broad::{build_broad_phase, BroadPhase};
pub use context::GeneratorContext;
pub use debug::{DebugColor, DebugDraw, NoopDebugDraw};
pub use error::CollisionError;
pub use manager::CollisionManager;
pub use settings::{
    AdditionalPredicate, BroadPhaseSettings, CollisionSettings, QuadtreeSettings,
    SpatialHashSettings, DEFAULT_CELL_SIZE, DEFAULT_MAX_DEPTH, DEFAULT_MAX_OBJECTS_PER_NODE,
    DEFAULT_OVERLAP_THRESHOLD,
};
pub use tile::{Tile, TileId};

pub use dungeon_geom::{Aabb, UpAxis, Vec3};
