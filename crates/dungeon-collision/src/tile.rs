// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use dungeon_geom::Aabb;

/// Opaque identity for a placed tile.
///
/// The generator owns the tile's other data; collision checks only need the
/// id (for list membership) and the placement bounds.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TileId(pub u64);

/// A placed tile reduced to its identity and placement bounds.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Tile {
    /// Identity used for tile-list membership.
    pub id: TileId,
    /// World-space placement bounds.
    pub bounds: Aabb,
}

impl Tile {
    /// Creates a tile handle.
    pub const fn new(id: TileId, bounds: Aabb) -> Self {
        Self { id, bounds }
    }
}
