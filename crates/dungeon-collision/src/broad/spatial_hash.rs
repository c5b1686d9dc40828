// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use dungeon_geom::{Aabb, UpAxis, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use super::BroadPhase;
use crate::debug::{DebugColor, DebugDraw};
use crate::error::CollisionError;
use crate::settings::{BroadPhaseSettings, SpatialHashSettings, DEFAULT_CELL_SIZE};

type Slot = usize;

/// Inclusive cell coordinate range on the two planar axes.
#[derive(Debug, Clone, Copy)]
struct CellRange {
    a: (i32, i32),
    b: (i32, i32),
}

impl CellRange {
    fn keys(self) -> impl Iterator<Item = u64> {
        let (b0, b1) = self.b;
        (self.a.0..=self.a.1).flat_map(move |x| (b0..=b1).map(move |y| pack_key(x, y)))
    }
}

/// Packs two signed cell coordinates into one 64-bit key.
#[allow(clippy::cast_sign_loss)]
fn pack_key(x: i32, y: i32) -> u64 {
    (u64::from(x as u32) << 32) | u64::from(y as u32)
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn unpack_key(key: u64) -> (i32, i32) {
    ((key >> 32) as u32 as i32, key as u32 as i32)
}

/// Uniform grid hashed on the two planar axes.
///
/// Each stored box is kept once in a slab and referenced by slot from every
/// cell its planar projection touches, so a box spanning N cells appears in N
/// buckets. Queries deduplicate by slot and then apply an exact three-axis
/// overlap test. Cells that become empty are dropped.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    inv_cell_size: f32,
    up: UpAxis,
    cells: FxHashMap<u64, Vec<Slot>>,
    objects: Vec<Option<Aabb>>,
    free: Vec<Slot>,
    len: usize,
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE, UpAxis::default())
    }
}

impl SpatialHashGrid {
    /// Creates an empty grid.
    pub fn new(settings: &SpatialHashSettings, up: UpAxis) -> Result<Self, CollisionError> {
        let size = settings.cell_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(CollisionError::InvalidCellSize(size));
        }
        Ok(Self::with_cell_size(size, up))
    }

    fn with_cell_size(cell_size: f32, up: UpAxis) -> Self {
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            up,
            cells: FxHashMap::default(),
            objects: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Edge length of a cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Up-axis whose orthogonal plane is hashed.
    pub fn up_axis(&self) -> UpAxis {
        self.up
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_coord(&self, v: f32) -> i32 {
        (v * self.inv_cell_size).floor() as i32
    }

    fn cell_range(&self, aabb: &Aabb) -> CellRange {
        let (a, b) = self.up.planar_axes();
        let span = |axis: usize| {
            let lo = self.cell_coord(aabb.min().component(axis));
            let hi = self.cell_coord(aabb.max().component(axis));
            (lo.min(hi), lo.max(hi))
        };
        CellRange {
            a: span(a),
            b: span(b),
        }
    }

    fn find_slot(&self, aabb: &Aabb, range: CellRange) -> Option<Slot> {
        let first = pack_key(range.a.0, range.b.0);
        self.cells
            .get(&first)?
            .iter()
            .copied()
            .find(|&slot| self.objects[slot].as_ref() == Some(aabb))
    }

    fn allocate(&mut self, aabb: Aabb) -> Slot {
        if let Some(slot) = self.free.pop() {
            self.objects[slot] = Some(aabb);
            slot
        } else {
            self.objects.push(Some(aabb));
            self.objects.len() - 1
        }
    }
}

impl BroadPhase for SpatialHashGrid {
    fn kind(&self) -> &'static str {
        "spatial_hash"
    }

    fn init(&mut self, settings: &BroadPhaseSettings, up: UpAxis) -> Result<(), CollisionError> {
        let BroadPhaseSettings::SpatialHash(settings) = settings else {
            return Err(CollisionError::SettingsMismatch {
                expected: self.kind(),
                found: settings.kind(),
            });
        };
        *self = Self::new(settings, up)?;
        Ok(())
    }

    fn insert(&mut self, aabb: Aabb) {
        let range = self.cell_range(&aabb);
        let slot = self.allocate(aabb);
        for key in range.keys() {
            self.cells.entry(key).or_default().push(slot);
        }
        self.len += 1;
    }

    fn remove(&mut self, aabb: &Aabb) -> bool {
        let range = self.cell_range(aabb);
        let Some(slot) = self.find_slot(aabb, range) else {
            return false;
        };
        for key in range.keys() {
            if let Some(bucket) = self.cells.get_mut(&key) {
                bucket.retain(|&s| s != slot);
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
        self.objects[slot] = None;
        self.free.push(slot);
        self.len -= 1;
        true
    }

    fn query(&self, aabb: &Aabb, results: &mut Vec<Aabb>) {
        let [qx0, qy0, qz0] = aabb.min().to_array();
        let [qx1, qy1, qz1] = aabb.max().to_array();
        let mut seen = FxHashSet::default();
        for key in self.cell_range(aabb).keys() {
            let Some(bucket) = self.cells.get(&key) else {
                continue;
            };
            for &slot in bucket {
                if !seen.insert(slot) {
                    continue;
                }
                let Some(object) = self.objects[slot] else {
                    continue;
                };
                let [ox0, oy0, oz0] = object.min().to_array();
                let [ox1, oy1, oz1] = object.max().to_array();
                if ox0 <= qx1 && ox1 >= qx0 && oy0 <= qy1 && oy1 >= qy0 && oz0 <= qz1 && oz1 >= qz0
                {
                    results.push(object);
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.objects.clear();
        self.free.clear();
        self.len = 0;
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_debug(&self, draw: &mut dyn DebugDraw, duration: f32) {
        let (a, b) = self.up.planar_axes();
        for &key in self.cells.keys() {
            let (x, y) = unpack_key(key);
            let min = Vec3::ZERO
                .with_component(a, x as f32 * self.cell_size)
                .with_component(b, y as f32 * self.cell_size);
            let max = min
                .with_component(a, (x as f32 + 1.0) * self.cell_size)
                .with_component(b, (y as f32 + 1.0) * self.cell_size);
            draw.aabb(&Aabb::new(min, max), DebugColor::Cyan, duration);
        }
        for object in self.objects.iter().flatten() {
            draw.aabb(object, DebugColor::Yellow, duration);
        }
    }
}
