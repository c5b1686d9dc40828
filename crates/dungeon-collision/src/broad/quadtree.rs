// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use dungeon_geom::{Aabb, UpAxis};
use tracing::{trace, warn};

use super::BroadPhase;
use crate::debug::{DebugColor, DebugDraw};
use crate::error::CollisionError;
use crate::settings::{BroadPhaseSettings, QuadtreeSettings};

/// Doubling steps attempted before an object is parked in the root.
///
/// Only non-finite bounds can exhaust this; 128 doublings of a unit root
/// already exceed the `f32` range.
const MAX_EXPANSIONS: usize = 128;

type NodeIndex = usize;

#[derive(Debug, Clone)]
struct QuadNode {
    bounds: Aabb,
    objects: Vec<Aabb>,
    children: Option<[NodeIndex; 4]>,
}

impl QuadNode {
    const fn leaf(bounds: Aabb) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            children: None,
        }
    }
}

/// Dynamic quadtree over the two planar axes, storing full 3D boxes.
///
/// Nodes live in an arena and reference children by index. Each object is
/// stored in the shallowest node whose planar bounds fully contain it. When an
/// inserted object does not fit, the root grows by doubling toward the object;
/// the old root becomes one quadrant of the new root, so existing structure is
/// untouched. Nodes are never freed until [`BroadPhase::clear`].
#[derive(Debug, Clone)]
pub struct Quadtree {
    nodes: Vec<QuadNode>,
    root: NodeIndex,
    up: UpAxis,
    initial_bounds: Aabb,
    max_objects_per_node: usize,
    max_depth: usize,
    len: usize,
}

impl Default for Quadtree {
    fn default() -> Self {
        let defaults = QuadtreeSettings::default();
        Self::with_settings(&defaults, UpAxis::default())
    }
}

impl Quadtree {
    /// Creates an empty tree.
    pub fn new(settings: &QuadtreeSettings, up: UpAxis) -> Result<Self, CollisionError> {
        if settings.max_objects_per_node == 0 {
            return Err(CollisionError::InvalidNodeCapacity);
        }
        Ok(Self::with_settings(settings, up))
    }

    fn with_settings(settings: &QuadtreeSettings, up: UpAxis) -> Self {
        Self {
            nodes: vec![QuadNode::leaf(settings.initial_bounds)],
            root: 0,
            up,
            initial_bounds: settings.initial_bounds,
            max_objects_per_node: settings.max_objects_per_node,
            max_depth: settings.max_depth,
            len: 0,
        }
    }

    /// Current root bounds.
    pub fn root_bounds(&self) -> Aabb {
        self.nodes[self.root].bounds
    }

    /// Number of allocated nodes, including empty ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Up-axis whose orthogonal plane is partitioned.
    pub fn up_axis(&self) -> UpAxis {
        self.up
    }

    fn grow_to_fit(&mut self, aabb: &Aabb) {
        let mut steps = 0;
        while !self.nodes[self.root].bounds.planar_contains(aabb, self.up) {
            if steps == MAX_EXPANSIONS {
                warn!(?aabb, "quadtree root expansion limit reached; storing in root");
                return;
            }
            self.expand_root_towards(aabb);
            steps += 1;
        }
    }

    /// Doubles the root on both planar axes. Each axis grows toward the side
    /// `aabb` overflows; when it overflows both sides or neither, toward the
    /// side its center lies on.
    fn expand_root_towards(&mut self, aabb: &Aabb) {
        let (a, b) = self.up.planar_axes();
        let old = self.nodes[self.root].bounds;
        let old_center = old.center();
        let target = aabb.center();

        let mut min = old.min();
        let mut max = old.max();
        let mut split = [0.0f32; 2];
        let mut old_quadrant = 0usize;
        for (slot, axis) in [a, b].into_iter().enumerate() {
            let lo = old.min().component(axis);
            let hi = old.max().component(axis);
            let mut span = hi - lo;
            // A zero-size (or inverted) root cannot double; seed it.
            if span.is_nan() || span <= 0.0 {
                span = aabb.size().component(axis).max(1.0);
            }
            let below = aabb.min().component(axis) < lo;
            let above = aabb.max().component(axis) > hi;
            let grow_high = if below == above {
                target.component(axis) >= old_center.component(axis)
            } else {
                above
            };
            if grow_high {
                max = max.with_component(axis, lo + 2.0 * span);
                split[slot] = hi;
            } else {
                min = min.with_component(axis, hi - 2.0 * span);
                split[slot] = lo;
                old_quadrant |= 1 << slot;
            }
        }

        let bounds = Aabb::new(min, max);
        let quadrants = quadrants(&bounds, self.up, split[0], split[1]);
        let mut children = [self.root; 4];
        for (i, quadrant) in quadrants.into_iter().enumerate() {
            if i != old_quadrant {
                children[i] = self.push_node(QuadNode::leaf(quadrant));
            }
        }
        let new_root = self.push_node(QuadNode {
            bounds,
            objects: Vec::new(),
            children: Some(children),
        });
        trace!(?bounds, old_quadrant, "quadtree root expanded");
        self.root = new_root;
    }

    fn push_node(&mut self, node: QuadNode) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn subdivide(&mut self, idx: NodeIndex) {
        let bounds = self.nodes[idx].bounds;
        let center = bounds.center();
        let (a, b) = self.up.planar_axes();
        let quadrants = quadrants(&bounds, self.up, center.component(a), center.component(b));
        let mut children = [0; 4];
        for (slot, quadrant) in children.iter_mut().zip(quadrants) {
            *slot = self.push_node(QuadNode::leaf(quadrant));
        }
        self.nodes[idx].children = Some(children);

        let objects = std::mem::take(&mut self.nodes[idx].objects);
        let mut kept = Vec::new();
        for object in objects {
            match self.child_containing(&children, &object) {
                Some(child) => self.nodes[child].objects.push(object),
                None => kept.push(object),
            }
        }
        trace!(node = idx, kept = kept.len(), "quadtree node subdivided");
        self.nodes[idx].objects = kept;
    }

    fn child_containing(&self, children: &[NodeIndex; 4], aabb: &Aabb) -> Option<NodeIndex> {
        children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].bounds.planar_contains(aabb, self.up))
    }

    fn query_node(&self, idx: NodeIndex, aabb: &Aabb, results: &mut Vec<Aabb>) {
        let node = &self.nodes[idx];
        if !node.bounds.planar_overlaps(aabb, self.up) {
            return;
        }
        results.extend(node.objects.iter().filter(|o| o.overlaps(aabb)).copied());
        if let Some(children) = node.children {
            for child in children {
                self.query_node(child, aabb, results);
            }
        }
    }
}

/// Splits `bounds` on the planar axes at `split_a`/`split_b`.
///
/// Index bit 0 selects the high half of the first planar axis, bit 1 the high
/// half of the second. The up-axis extent is copied unchanged.
fn quadrants(bounds: &Aabb, up: UpAxis, split_a: f32, split_b: f32) -> [Aabb; 4] {
    let (a, b) = up.planar_axes();
    let mut out = [*bounds; 4];
    for (i, quadrant) in out.iter_mut().enumerate() {
        let mut min = bounds.min();
        let mut max = bounds.max();
        if i & 1 == 0 {
            max = max.with_component(a, split_a);
        } else {
            min = min.with_component(a, split_a);
        }
        if i & 2 == 0 {
            max = max.with_component(b, split_b);
        } else {
            min = min.with_component(b, split_b);
        }
        *quadrant = Aabb::new(min, max);
    }
    out
}

impl BroadPhase for Quadtree {
    fn kind(&self) -> &'static str {
        "quadtree"
    }

    fn init(&mut self, settings: &BroadPhaseSettings, up: UpAxis) -> Result<(), CollisionError> {
        let BroadPhaseSettings::Quadtree(settings) = settings else {
            return Err(CollisionError::SettingsMismatch {
                expected: self.kind(),
                found: settings.kind(),
            });
        };
        *self = Self::new(settings, up)?;
        Ok(())
    }

    fn insert(&mut self, aabb: Aabb) {
        self.grow_to_fit(&aabb);
        let mut idx = self.root;
        let mut depth = 0;
        loop {
            match self.nodes[idx].children {
                Some(children) => {
                    if let Some(child) = self.child_containing(&children, &aabb) {
                        idx = child;
                        depth += 1;
                        continue;
                    }
                    self.nodes[idx].objects.push(aabb);
                }
                None => {
                    self.nodes[idx].objects.push(aabb);
                    if self.nodes[idx].objects.len() > self.max_objects_per_node
                        && depth < self.max_depth
                    {
                        self.subdivide(idx);
                    }
                }
            }
            break;
        }
        self.len += 1;
    }

    fn remove(&mut self, aabb: &Aabb) -> bool {
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            let node = &mut self.nodes[idx];
            if let Some(pos) = node.objects.iter().position(|o| o == aabb) {
                node.objects.remove(pos);
                self.len -= 1;
                return true;
            }
            if let Some(children) = node.children {
                stack.extend(
                    children
                        .into_iter()
                        .filter(|&c| self.nodes[c].bounds.planar_overlaps(aabb, self.up)),
                );
            }
        }
        false
    }

    fn query(&self, aabb: &Aabb, results: &mut Vec<Aabb>) {
        self.query_node(self.root, aabb, results);
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(QuadNode::leaf(self.initial_bounds));
        self.root = 0;
        self.len = 0;
    }

    fn draw_debug(&self, draw: &mut dyn DebugDraw, duration: f32) {
        for node in &self.nodes {
            draw.aabb(&node.bounds, DebugColor::White, duration);
            for object in &node.objects {
                draw.aabb(object, DebugColor::Green, duration);
            }
        }
    }
}
