//! R-tree based slice hit index using the rstar crate.
//!
//! Each drawable slice is stored with the bounding box of its sector. The
//! tree narrows a query to the few sectors whose boxes contain the point,
//! then an exact polar test picks the one actually under it.
//!
//! Provides O(log n) point-in-slice queries.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::layout::path::Point;
use crate::slice::{Slice, SliceIndex};

/// Angle of `(dx, dy)` in degrees, normalized to `[0, 360)`.
///
/// Uses the same orientation as the path builder.
pub fn polar_angle(dx: f64, dy: f64) -> f64 {
    let angle = dy.atan2(dx).to_degrees();
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    if angle >= 360.0 { 0.0 } else { angle }
}

/// A slice's sector geometry in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SectorEntry {
    /// Position of the slice in its `SliceIndex`.
    position: usize,
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl SectorEntry {
    fn new(position: usize, slice: &Slice, center: Point) -> Self {
        Self {
            position,
            center,
            inner_radius: slice.inner_radius,
            outer_radius: slice.outer_radius,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
        }
    }

    fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Squared distance from `p` to the segment of the ray at `angle`
    /// between the two radii.
    fn radial_edge_distance_2(&self, p: Point, angle: f64) -> f64 {
        let theta = angle.to_radians();
        let (dir_x, dir_y) = (theta.cos(), theta.sin());
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        let t = (dx * dir_x + dy * dir_y).clamp(self.inner_radius, self.outer_radius);
        let (ex, ey) = (dx - dir_x * t, dy - dir_y * t);
        ex * ex + ey * ey
    }
}

impl RTreeObject for SectorEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        // Corner points plus every axis crossing inside the span.
        let mut xs = Vec::with_capacity(8);
        let mut ys = Vec::with_capacity(8);
        let mut add = |angle: f64| {
            for r in [self.inner_radius, self.outer_radius] {
                let p = self.center.polar(r, angle);
                xs.push(p.x);
                ys.push(p.y);
            }
        };
        add(self.start_angle);
        add(self.end_angle);
        let mut axis = (self.start_angle / 90.0).ceil() * 90.0;
        while axis < self.end_angle {
            add(axis);
            axis += 90.0;
        }

        let min = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min);
        let max = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        AABB::from_corners([min(&xs), min(&ys)], [max(&xs), max(&ys)])
    }
}

impl PointDistance for SectorEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let p = Point::new(point[0], point[1]);
        if self.contains_point(point) {
            return 0.0;
        }

        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        let radius = (dx * dx + dy * dy).sqrt();
        let angle = polar_angle(dx, dy);

        let mut best = self
            .radial_edge_distance_2(p, self.start_angle)
            .min(self.radial_edge_distance_2(p, self.end_angle));
        if self.contains_angle(angle) {
            // Closest point lies on one of the two arcs.
            let gap = if radius < self.inner_radius {
                self.inner_radius - radius
            } else {
                radius - self.outer_radius
            };
            best = best.min(gap * gap);
        }
        best
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        let (dx, dy) = (point[0] - self.center.x, point[1] - self.center.y);
        let radius = (dx * dx + dy * dy).sqrt();
        radius >= self.inner_radius
            && radius < self.outer_radius
            && self.contains_angle(polar_angle(dx, dy))
    }
}

/// Spatial index over the slices of one layout pass.
///
/// Rebuild it whenever the slice index or the wheel center changes.
pub struct SliceHitIndex {
    tree: RTree<SectorEntry>,
}

impl SliceHitIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk load every drawable slice of `index` around `center`.
    pub fn build(index: &SliceIndex, center: Point) -> Self {
        let entries: Vec<_> = index
            .iter()
            .enumerate()
            .filter(|(_, slice)| slice.sweep() > 0.0)
            .map(|(position, slice)| SectorEntry::new(position, slice, center))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Position of the slice under `(x, y)`, if any.
    pub fn slice_at(&self, x: f64, y: f64) -> Option<usize> {
        self.tree.locate_at_point(&[x, y]).map(|entry| entry.position)
    }

    /// Get the number of slices in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SliceHitIndex {
    fn default() -> Self {
        Self::new()
    }
}
