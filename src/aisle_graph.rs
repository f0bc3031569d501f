//! Connectivity between named aisles.
//!
//! Adjacency is declared in the layout, never inferred from geometry. The
//! graph turns every declared, geometrically overlapping pair into a junction
//! point that the pathfinder may jump to, and snaps arbitrary points onto the
//! nearest aisle edge.

use crate::geometry::Point;
use crate::layout::StoreLayout;
use std::collections::HashSet;
use tracing::warn;

/// Aisle junctions derived once from a layout
#[derive(Debug, Clone)]
pub struct AisleGraph<'a> {
    layout: &'a StoreLayout,
    intersections: Vec<Point>,
}

impl<'a> AisleGraph<'a> {
    pub fn new(layout: &'a StoreLayout) -> Self {
        let intersections = compute_intersections(layout);
        AisleGraph { layout, intersections }
    }

    pub fn layout(&self) -> &'a StoreLayout {
        self.layout
    }

    /// Centres of the overlap regions of connected aisles
    pub fn intersections(&self) -> &[Point] {
        &self.intersections
    }

    /// Snap a point to the closest edge of an aligned aisle.
    /// Falls back to the point itself when no aisle lines up with it.
    pub fn nearest_aisle_point(&self, p: &Point) -> Point {
        match self.try_nearest_aisle_point(p) {
            Some(snapped) => snapped,
            None => {
                warn!(x = p.x, y = p.y, "no aisle aligned with point, using it unsnapped");
                *p
            }
        }
    }

    pub fn try_nearest_aisle_point(&self, p: &Point) -> Option<Point> {
        let mut nearest = None;
        let mut min_distance = f64::INFINITY;

        let mut consider = |candidate: Point, distance: f64| {
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(candidate);
            }
        };

        for aisle in self.layout.aisles() {
            let b = &aisle.bounds;

            // Horizontally aligned: snap to left or right edge
            if p.y >= b.y && p.y <= b.bottom() {
                consider(Point::new(b.x, p.y), (p.x - b.x).abs());
                consider(Point::new(b.right(), p.y), (p.x - b.right()).abs());
            }

            // Vertically aligned: snap to top or bottom edge
            if p.x >= b.x && p.x <= b.right() {
                consider(Point::new(p.x, b.y), (p.y - b.y).abs());
                consider(Point::new(p.x, b.bottom()), (p.y - b.bottom()).abs());
            }
        }

        nearest
    }
}

fn compute_intersections(layout: &StoreLayout) -> Vec<Point> {
    let mut points = Vec::new();
    let mut visited: HashSet<(&str, &str)> = HashSet::new();

    for aisle in layout.aisles() {
        for target in &aisle.connected_to {
            let pair = if aisle.id.as_str() < target.as_str() {
                (aisle.id.as_str(), target.as_str())
            } else {
                (target.as_str(), aisle.id.as_str())
            };
            if !visited.insert(pair) {
                continue;
            }

            let Some(other) = layout.aisle(target) else {
                continue;
            };
            if let Some(overlap) = aisle.bounds.intersection(&other.bounds) {
                points.push(overlap.center());
            }
        }
    }

    points
}
