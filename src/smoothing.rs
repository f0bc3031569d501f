//! Turns a dense grid path into a short list of turning points and fits a
//! cubic curve through them for drawing.

use crate::geometry::Point;
use crate::layout::StoreLayout;
use crate::route::{PathSegment, Route};

/// Greedy line-of-sight simplification.
///
/// From the current point, jump to the furthest later point reachable in a
/// straight line whose samples (`step` apart) are all valid nodes.
pub fn simplify(path: &[Point], layout: &StoreLayout, step: f64) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut simplified = vec![path[0]];
    let mut current = 0;

    while current < path.len() - 1 {
        let mut furthest = current + 1;

        // Look ahead for the furthest visible point
        for i in (current + 2)..path.len() {
            if layout.is_segment_clear(&path[current], &path[i], step) {
                furthest = i;
            }
        }

        simplified.push(path[furthest]);
        current = furthest;
    }

    simplified
}

/// Fit a Catmull-Rom style cubic through the points.
///
/// For each window `(p0, p1, p2)` one cubic ends at `p2` with control points
/// `p1 -/+ (p2 - p0) / 6`. Each cubic starts where the previous one ended,
/// the first one at `p0`.
pub fn fit_curve(points: &[Point]) -> Route {
    match points.len() {
        0 | 1 => Route::empty(),
        2 => Route::from_parts(
            points.to_vec(),
            vec![PathSegment::Line { from: points[0], to: points[1] }],
        ),
        _ => {
            let mut segments = Vec::with_capacity(points.len() - 2);
            let mut pen = points[0];

            for window in points.windows(3) {
                let (p0, p1, p2) = (window[0], window[1], window[2]);
                let dx = (p2.x - p0.x) / 6.0;
                let dy = (p2.y - p0.y) / 6.0;

                segments.push(PathSegment::Cubic {
                    from: pen,
                    ctrl1: p1.offset(-dx, -dy),
                    ctrl2: p1.offset(dx, dy),
                    to: p2,
                });
                pen = p2;
            }

            Route::from_parts(points.to_vec(), segments)
        }
    }
}

/// Simplify then fit
pub fn smooth(path: &[Point], layout: &StoreLayout) -> Route {
    let simplified = simplify(path, layout, layout.grid_size() / 2.0);
    fit_curve(&simplified)
}
