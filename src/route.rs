use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// One drawable piece of a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

impl PathSegment {
    pub fn start_point(&self) -> Point {
        match self {
            PathSegment::Line { from, .. } | PathSegment::Cubic { from, .. } => *from,
        }
    }

    pub fn end_point(&self) -> Point {
        match self {
            PathSegment::Line { to, .. } | PathSegment::Cubic { to, .. } => *to,
        }
    }

    /// Evaluate the segment at `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        match self {
            PathSegment::Line { from, to } => from.lerp(to, t),
            PathSegment::Cubic { from, ctrl1, ctrl2, to } => {
                let u = 1.0 - t;
                let a = u * u * u;
                let b = 3.0 * u * u * t;
                let c = 3.0 * u * t * t;
                let d = t * t * t;
                Point::new(
                    a * from.x + b * ctrl1.x + c * ctrl2.x + d * to.x,
                    a * from.y + b * ctrl1.y + c * ctrl2.y + d * to.y,
                )
            }
        }
    }
}

/// The renderable result of one leg: simplified waypoints and the curve fitted through them.
/// An empty route means no path was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    waypoints: Vec<Point>,
    segments: Vec<PathSegment>,
}

impl Route {
    pub fn empty() -> Self {
        Route::default()
    }

    pub(crate) fn from_parts(waypoints: Vec<Point>, segments: Vec<PathSegment>) -> Self {
        Route { waypoints, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(PathSegment::start_point)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(PathSegment::end_point)
    }

    /// Polyline length over the waypoints
    pub fn length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    /// Curve as an SVG path string, e.g. `M 460,550 C ...`
    pub fn to_svg_path(&self) -> String {
        let Some(first) = self.start() else {
            return String::new();
        };

        let mut path = format!("M {},{}", first.x, first.y);
        for segment in &self.segments {
            match segment {
                PathSegment::Line { to, .. } => {
                    path.push_str(&format!(" L {},{}", to.x, to.y));
                }
                PathSegment::Cubic { ctrl1, ctrl2, to, .. } => {
                    path.push_str(&format!(
                        " C {},{} {},{} {},{}",
                        ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                    ));
                }
            }
        }
        path
    }

    /// Flatten the curve into points, `samples` per segment plus the final point
    pub fn flatten(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(1);
        let mut points = Vec::with_capacity(self.segments.len() * samples + 1);
        for segment in &self.segments {
            for i in 0..samples {
                points.push(segment.point_at(i as f64 / samples as f64));
            }
        }
        if let Some(end) = self.end() {
            points.push(end);
        }
        points
    }
}

/// Format a point list for display
pub fn format_points(points: &[Point]) -> String {
    if points.is_empty() {
        return "No path".to_string();
    }

    points
        .iter()
        .map(|p| format!("({},{})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" -> ")
}
