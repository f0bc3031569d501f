use crate::geometry::Point;
use crate::layout::StoreLayout;

impl StoreLayout {
    /// Check if a point lies on the walkable surface (inclusive bounds)
    pub fn is_walkable(&self, p: &Point) -> bool {
        self.walkable_regions().iter().any(|r| r.contains(p))
    }

    /// Check if a point lies on shelving. Sections win over corridors.
    pub fn is_inside_department_interior(&self, p: &Point) -> bool {
        self.departments().any(|dept| dept.contains(p))
    }

    /// A point the search is allowed to stand on
    pub fn is_valid_node(&self, p: &Point) -> bool {
        self.is_walkable(p) && !self.is_inside_department_interior(p)
    }

    /// Sample the segment `a -> b` at most `step` apart, endpoints included.
    /// Every sample must be a valid node.
    pub fn is_segment_clear(&self, a: &Point, b: &Point, step: f64) -> bool {
        let span = (b.x - a.x).abs().max((b.y - a.y).abs());
        if span == 0.0 || step <= 0.0 {
            return self.is_valid_node(a);
        }

        let samples = (span / step).ceil() as usize;
        (0..=samples).all(|i| {
            let t = i as f64 / samples as f64;
            self.is_valid_node(&a.lerp(b, t))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_points() {
        let layout = StoreLayout::reference();
        assert!(layout.is_walkable(&Point::new(150.0, 300.0)));
        assert!(layout.is_walkable(&Point::new(460.0, 630.0))); // entrance path edge
        assert!(!layout.is_walkable(&Point::new(300.0, 200.0)));
        assert!(!layout.is_walkable(&Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_department_interior_blocks_node() {
        let layout = StoreLayout::reference();
        let shelf = Point::new(550.0, 200.0);
        assert!(layout.is_inside_department_interior(&shelf));
        assert!(!layout.is_valid_node(&shelf));
        assert!(layout.is_valid_node(&Point::new(460.0, 300.0)));
    }

    #[test]
    fn test_segment_clearance() {
        let layout = StoreLayout::reference();
        // Straight down the center aisle
        assert!(layout.is_segment_clear(&Point::new(460.0, 60.0), &Point::new(460.0, 540.0), 7.5));
        // Cutting across the bakery block
        assert!(!layout.is_segment_clear(&Point::new(150.0, 80.0), &Point::new(460.0, 300.0), 7.5));
        // Degenerate segment
        assert!(layout.is_segment_clear(&Point::new(460.0, 300.0), &Point::new(460.0, 300.0), 7.5));
    }
}
