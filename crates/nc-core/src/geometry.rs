//! Geometry primitives: committed node geometry, container extents, and the
//! polygon (`Drawable`) a node occupies for hit-testing and overlap queries.
//!
//! Points are plain `kurbo::Point`s in canvas space. A `Drawable` is never
//! mutated; it is rebuilt from the node's visible geometry on demand.

use crate::error::{NodeError, ensure_finite};
use kurbo::{BezPath, Line, Rect, Shape};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use kurbo::Point;

// ─── Geometry ─────────────────────────────────────────────────────────────

/// Left/top/width/height of a node, in canvas units, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Fail fast on NaN or infinite components.
    pub fn ensure_finite(self) -> Result<Self, NodeError> {
        ensure_finite("left", self.left)?;
        ensure_finite("top", self.top)?;
        ensure_finite("width", self.width)?;
        ensure_finite("height", self.height)?;
        Ok(self)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }

    /// The same geometry as `[left, top, width, height]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.top, self.width, self.height]
    }
}

// ─── Viewport ─────────────────────────────────────────────────────────────

/// The container's current extent in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

// ─── Drawable ─────────────────────────────────────────────────────────────

/// A closed polygon of at least three points.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    points: SmallVec<[Point; 4]>,
}

impl Drawable {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Result<Self, NodeError> {
        let points: SmallVec<[Point; 4]> = points.into_iter().collect();
        if points.len() < 3 {
            return Err(NodeError::InvalidPolygon(points.len()));
        }
        for p in &points {
            ensure_finite("x", p.x)?;
            ensure_finite("y", p.y)?;
        }
        Ok(Self { points })
    }

    /// Four corners, clockwise from the top-left.
    pub fn rectangle(rect: Rect) -> Self {
        let points = SmallVec::from_buf([
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]);
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.points[0]);
        for p in &self.points[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }

    /// Non-zero winding containment. Points on an edge count as inside.
    pub fn contains(&self, point: Point) -> bool {
        self.edges()
            .any(|e| orientation(e.p0, e.p1, point) == 0.0 && on_segment(e.p0, e.p1, point))
            || self.path().contains(point)
    }

    pub fn bounding_box(&self) -> Rect {
        self.path().bounding_box()
    }

    /// Closed edges, including the one from the last point back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Line::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// True when the two regions share any point: an edge crossing, a touch,
    /// or one polygon lying wholly inside the other.
    pub fn intersects(&self, other: &Drawable) -> bool {
        let a = self.bounding_box();
        let b = other.bounding_box();
        if a.x1 < b.x0 || b.x1 < a.x0 || a.y1 < b.y0 || b.y1 < a.y0 {
            return false;
        }
        for e in self.edges() {
            if other.edges().any(|f| segments_touch(e, f)) {
                return true;
            }
        }
        self.contains(other.points[0]) || other.contains(self.points[0])
    }
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_touch(s: Line, t: Line) -> bool {
    let d1 = orientation(t.p0, t.p1, s.p0);
    let d2 = orientation(t.p0, t.p1, s.p1);
    let d3 = orientation(s.p0, s.p1, t.p0);
    let d4 = orientation(s.p0, s.p1, t.p1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(t.p0, t.p1, s.p0))
        || (d2 == 0.0 && on_segment(t.p0, t.p1, s.p1))
        || (d3 == 0.0 && on_segment(s.p0, s.p1, t.p0))
        || (d4 == 0.0 && on_segment(s.p0, s.p1, t.p1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> Drawable {
        Drawable::rectangle(Rect::new(x, y, x + side, y + side))
    }

    #[test]
    fn rectangle_has_four_clockwise_corners() {
        let d = square(0.0, 0.0, 10.0);
        assert_eq!(
            d.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn too_few_points_rejected() {
        let err = Drawable::new([Point::ZERO, Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, NodeError::InvalidPolygon(2)));
    }

    #[test]
    fn non_finite_point_rejected() {
        let err = Drawable::new([
            Point::ZERO,
            Point::new(f64::INFINITY, 0.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, NodeError::NonFinite { field: "x", .. }));
    }

    #[test]
    fn contains_interior_not_exterior() {
        let d = square(10.0, 10.0, 100.0);
        assert!(d.contains(Point::new(50.0, 50.0)));
        assert!(!d.contains(Point::new(5.0, 50.0)));
        assert!(!d.contains(Point::new(50.0, 150.0)));
    }

    #[test]
    fn contains_every_edge_and_corner() {
        let d = square(0.0, 0.0, 100.0);
        for p in [(100.0, 50.0), (50.0, 100.0), (0.0, 50.0), (50.0, 0.0), (100.0, 100.0)] {
            assert!(d.contains(Point::new(p.0, p.1)), "{p:?} not contained");
        }
        assert!(!d.contains(Point::new(100.5, 50.0)));
    }

    #[test]
    fn triangle_contains() {
        let d = Drawable::new([
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ])
        .unwrap();
        assert!(d.contains(Point::new(10.0, 10.0)));
        assert!(!d.contains(Point::new(90.0, 90.0)));
    }

    #[test]
    fn overlapping_squares_intersect() {
        assert!(square(0.0, 0.0, 100.0).intersects(&square(50.0, 50.0, 100.0)));
    }

    #[test]
    fn disjoint_squares_do_not_intersect() {
        assert!(!square(0.0, 0.0, 10.0).intersects(&square(20.0, 0.0, 10.0)));
    }

    #[test]
    fn nested_square_intersects_without_edge_crossing() {
        let outer = square(0.0, 0.0, 100.0);
        let inner = square(40.0, 40.0, 10.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn touching_edges_count_as_intersection() {
        assert!(square(0.0, 0.0, 10.0).intersects(&square(10.0, 0.0, 10.0)));
    }

    #[test]
    fn geometry_rect_and_extents() {
        let g = Geometry::new(10.0, 20.0, 170.0, 120.0);
        assert_eq!(g.right(), 180.0);
        assert_eq!(g.bottom(), 140.0);
        assert_eq!(g.to_rect(), Rect::new(10.0, 20.0, 180.0, 140.0));
    }
}
