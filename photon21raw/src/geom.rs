//!
//! # Geometry Module
//!
//! Defines the core integer-grid geometric types including [Point], [Polygon], and [Shape],
//! and their containment and area operations.
//! All coordinates are in database units; see [crate::Units].
//!

// Crates.io
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

// Local imports
use crate::{bbox::BoundBoxTrait, Int};

/// # Point in two-dimensional layout-space
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: Int,
    pub y: Int,
}
impl Point {
    /// Create a new [Point] from (x,y) coordinates
    pub fn new(x: Int, y: Int) -> Self {
        Self { x, y }
    }
    /// Euclidean distance to `other`, in database units
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }
}

/// # Path
///
/// Open-ended geometric path with non-zero width and flush ends.
/// Used for pin markers; waveguide bodies are always emitted as [Polygon]s.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Path {
    pub points: Vec<Point>,
    pub width: usize,
}
impl Path {
    /// Create a new [Path]
    pub fn new(points: Vec<Point>, width: usize) -> Self {
        Self { points, width }
    }
}
/// # Polygon
///
/// Closed n-sided polygon with arbitrary number of vertices, and optional holes.
///
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
/// The same applies to each of `holes`.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<Point>>,
}
impl Polygon {
    /// Create a new hole-less [Polygon]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            holes: Vec::new(),
        }
    }
    /// Add a hole. Consumes and returns `self` for chainability.
    pub fn with_hole(mut self, hole: Vec<Point>) -> Self {
        self.holes.push(hole);
        self
    }
    /// Signed shoelace area of the outer boundary, in squared database units.
    /// Positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        shoelace(&self.points)
    }
}
/// Signed area of the closed ring `pts`
fn shoelace(pts: &[Point]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc: i128 = 0;
    for idx in 0..n {
        let (p, q) = (&pts[idx], &pts[(idx + 1) % n]);
        acc += (p.x as i128) * (q.y as i128) - (q.x as i128) * (p.y as i128);
    }
    acc as f64 / 2.0
}
/// Winding number of closed ring `pts` around `pt`.
/// Returns `None` if `pt` lies on the ring's boundary.
fn winding(pts: &[Point], pt: &Point) -> Option<isize> {
    let mut winding_num: isize = 0;
    for idx in 0..pts.len() {
        // Note these accesses go one past `pts.len`, closing the ring back at its first point.
        let (past, next) = (&pts[idx], &pts[(idx + 1) % pts.len()]);
        if past.y.min(next.y) <= pt.y && past.y.max(next.y) >= pt.y {
            if next.y == past.y {
                // Horizontal segment on our y-level. Either a boundary hit, or not counted.
                if past.x.min(next.x) <= pt.x && past.x.max(next.x) >= pt.x {
                    return None;
                }
            } else {
                // Compare against the segment's crossing of `y=pt.y`, in exact integer math
                let num = (next.x - past.x) as i128 * (pt.y - past.y) as i128;
                let den = (next.y - past.y) as i128;
                let lhs = (pt.x - past.x) as i128 * den;
                if lhs == num {
                    return None;
                }
                // Half-open in y, so shared vertices are only counted once
                let upward = next.y > past.y;
                let in_range = if upward {
                    past.y <= pt.y && pt.y < next.y
                } else {
                    next.y <= pt.y && pt.y < past.y
                };
                let crosses_right = if den > 0 { num > lhs } else { num < lhs };
                if in_range && crosses_right {
                    winding_num += if upward { 1 } else { -1 };
                }
            }
        }
    }
    Some(winding_num)
}

/// # Rectangle
///
/// Axis-aligned rectangle, specified by two opposite corners.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub p0: Point,
    pub p1: Point,
}
impl Rect {
    /// Create a new [Rect] from two opposite corners
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }
    /// Convert to a four-sided, counter-clockwise [Polygon]
    pub fn to_poly(&self) -> Polygon {
        let (xmin, xmax) = (self.p0.x.min(self.p1.x), self.p0.x.max(self.p1.x));
        let (ymin, ymax) = (self.p0.y.min(self.p1.y), self.p0.y.max(self.p1.y));
        Polygon::new(vec![
            Point::new(xmin, ymin),
            Point::new(xmax, ymin),
            Point::new(xmax, ymax),
            Point::new(xmin, ymax),
        ])
    }
}

/// # Shape
///
/// The primary geometric primitive comprising raw layout.
/// Variants include [Rect], [Polygon], and [Path].
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[enum_dispatch(ShapeTrait)]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
    Path(Path),
}
impl Default for Shape {
    fn default() -> Self {
        Self::Rect(Rect::default())
    }
}

/// # ShapeTrait
///
/// Common shape operations, dispatched from the [Shape] enum to its variants by [enum_dispatch].
///
#[enum_dispatch]
pub trait ShapeTrait {
    /// Boolean indication of whether the [Shape] contains [Point] `pt`.
    /// Containment is *inclusive* for all [Shape] types.
    /// [Point]s on their boundary are regarded throughout as "inside" the shape.
    fn contains(&self, pt: &Point) -> bool;
    /// Enclosed area, in squared database units
    fn area(&self) -> f64;
}

impl ShapeTrait for Rect {
    fn contains(&self, pt: &Point) -> bool {
        let (p0, p1) = (&self.p0, &self.p1);
        p0.x.min(p1.x) <= pt.x
            && p0.x.max(p1.x) >= pt.x
            && p0.y.min(p1.y) <= pt.y
            && p0.y.max(p1.y) >= pt.y
    }
    fn area(&self) -> f64 {
        ((self.p1.x - self.p0.x) as f64 * (self.p1.y - self.p0.y) as f64).abs()
    }
}
impl ShapeTrait for Polygon {
    fn contains(&self, pt: &Point) -> bool {
        // First check for the fast way out:
        // if the point is outside the bounding box, it can't be in the polygon.
        if !self.points.bbox().contains(pt) {
            return false;
        }
        // Non-zero winding on the outer boundary, and not strictly inside any hole
        match winding(&self.points, pt) {
            None => return true,
            Some(0) => return false,
            Some(_) => (),
        }
        for hole in self.holes.iter() {
            match winding(hole, pt) {
                None => return true,
                Some(0) => (),
                Some(_) => return false,
            }
        }
        true
    }
    fn area(&self) -> f64 {
        let outer = shoelace(&self.points).abs();
        let holes: f64 = self.holes.iter().map(|h| shoelace(h).abs()).sum();
        outer - holes
    }
}
impl ShapeTrait for Path {
    /// Distance-to-segment check against each segment, with flush ends
    fn contains(&self, pt: &Point) -> bool {
        let half = self.width as f64 / 2.0;
        let (px, py) = (pt.x as f64, pt.y as f64);
        self.points.windows(2).any(|seg| {
            let (ax, ay) = (seg[0].x as f64, seg[0].y as f64);
            let (bx, by) = (seg[1].x as f64, seg[1].y as f64);
            let (dx, dy) = (bx - ax, by - ay);
            let len2 = dx * dx + dy * dy;
            if len2 == 0.0 {
                return false;
            }
            let t = ((px - ax) * dx + (py - ay) * dy) / len2;
            if !(0.0..=1.0).contains(&t) {
                return false;
            }
            let (cx, cy) = (ax + t * dx, ay + t * dy);
            (px - cx).hypot(py - cy) <= half
        })
    }
    fn area(&self) -> f64 {
        let length: f64 = self.points.windows(2).map(|s| s[0].distance(&s[1])).sum();
        length * self.width as f64
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn polygon_area_with_hole() {
        let outer = Rect::new(Point::new(0, 0), Point::new(10, 10)).to_poly();
        assert_eq!(outer.area(), 100.0);
        assert!(outer.signed_area() > 0.0);
        let hole = vec![
            Point::new(2, 2),
            Point::new(2, 4),
            Point::new(4, 4),
            Point::new(4, 2),
        ];
        let donut = outer.with_hole(hole);
        assert_eq!(donut.area(), 96.0);
    }
    #[test]
    fn polygon_contains() {
        // Create a right triangle at the origin
        let triangle = Polygon::new(vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)]);
        assert!(triangle.contains(&Point::new(0, 0)));
        assert!(triangle.contains(&Point::new(1, 0)));
        assert!(triangle.contains(&Point::new(1, 1)));
        assert!(!triangle.contains(&Point::new(2, 2)));

        // A U-shaped polygon, inside a 10x10 square
        let u = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(2, 10),
            Point::new(2, 2),
            Point::new(8, 2),
            Point::new(8, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        for pt in &u.points {
            assert!(u.contains(pt));
        }
        assert!(u.contains(&Point::new(1, 1)));
        assert!(u.contains(&Point::new(9, 9)));
        assert!(!u.contains(&Point::new(3, 3)));
        assert!(!u.contains(&Point::new(7, 9)));
    }
    #[test]
    fn annulus_contains() {
        let outer = Rect::new(Point::new(-10, -10), Point::new(10, 10)).to_poly();
        let hole = Rect::new(Point::new(-5, -5), Point::new(5, 5)).to_poly().points;
        let annulus = outer.with_hole(hole);
        assert!(annulus.contains(&Point::new(7, 0)));
        assert!(annulus.contains(&Point::new(5, 0)));
        assert!(!annulus.contains(&Point::new(0, 0)));
        assert!(!annulus.contains(&Point::new(11, 0)));
    }
    #[test]
    fn diagonal_path_contains() {
        let path = Path::new(vec![Point::new(0, 0), Point::new(100, 100)], 10);
        assert!(path.contains(&Point::new(50, 50)));
        assert!(path.contains(&Point::new(53, 50)));
        assert!(!path.contains(&Point::new(60, 50)));
        assert!(!path.contains(&Point::new(-3, -3)));
    }
}
