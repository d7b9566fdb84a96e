//!
//! # Polygon Merge
//!
//! Boolean union of overlapping, touching, or nested polygons, through [geo::BooleanOps].
//! Used for device-recognition outlines and heater traces.
//!

// Crates.io
use geo::orient::Direction;
use geo::{BooleanOps, Coord, LineString, MultiPolygon, Orient};

// Local imports
use crate::raw::{Int, Point, Polygon, ShapeTrait};

/// Merged polygons of at most this area, in square database units, are discarded as slivers
const SLIVER_AREA: f64 = 1.0;

/// Merge `polygons` into their boolean union.
///
/// Results are in database units, counter-clockwise with clockwise holes,
/// with slivers of at most one square database unit removed.
pub fn merge(polygons: &[Polygon]) -> Vec<Polygon> {
    let mut acc = MultiPolygon::<f64>::new(Vec::new());
    for poly in polygons.iter().filter(|p| p.points.len() >= 3) {
        let next = MultiPolygon::new(vec![to_geo(poly)]);
        acc = if acc.0.is_empty() {
            next
        } else {
            acc.union(&next)
        };
    }
    acc.orient(Direction::Default)
        .0
        .iter()
        .map(from_geo)
        .filter(|p| p.area() > SLIVER_AREA)
        .collect()
}

fn ring_to_geo(pts: &[Point]) -> LineString<f64> {
    LineString::new(
        pts.iter()
            .map(|p| Coord {
                x: p.x as f64,
                y: p.y as f64,
            })
            .collect(),
    )
}

fn to_geo(poly: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        ring_to_geo(&poly.points),
        poly.holes.iter().map(|h| ring_to_geo(h)).collect(),
    )
}

fn ring_from_geo(ring: &LineString<f64>) -> Vec<Point> {
    let mut pts: Vec<Point> = Vec::with_capacity(ring.0.len());
    for c in ring.coords() {
        let p = Point::new(c.x.round() as Int, c.y.round() as Int);
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    // geo rings repeat their first point at the end
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}

fn from_geo(poly: &geo::Polygon<f64>) -> Polygon {
    Polygon {
        points: ring_from_geo(poly.exterior()),
        holes: poly
            .interiors()
            .iter()
            .map(ring_from_geo)
            .filter(|h| h.len() >= 3)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::Rect;

    fn square(x0: Int, y0: Int, size: Int) -> Polygon {
        Rect::new(Point::new(x0, y0), Point::new(x0 + size, y0 + size)).to_poly()
    }

    #[test]
    fn overlapping_squares_merge() {
        let merged = merge(&[square(0, 0, 10), square(5, 5, 10)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].area(), 175.0);
        assert!(merged[0].signed_area() > 0.0);
    }
    #[test]
    fn disjoint_and_touching() {
        let merged = merge(&[square(0, 0, 10), square(100, 0, 10)]);
        assert_eq!(merged.len(), 2);
        let touching = merge(&[square(0, 0, 10), square(10, 0, 10)]);
        assert_eq!(touching.len(), 1);
        assert_eq!(touching[0].area(), 200.0);
    }
    #[test]
    fn enclosing_ring_keeps_hole() {
        let frame = square(0, 0, 30).with_hole(vec![
            Point::new(10, 10),
            Point::new(10, 20),
            Point::new(20, 20),
            Point::new(20, 10),
        ]);
        let merged = merge(&[frame.clone(), square(40, 0, 5)]);
        assert_eq!(merged.len(), 2);
        let ring = merged.iter().find(|p| !p.holes.is_empty()).unwrap();
        assert_eq!(ring.area(), 800.0);
        // Filling the hole removes it
        let filled = merge(&[frame, square(10, 10, 10)]);
        assert_eq!(filled.len(), 1);
        assert!(filled[0].holes.is_empty());
        assert_eq!(filled[0].area(), 900.0);
    }
    #[test]
    fn degenerate_inputs_are_skipped() {
        let line = Polygon::new(vec![Point::new(0, 0), Point::new(5, 0)]);
        assert!(merge(&[line]).is_empty());
        assert!(merge(&[]).is_empty());
    }
}
