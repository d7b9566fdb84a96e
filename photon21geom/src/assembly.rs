//!
//! # Polygon Assembly
//!
//! Stitches offset curves into closed outlines, and concentric circles into annuli.
//! This is where real-valued geometry is quantized onto the [Grid].
//!

// Local imports
use crate::curves::circle;
use crate::offset::offset_polyline_varying;
use crate::raw::{LayoutError, LayoutResult, Polygon};
use crate::{ClosedCurve, Grid, Polyline, Vector, WidthProfile};

/// # Waveguide Outline
///
/// Closed outline of a waveguide of `width` along `centerline`,
/// its center shifted `offset` to the left.
/// The right boundary runs forward and the left boundary back, for counter-clockwise winding.
///
pub fn waveguide_outline(
    centerline: &Polyline,
    width: WidthProfile,
    offset: f64,
    square_ends: bool,
    grid: &Grid,
) -> LayoutResult<Polygon> {
    if centerline.len() < 2 {
        return Err(LayoutError::degenerate(format!(
            "Waveguide centerline requires at least two points, got {}",
            centerline.len()
        )));
    }
    let widths = width.sample(centerline);
    let right: Vec<f64> = widths.iter().map(|w| offset - w / 2.0).collect();
    let left: Vec<f64> = widths.iter().map(|w| offset + w / 2.0).collect();
    let mut pts = offset_polyline_varying(centerline, &right, square_ends)?;
    let mut back = offset_polyline_varying(centerline, &left, square_ends)?;
    back.reverse();
    pts.extend(back);
    Ok(grid.polygon(&pts))
}

/// # Path Polygon
///
/// The polygon of a constant-`width` path along `points`, with flush (unsquared) ends.
///
pub fn path_polygon(points: &Polyline, width: f64, grid: &Grid) -> LayoutResult<Polygon> {
    waveguide_outline(points, WidthProfile::Constant(width), 0.0, false, grid)
}

/// # Annulus
///
/// Ring of centerline `radius` and `width` about `center`:
/// an outer circle with the inner circle as a hole.
/// Both circles share the outer circle's point count. The hole winds clockwise.
///
pub fn annulus(center: Vector, radius: f64, width: f64, grid: &Grid) -> LayoutResult<Polygon> {
    let (r_out, r_in) = (radius + width / 2.0, radius - width / 2.0);
    if width <= 0.0 || r_in <= 0.0 {
        return Err(LayoutError::degenerate(format!(
            "Annulus of radius {} and width {} has no interior",
            radius, width
        )));
    }
    let n = grid.points_per_circle(r_out);
    let ring = |r: f64| -> LayoutResult<ClosedCurve> {
        let pts = (0..n)
            .map(|k| center + Vector::from_polar(r, 360.0 * (k as f64) / (n as f64)))
            .collect();
        ClosedCurve::new(pts)
    };
    let outer = ring(r_out)?;
    let inner = ring(r_in)?.reversed();
    Ok(Polygon::new(grid.ring(outer.points())).with_hole(grid.ring(inner.points())))
}

/// Full disc of `radius` about `center`
pub fn disc(center: Vector, radius: f64, grid: &Grid) -> Polygon {
    grid.polygon(&circle(center, radius, grid))
}

/// Axis-aligned box spanning corners `p0` and `p1`, counter-clockwise
pub fn rect(p0: Vector, p1: Vector, grid: &Grid) -> Polygon {
    let (xmin, xmax) = (p0.x.min(p1.x), p0.x.max(p1.x));
    let (ymin, ymax) = (p0.y.min(p1.y), p0.y.max(p1.y));
    grid.polygon(&[
        Vector::new(xmin, ymin),
        Vector::new(xmax, ymin),
        Vector::new(xmax, ymax),
        Vector::new(xmin, ymax),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{Point, ShapeTrait};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn straight_rectangle() -> LayoutResult<()> {
        let grid = Grid::default();
        let line = Polyline::from_xy(&[(0., 0.), (10., 0.)])?;
        let poly = waveguide_outline(&line, 0.5.into(), 0.0, true, &grid)?;
        assert_eq!(
            poly.points,
            vec![
                Point::new(0, -250),
                Point::new(10_000, -250),
                Point::new(10_000, 250),
                Point::new(0, 250),
            ]
        );
        assert!(poly.signed_area() > 0.0);
        // Offset moves the whole outline left
        let shifted = waveguide_outline(&line, 0.5.into(), 1.0, true, &grid)?;
        assert_eq!(shifted.points[0], Point::new(0, 750));
        Ok(())
    }
    #[test]
    fn taper_outline() -> LayoutResult<()> {
        let grid = Grid::default();
        let line = Polyline::from_xy(&[(0., 0.), (20., 0.)])?;
        let prof = WidthProfile::Linear { start: 1.0, end: 2.0 };
        let poly = waveguide_outline(&line, prof, 0.0, true, &grid)?;
        // Trapezoid area: mean width times length, in square database units
        assert_relative_eq!(poly.area(), 1.5 * 20.0 * 1e6);
        Ok(())
    }
    #[test]
    fn annulus_area() -> LayoutResult<()> {
        let grid = Grid::default();
        let (r, w) = (10.0, 1.0);
        let poly = annulus(Vector::default(), r, w, &grid)?;
        assert_eq!(poly.holes.len(), 1);
        assert_eq!(poly.points.len(), poly.holes[0].len());
        // Outer boundary counter-clockwise, hole clockwise
        assert!(poly.signed_area() > 0.0);
        assert!(Polygon::new(poly.holes[0].clone()).signed_area() < 0.0);
        let expected = PI * ((r + w / 2.0).powi(2) - (r - w / 2.0).powi(2)) * 1e6;
        assert_relative_eq!(poly.area(), expected, max_relative = 1e-3);
        assert!(annulus(Vector::default(), 0.4, 1.0, &grid).is_err());
        Ok(())
    }
    #[test]
    fn short_centerline_fails() {
        let line = Polyline::from_xy(&[(0., 0.)]).unwrap();
        assert!(path_polygon(&line, 1.0, &Grid::default()).is_err());
    }
}
