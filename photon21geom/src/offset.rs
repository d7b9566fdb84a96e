//!
//! # Offset-Curve Generator
//!
//! Moves each point of a [Polyline] sideways by a signed distance.
//! Positive distances move to the left of the direction of travel.
//!
//! Interior points move along the bisector normal of their two adjacent segments,
//! scaled so that the distance to *each* segment's offset line equals the requested offset.
//! The result is a miter join, with one output point per input point.
//!

use crate::raw::{LayoutError, LayoutResult};
use crate::{Polyline, Vector};

/// Bisectors shorter than this indicate a reversal of direction
const UTURN_TOLERANCE: f64 = 1e-9;

/// Offset `line` by constant distance `d`.
///
/// When `square_ends` is set, each end point is snapped onto the horizontal or vertical line
/// through the original end point, whichever lies closer to the raw offset direction.
///
/// Inputs of fewer than two points are returned unchanged.
pub fn offset_polyline(line: &Polyline, d: f64, square_ends: bool) -> LayoutResult<Vec<Vector>> {
    offset_with(line, |_| d, square_ends)
}

/// Offset `line` by a per-point distance `offsets[i]`, e.g. for linearly tapered widths.
/// Fails with [LayoutError::ConfigurationMismatch] if the lengths differ.
pub fn offset_polyline_varying(
    line: &Polyline,
    offsets: &[f64],
    square_ends: bool,
) -> LayoutResult<Vec<Vector>> {
    if offsets.len() != line.len() {
        return Err(LayoutError::mismatch(format!(
            "{} offsets for a polyline of {} points",
            offsets.len(),
            line.len()
        )));
    }
    offset_with(line, |idx| offsets[idx], square_ends)
}

/// Unit offset direction at interior point `idx`, and the factor by which to scale it
/// so its perpendicular distance to both adjacent segments is one.
pub fn miter_direction(pts: &[Vector], idx: usize) -> LayoutResult<(Vector, f64)> {
    let t1 = (pts[idx] - pts[idx - 1]).normalize()?;
    let t2 = (pts[idx + 1] - pts[idx]).normalize()?;
    let bisector = t1 + t2;
    if bisector.norm() < UTURN_TOLERANCE {
        return Err(LayoutError::degenerate(format!(
            "Polyline reverses direction at ({}, {})",
            pts[idx].x, pts[idx].y
        )));
    }
    let normal = bisector.normalize()?.left_normal();
    // Cosine of half the turn angle. Strictly positive for anything short of a reversal.
    let cos_half = normal.dot(&t1.left_normal());
    Ok((normal, 1.0 / cos_half))
}

fn offset_with(
    line: &Polyline,
    dist: impl Fn(usize) -> f64,
    square_ends: bool,
) -> LayoutResult<Vec<Vector>> {
    let pts = line.points();
    let n = pts.len();
    if n < 2 {
        return Ok(pts.to_vec());
    }
    let mut rv = Vec::with_capacity(n);

    // First point: normal of the first segment
    let first = pts[0] + (pts[1] - pts[0]).normalize()?.left_normal() * dist(0);
    rv.push(match square_ends {
        true => square_end(&pts[0], first),
        false => first,
    });
    // Interior points: miter along the bisector normal
    for idx in 1..n - 1 {
        let (normal, scale) = miter_direction(pts, idx)?;
        rv.push(pts[idx] + normal * (dist(idx) * scale));
    }
    // Last point: normal of the last segment
    let last = pts[n - 1] + (pts[n - 1] - pts[n - 2]).normalize()?.left_normal() * dist(n - 1);
    rv.push(match square_ends {
        true => square_end(&pts[n - 1], last),
        false => last,
    });
    Ok(rv)
}

/// Snap `offset` onto the axis-aligned line through `origin` closest to its offset direction
fn square_end(origin: &Vector, offset: Vector) -> Vector {
    let delta = offset - *origin;
    if delta.x.abs() > delta.y.abs() {
        Vector::new(offset.x, origin.y)
    } else {
        Vector::new(origin.x, offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn straight_offset() -> LayoutResult<()> {
        let line = Polyline::from_xy(&[(0., 0.), (10., 0.)])?;
        let left = offset_polyline(&line, 0.25, false)?;
        assert_eq!(left, vec![Vector::new(0., 0.25), Vector::new(10., 0.25)]);
        let right = offset_polyline(&line, -0.25, false)?;
        assert_eq!(right, vec![Vector::new(0., -0.25), Vector::new(10., -0.25)]);
        Ok(())
    }
    #[test]
    fn right_angle_miter() -> LayoutResult<()> {
        // East then north: a left turn. The outer (right) side miters out to (11, -1).
        let line = Polyline::from_xy(&[(0., 0.), (10., 0.), (10., 10.)])?;
        let right = offset_polyline(&line, -1.0, false)?;
        assert_eq!(right.len(), 3);
        assert_abs_diff_eq!(right[1].x, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right[1].y, -1.0, epsilon = 1e-12);
        let left = offset_polyline(&line, 1.0, false)?;
        assert_abs_diff_eq!(left[1].x, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(left[1].y, 1.0, epsilon = 1e-12);
        Ok(())
    }
    #[test]
    fn square_ends_snap_to_axes() -> LayoutResult<()> {
        // A diagonal-ending line. Offset direction at the end is mostly -x,
        // so y snaps to the end's y.
        let line = Polyline::from_xy(&[(0., 0.), (1., 0.), (2., 3.)])?;
        let left = offset_polyline(&line, 0.5, true)?;
        assert_abs_diff_eq!(left[0].x, 0.0);
        assert_abs_diff_eq!(left[0].y, 0.5);
        assert_abs_diff_eq!(left[2].y, 3.0);
        assert!(left[2].x < 2.0);
        Ok(())
    }
    #[test]
    fn degenerate_inputs() -> LayoutResult<()> {
        let single = Polyline::from_xy(&[(1., 2.)])?;
        assert_eq!(offset_polyline(&single, 1.0, true)?, vec![Vector::new(1., 2.)]);
        assert!(offset_polyline(&Polyline::default(), 1.0, true)?.is_empty());

        let uturn = Polyline::from_xy(&[(0., 0.), (1., 0.), (0.5, 0.)])?;
        assert!(matches!(
            offset_polyline(&uturn, 1.0, false),
            Err(LayoutError::DegenerateInput(_))
        ));
        let line = Polyline::from_xy(&[(0., 0.), (1., 0.)])?;
        assert!(matches!(
            offset_polyline_varying(&line, &[1.0], false),
            Err(LayoutError::ConfigurationMismatch(_))
        ));
        Ok(())
    }
    #[test]
    fn varying_offsets() -> LayoutResult<()> {
        let line = Polyline::from_xy(&[(0., 0.), (5., 0.), (10., 0.)])?;
        let pts = offset_polyline_varying(&line, &[0.5, 0.75, 1.0], true)?;
        assert_eq!(
            pts,
            vec![Vector::new(0., 0.5), Vector::new(5., 0.75), Vector::new(10., 1.0)]
        );
        Ok(())
    }
}
