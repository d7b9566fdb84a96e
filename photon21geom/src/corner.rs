//!
//! # Corner Treatment
//!
//! Replaces the sharp interior vertices of a [Polyline] with chamfers or sampled circular arcs.
//! Requested radii shrink near short segments, so that neighboring corners never overlap
//! and no corner overshoots the segments it joins.
//!

// Crates.io
use serde::{Deserialize, Serialize};
use tracing::debug;

// Local imports
use crate::raw::{LayoutError, LayoutResult};
use crate::vector::angle_between;
use crate::{Grid, Polyline, Vector};

/// Turns smaller than this, in degrees, are treated as collinear and left as-is
const COLLINEAR_DEGREES: f64 = 1e-9;
/// Turns closer than this to a full reversal, in degrees, cannot be treated
const REVERSAL_DEGREES: f64 = 1e-6;

/// # Corner Treatment Mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CornerMode {
    /// Leave vertices sharp
    Sharp,
    /// Flat cut across the corner
    Chamfer,
    /// Sampled circular arc, tangent to both segments
    #[default]
    Arc,
}

/// # Fillet
///
/// Apply corner treatment `mode` of requested radius `radius` to every interior vertex of `line`.
/// The result has passed the uniqueness pass on `grid`, and is ready to be offset.
///
pub fn fillet_polyline(
    line: &Polyline,
    radius: f64,
    mode: CornerMode,
    grid: &Grid,
) -> LayoutResult<Polyline> {
    let pts = line.points();
    let n = pts.len();
    if n < 3 || mode == CornerMode::Sharp || radius <= 0.0 {
        return Ok(line.unique(grid));
    }
    let mut out: Vec<Vector> = Vec::with_capacity(n);
    out.push(pts[0]);
    for idx in 1..n - 1 {
        let r_eff = effective_radius(pts, idx, radius);
        if r_eff < radius {
            debug!(
                "Corner {} radius clamped from {} to {}",
                idx, radius, r_eff
            );
        }
        let corner = corner(&pts[idx - 1], &pts[idx], &pts[idx + 1], r_eff, mode, grid)?;
        out.extend(corner);
    }
    out.push(pts[n - 1]);
    Ok(Polyline::from_unique(out).unique(grid))
}

/// Effective radius at interior vertex `idx` of `pts`, for requested radius `radius`.
///
/// With a single interior vertex, this is the minimum of the radius and both segment lengths.
/// Otherwise each adjacent segment shorter than twice the radius halves it
/// to that segment's length,
/// so its neighbor can claim the other half. The first and last segments have no such neighbor,
/// and may be consumed in full when shorter than the radius.
pub fn effective_radius(pts: &[Vector], idx: usize, radius: f64) -> f64 {
    let n = pts.len();
    let d1 = pts[idx].distance(&pts[idx - 1]);
    let d2 = pts[idx].distance(&pts[idx + 1]);
    if n == 3 {
        return radius.min(d1).min(d2);
    }
    let mut r = radius;
    if idx == 1 && d1 <= r {
        r = d1;
    } else if d1 < 2.0 * r {
        r = d1 / 2.0;
    }
    if idx == n - 2 && d2 <= r {
        r = d2;
    } else if d2 < 2.0 * r {
        r = d2 / 2.0;
    }
    r
}

/// Replacement points for vertex `vertex`, between `prev` and `next`, at effective radius `r_eff`.
///
/// Every returned point lies on the segments within `r_eff` of `vertex`,
/// or on the arc between them.
/// Collinear vertices are returned unchanged.
pub fn corner(
    prev: &Vector,
    vertex: &Vector,
    next: &Vector,
    r_eff: f64,
    mode: CornerMode,
    grid: &Grid,
) -> LayoutResult<Vec<Vector>> {
    let t1 = (*vertex - *prev).normalize()?;
    let t2 = (*next - *vertex).normalize()?;
    let turn = angle_between(&t1, &t2);
    if turn.abs() < COLLINEAR_DEGREES || mode == CornerMode::Sharp || r_eff <= 0.0 {
        return Ok(vec![*vertex]);
    }
    if turn.abs() > 180.0 - REVERSAL_DEGREES {
        return Err(LayoutError::degenerate(format!(
            "Polyline reverses direction at ({}, {})",
            vertex.x, vertex.y
        )));
    }
    let half = turn.abs().to_radians() / 2.0;
    match mode {
        CornerMode::Sharp => Ok(vec![*vertex]),
        CornerMode::Chamfer => {
            // Cut length is `r_eff`, or less where the turn is sharp enough
            // that setting back that far would overshoot `r_eff` along either segment.
            let cut = r_eff.min(2.0 * r_eff * half.cos());
            let setback = (cut / (2.0 * half.cos())).min(r_eff);
            Ok(vec![*vertex - t1 * setback, *vertex + t2 * setback])
        }
        CornerMode::Arc => {
            let mut arc_radius = r_eff;
            let mut setback = arc_radius * half.tan();
            if setback > r_eff {
                setback = r_eff;
                arc_radius = r_eff / half.tan();
            }
            let start = *vertex - t1 * setback;
            // Center sits on the inside of the turn
            let side = if turn > 0.0 { 1.0 } else { -1.0 };
            let center = start + t1.left_normal() * (arc_radius * side);
            let start_angle = crate::vector::angle_of_vector(&(start - center));
            let segs = grid.segments(arc_radius, turn);
            let mut pts = Vec::with_capacity(segs + 1);
            for k in 0..=segs {
                let angle = start_angle + turn * (k as f64) / (segs as f64);
                pts.push(center + Vector::from_polar(arc_radius, angle));
            }
            // Pin the ends exactly on the segments
            pts[0] = start;
            pts[segs] = *vertex + t2 * setback;
            Ok(pts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_path() -> LayoutResult<Polyline> {
        Polyline::from_xy(&[(0., 0.), (20., 0.), (20., 20.), (0., 20.)])
    }

    #[test]
    fn clamp_three_points() {
        let pts = [Vector::new(0., 0.), Vector::new(3., 0.), Vector::new(3., 10.)];
        assert_eq!(effective_radius(&pts, 1, 5.0), 3.0);
        assert_eq!(effective_radius(&pts, 1, 2.0), 2.0);
    }
    #[test]
    fn clamp_interior_segments() {
        let pts = [
            Vector::new(0., 0.),
            Vector::new(10., 0.),
            Vector::new(10., 6.),
            Vector::new(0., 6.),
            Vector::new(0., 20.),
        ];
        // The 6-long segment is shared by corners 1 and 2, so each gets at most 3
        assert_eq!(effective_radius(&pts, 1, 5.0), 3.0);
        assert_eq!(effective_radius(&pts, 2, 5.0), 3.0);
        assert_eq!(effective_radius(&pts, 3, 5.0), 5.0);
        assert_eq!(effective_radius(&pts, 2, 2.0), 2.0);
        // A short first segment is claimed in full
        let pts = [
            Vector::new(0., 0.),
            Vector::new(1., 0.),
            Vector::new(1., 50.),
            Vector::new(50., 50.),
        ];
        assert_eq!(effective_radius(&pts, 1, 5.0), 1.0);
    }
    #[test]
    fn chamfer_right_angle() -> LayoutResult<()> {
        let line = Polyline::from_xy(&[(0., 0.), (10., 0.), (10., 10.)])?;
        let out = fillet_polyline(&line, 2.0, CornerMode::Chamfer, &Grid::default())?;
        assert_eq!(out.len(), 4);
        let (a, b) = (out.points()[1], out.points()[2]);
        // Cut of length 2, at 45 degrees
        assert_abs_diff_eq!(a.distance(&b), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, 0.0);
        assert_abs_diff_eq!(b.x, 10.0);
        assert_abs_diff_eq!(10.0 - a.x, b.y, epsilon = 1e-12);
        Ok(())
    }
    #[test]
    fn arc_turns_both_ways() -> LayoutResult<()> {
        let grid = Grid::default();
        for (end_y, center_y) in [(10.0, 5.0), (-10.0, -5.0)] {
            let line = Polyline::from_xy(&[(0., 0.), (10., 0.), (10., end_y)])?;
            let out = fillet_polyline(&line, 5.0, CornerMode::Arc, &grid)?;
            let center = Vector::new(5.0, center_y);
            let arc = &out.points()[1..out.len() - 1];
            assert!(arc.len() > 10);
            for p in arc {
                assert_abs_diff_eq!(p.distance(&center), 5.0, epsilon = 1e-9);
            }
            assert_abs_diff_eq!(arc[0].x, 5.0, epsilon = 1e-12);
            assert_abs_diff_eq!(arc[0].y, 0.0);
            assert_abs_diff_eq!(arc[arc.len() - 1].y, center_y, epsilon = 1e-12);
        }
        Ok(())
    }
    #[test]
    fn square_loop_corners_do_not_overlap() -> LayoutResult<()> {
        let grid = Grid::default();
        let out = fillet_polyline(&square_path()?, 15.0, CornerMode::Arc, &grid)?;
        // The middle side is shared, each corner claims half
        let pts = out.points();
        assert!(pts.iter().all(|p| p.x >= -1e-9 && p.x <= 20.0 + 1e-9));
        assert!(Polyline::new(pts.to_vec()).is_ok());
        assert_abs_diff_eq!(out.last().unwrap().x, 0.0);
        Ok(())
    }
    #[test]
    fn sharp_and_collinear_are_untouched() -> LayoutResult<()> {
        let grid = Grid::default();
        let line = Polyline::from_xy(&[(0., 0.), (5., 0.), (10., 0.), (10., 5.)])?;
        let sharp = fillet_polyline(&line, 2.0, CornerMode::Sharp, &grid)?;
        assert_eq!(sharp, line);
        let out = fillet_polyline(&line, 2.0, CornerMode::Chamfer, &grid)?;
        assert_eq!(out.points()[1], Vector::new(5., 0.));
        assert_eq!(out.len(), 5);
        Ok(())
    }
    #[test]
    fn reversal_fails() -> LayoutResult<()> {
        let line = Polyline::from_xy(&[(0., 0.), (10., 0.), (2., 0.)])?;
        let e = fillet_polyline(&line, 1.0, CornerMode::Arc, &Grid::default());
        assert!(matches!(e, Err(LayoutError::DegenerateInput(_))));
        Ok(())
    }
}
