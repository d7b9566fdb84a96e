//!
//! # Curve Parametrizations
//!
//! Closed-form centerline generators: circular [Arc]s, [ArchimedesSpiral] segments, and [SBend]s.
//! Each implements [Parametric], and is sampled lazily through a [Sampler]
//! at a density set by the [Grid], so that chord error stays within half a database unit.
//!

// Std-Lib
use std::f64::consts::TAU;

// Crates.io
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

// Local imports
use crate::grid::MAX_POINTS_PER_CIRCLE;
use crate::{Grid, Polyline, Vector};

/// # Parametric Curve Trait
#[enum_dispatch]
pub trait Parametric {
    /// Parameter domain, as (start, stop). `stop` may be less than `start`.
    fn domain(&self) -> (f64, f64);
    /// Point at parameter `t`
    fn eval(&self, t: f64) -> Vector;
    /// Number of segments to sample on `grid`. At least one.
    fn segments(&self, grid: &Grid) -> usize;
}

/// # Curve Enumeration
#[enum_dispatch(Parametric)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    Arc(Arc),
    ArchimedesSpiral(ArchimedesSpiral),
    SBend(SBend),
}

/// # Lazy Curve Sampler
///
/// Iterates over `segments + 1` evenly-spaced parameter values, both domain ends included.
///
pub struct Sampler<'c, C: Parametric + ?Sized> {
    curve: &'c C,
    t0: f64,
    t1: f64,
    segs: usize,
    idx: usize,
}
impl<'c, C: Parametric + ?Sized> Sampler<'c, C> {
    pub fn new(curve: &'c C, grid: &Grid) -> Self {
        let (t0, t1) = curve.domain();
        Self {
            curve,
            t0,
            t1,
            segs: curve.segments(grid).max(1),
            idx: 0,
        }
    }
}
impl<'c, C: Parametric + ?Sized> Iterator for Sampler<'c, C> {
    type Item = Vector;
    fn next(&mut self) -> Option<Vector> {
        if self.idx > self.segs {
            return None;
        }
        let t = if self.idx == self.segs {
            self.t1
        } else {
            self.t0 + (self.t1 - self.t0) * (self.idx as f64) / (self.segs as f64)
        };
        self.idx += 1;
        Some(self.curve.eval(t))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.segs + 1).saturating_sub(self.idx);
        (left, Some(left))
    }
}

/// Sample `curve` into a [Polyline], with the uniqueness pass applied on `grid`
pub fn sample(curve: &(impl Parametric + ?Sized), grid: &Grid) -> Polyline {
    Polyline::from_unique(Sampler::new(curve, grid).collect()).unique(grid)
}

/// # Circular Arc
///
/// `center + radius (cos t, sin t)`, for `t` in degrees from `start` to `stop`.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Vector,
    pub radius: f64,
    /// Start angle, degrees
    pub start: f64,
    /// Stop angle, degrees
    pub stop: f64,
}
impl Arc {
    pub fn new(center: Vector, radius: f64, start: f64, stop: f64) -> Self {
        Self {
            center,
            radius,
            start,
            stop,
        }
    }
    /// Arc length
    pub fn length(&self) -> f64 {
        self.radius.abs() * (self.stop - self.start).abs().to_radians()
    }
}
impl Parametric for Arc {
    fn domain(&self) -> (f64, f64) {
        (self.start, self.stop)
    }
    fn eval(&self, t: f64) -> Vector {
        self.center + Vector::from_polar(self.radius, t)
    }
    fn segments(&self, grid: &Grid) -> usize {
        grid.segments(self.radius, self.stop - self.start)
    }
}

/// # Archimedes Spiral Segment
///
/// `center + (a t + r0) (cos t, sin t)`, for `t` in *radians* over `[start, start + sweep]`.
/// The radius grows by `2 pi a` per turn.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchimedesSpiral {
    pub center: Vector,
    /// Radial growth per radian
    pub a: f64,
    /// Radius at `t = 0`
    pub r0: f64,
    /// Start parameter, radians
    pub start: f64,
    /// Swept parameter range, radians
    pub sweep: f64,
}
impl ArchimedesSpiral {
    /// Radius at parameter `t`
    pub fn radius(&self, t: f64) -> f64 {
        self.a * t + self.r0
    }
    /// Closed-form arc length over the full domain
    pub fn length(&self) -> f64 {
        let (t0, t1) = self.domain();
        spiral_length(self.a, self.radius(t0), self.radius(t1))
    }
}
impl Parametric for ArchimedesSpiral {
    fn domain(&self) -> (f64, f64) {
        (self.start, self.start + self.sweep)
    }
    fn eval(&self, t: f64) -> Vector {
        let r = self.radius(t);
        self.center + Vector::new(r * t.cos(), r * t.sin())
    }
    fn segments(&self, grid: &Grid) -> usize {
        let (t0, t1) = self.domain();
        let rmax = self.radius(t0).abs().max(self.radius(t1).abs());
        let turns = self.sweep.abs() / TAU;
        let ppc = grid.points_per_circle(rmax) as f64;
        let cap = MAX_POINTS_PER_CIRCLE as f64 * turns.ceil().max(1.0);
        ((ppc * turns).ceil().min(cap) as usize).max(1)
    }
}

/// Arc length of an Archimedes spiral with growth `a` per radian, between radii `r0` and `r1`.
/// Zero for `a == 0`, where the two radii carry no information about the sweep.
pub fn spiral_length(a: f64, r0: f64, r1: f64) -> f64 {
    if a == 0.0 {
        return 0.0;
    }
    let a = a.abs();
    // Antiderivative of sqrt(r^2 + a^2) / a, with respect to r
    let f = |r: f64| (r * r.hypot(a) + a * a * (r / a).asinh()) / (2.0 * a);
    (f(r1) - f(r0)).abs()
}

/// # S-Bend Construction Mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SBendMode {
    /// Two tangent circular arcs of equal radius
    Arc,
    /// Cubic bezier with horizontal control-point tangents
    #[default]
    Bezier,
}

/// # S-Bend
///
/// Connects the horizontal line through the origin
/// to the horizontal line through `(length, height)`,
/// with zero slope at both ends. Parametrized over `t` in `[0, 1]`.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SBend {
    pub length: f64,
    pub height: f64,
    pub mode: SBendMode,
}
impl SBend {
    pub fn new(length: f64, height: f64, mode: SBendMode) -> Self {
        Self {
            length,
            height,
            mode,
        }
    }
    /// Angle swept by each of the two arcs, radians. Signed as `height`.
    pub fn arc_angle(&self) -> f64 {
        2.0 * (self.height / self.length).atan()
    }
    /// Radius of each of the two arcs. Signed as `height`; infinite when straight.
    pub fn arc_radius(&self) -> f64 {
        self.length / (2.0 * self.arc_angle().sin())
    }
    fn is_straight(&self) -> bool {
        self.height == 0.0
    }
}
impl Parametric for SBend {
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
    fn eval(&self, t: f64) -> Vector {
        let (l, h) = (self.length, self.height);
        if self.is_straight() {
            return Vector::new(l * t, 0.0);
        }
        match self.mode {
            SBendMode::Arc => {
                let theta = self.arc_angle();
                let r = self.arc_radius();
                // First arc about (0, r), second about (l, h - r), meeting at (l/2, h/2)
                let on_first = |phi: f64| Vector::new(r * phi.sin(), r * (1.0 - phi.cos()));
                if t <= 0.5 {
                    on_first(2.0 * t * theta)
                } else {
                    Vector::new(l, h) - on_first((2.0 - 2.0 * t) * theta)
                }
            }
            SBendMode::Bezier => {
                let p1 = Vector::new(l / 2.0, 0.0);
                let p2 = Vector::new(l / 2.0, h);
                let p3 = Vector::new(l, h);
                let u = 1.0 - t;
                p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
            }
        }
    }
    fn segments(&self, grid: &Grid) -> usize {
        if self.is_straight() {
            return 1;
        }
        let sweep = self.arc_angle().abs().to_degrees();
        let per_arc = grid.segments(self.arc_radius().abs(), sweep);
        match self.mode {
            SBendMode::Arc => 2 * per_arc,
            // Bezier curvature peaks above the equivalent arcs'
            SBendMode::Bezier => 2 * per_arc.max(8) * 2,
        }
    }
}

/// Full-circle [Arc] of `radius` about `center`, for closed curves.
/// Excludes the repeated closing point.
pub fn circle(center: Vector, radius: f64, grid: &Grid) -> Vec<Vector> {
    let n = grid.points_per_circle(radius);
    (0..n)
        .map(|k| center + Vector::from_polar(radius, 360.0 * (k as f64) / (n as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn arc_endpoints_inclusive() {
        let grid = Grid::default();
        let arc = Arc::new(Vector::new(0., 10.), 10.0, 270.0, 360.0);
        let pts: Vec<Vector> = Sampler::new(&arc, &grid).collect();
        assert_eq!(pts.len(), arc.segments(&grid) + 1);
        assert_abs_diff_eq!(pts[0].x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[0].y, 0.0, epsilon = 1e-12);
        let last = pts[pts.len() - 1];
        assert_abs_diff_eq!(last.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(last.y, 10.0, epsilon = 1e-12);
        let line = sample(&arc, &grid);
        assert_abs_diff_eq!(line.length(), arc.length(), epsilon = 1e-3);
    }
    #[test]
    fn denser_sampling_for_larger_radii() {
        let grid = Grid::default();
        let small = Arc::new(Vector::default(), 5.0, 0.0, 90.0);
        let large = Arc::new(Vector::default(), 50.0, 0.0, 90.0);
        assert!(large.segments(&grid) > small.segments(&grid));
    }
    #[test]
    fn spiral_radius_grows() {
        let grid = Grid::default();
        let sp = ArchimedesSpiral {
            center: Vector::default(),
            a: 1.0,
            r0: 5.0,
            start: 0.0,
            sweep: TAU,
        };
        let line = sample(&Curve::from(sp.clone()), &grid);
        let first = line.first().unwrap();
        let last = line.last().unwrap();
        assert_abs_diff_eq!(first.norm(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(last.norm(), 5.0 + TAU, epsilon = 1e-9);
        assert_abs_diff_eq!(line.length(), sp.length(), epsilon = 1e-4 * sp.length());
        // A quarter-turn of a steep spiral, checked against its direct integral
        assert_abs_diff_eq!(spiral_length(2.0, 0.0, 2.0), 2.2956, epsilon = 1e-4);
    }
    #[test]
    fn sbend_tangents_are_horizontal() {
        let grid = Grid::default();
        for mode in [SBendMode::Arc, SBendMode::Bezier] {
            let sb = SBend::new(20.0, 4.0, mode);
            let line = sample(&sb, &grid);
            let first = line.first().unwrap();
            let last = line.last().unwrap();
            assert_abs_diff_eq!(first.x, 0.0);
            assert_abs_diff_eq!(first.y, 0.0);
            assert_abs_diff_eq!(last.x, 20.0, epsilon = 1e-12);
            assert_abs_diff_eq!(last.y, 4.0, epsilon = 1e-12);
            let d0 = line.start_direction().unwrap();
            let d1 = line.end_direction().unwrap();
            assert!(d0.y.abs() < 0.05, "{:?} start slope {}", mode, d0.y);
            assert!(d1.y.abs() < 0.05, "{:?} end slope {}", mode, d1.y);
        }
    }
    #[test]
    fn sbend_arc_midpoint_and_flat() {
        let sb = SBend::new(20.0, -4.0, SBendMode::Arc);
        let mid = sb.eval(0.5);
        assert_abs_diff_eq!(mid.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.y, -2.0, epsilon = 1e-12);
        let flat = SBend::new(20.0, 0.0, SBendMode::Bezier);
        assert_eq!(sample(&flat, &Grid::default()).len(), 2);
    }
    #[test]
    fn circle_excludes_closing_point() {
        let grid = Grid::default();
        let pts = circle(Vector::new(1., 1.), 10.0, &grid);
        assert_eq!(pts.len(), grid.points_per_circle(10.0));
        assert!(pts[0].distance(&pts[pts.len() - 1]) > 1e-3);
    }
}
