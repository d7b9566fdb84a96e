//!
//! # Fixed-Point Layout Grid
//!
//! All intermediate math is real-valued, in micrometers.
//! The [Grid] quantizes it to database units exactly once, at polygon construction.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::raw::{Int, Point, Polygon};
use crate::Vector;

/// Lower bound of [Grid::points_per_circle]
pub const MIN_POINTS_PER_CIRCLE: usize = 16;
/// Upper bound of [Grid::points_per_circle].
/// Also the hard cap on every curve-sampling loop.
pub const MAX_POINTS_PER_CIRCLE: usize = 4096;

/// # Layout Grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Database unit, in micrometers
    pub dbu: f64,
}
impl Default for Grid {
    fn default() -> Self {
        Self { dbu: 0.001 }
    }
}
impl Grid {
    pub fn new(dbu: f64) -> Self {
        Self { dbu }
    }
    /// Convert micrometers to the nearest database-unit integer
    pub fn to_db(&self, um: f64) -> Int {
        (um / self.dbu).round() as Int
    }
    /// Convert database units to micrometers
    pub fn from_db(&self, db: Int) -> f64 {
        db as f64 * self.dbu
    }
    /// Quantize [Vector] `v` to a grid [Point]
    pub fn point(&self, v: &Vector) -> Point {
        Point::new(self.to_db(v.x), self.to_db(v.y))
    }
    /// Convert grid [Point] `p` back to micrometers
    pub fn vector(&self, p: &Point) -> Vector {
        Vector::new(self.from_db(p.x), self.from_db(p.y))
    }
    /// Quantize a closed ring of [Vector]s.
    /// Points which land on their predecessor are dropped, as is a repeated closing point.
    pub fn ring(&self, pts: &[Vector]) -> Vec<Point> {
        let mut ring: Vec<Point> = Vec::with_capacity(pts.len());
        for v in pts {
            let p = self.point(v);
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        ring
    }
    /// Quantize a hole-less [Polygon]
    pub fn polygon(&self, pts: &[Vector]) -> Polygon {
        Polygon::new(self.ring(pts))
    }
    /// Number of points to sample a full circle of `radius` micrometers,
    /// such that the chord sagitta stays within half a database unit.
    /// Always a multiple of four.
    pub fn points_per_circle(&self, radius: f64) -> usize {
        let radius = radius.abs();
        let ratio = 1.0 - (self.dbu / 2.0) / radius;
        if ratio >= 1.0 {
            return MAX_POINTS_PER_CIRCLE;
        }
        if !(ratio > -1.0) {
            // Radius at or below the sagitta tolerance, or not a number
            return MIN_POINTS_PER_CIRCLE;
        }
        let n = (std::f64::consts::PI / ratio.acos()).ceil() as usize;
        // Multiples of four land a point on each axis extreme
        let n = (n + 3) / 4 * 4;
        n.clamp(MIN_POINTS_PER_CIRCLE, MAX_POINTS_PER_CIRCLE)
    }
    /// Number of segments to sample `sweep` degrees of circle `radius`.
    /// Always at least one.
    pub fn segments(&self, radius: f64, sweep: f64) -> usize {
        let ppc = self.points_per_circle(radius) as f64;
        ((ppc * sweep.abs() / 360.0).ceil() as usize).max(1)
    }
}
