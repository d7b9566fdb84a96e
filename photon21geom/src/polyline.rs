//!
//! # Polylines, Closed Curves, and Width Profiles
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::raw::{LayoutError, LayoutResult};
use crate::{Grid, Vector};

/// # Polyline
///
/// Ordered sequence of points with no implicit closure.
/// Consecutive points are always distinct; [Polyline::new] refuses them rather than dropping any.
///
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Vector>,
}
impl Polyline {
    /// Create a new [Polyline].
    /// Fails with [LayoutError::DegenerateInput] if any two consecutive points coincide.
    pub fn new(points: Vec<Vector>) -> LayoutResult<Self> {
        for (idx, pair) in points.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(LayoutError::degenerate(format!(
                    "Duplicate consecutive points at index {}: ({}, {})",
                    idx, pair[0].x, pair[0].y
                )));
            }
        }
        Ok(Self { points })
    }
    /// Create a [Polyline] from (x,y) tuples
    pub fn from_xy(xy: &[(f64, f64)]) -> LayoutResult<Self> {
        Self::new(xy.iter().map(|&p| p.into()).collect())
    }
    /// Create a new [Polyline] from points known to be distinct.
    pub(crate) fn from_unique(points: Vec<Vector>) -> Self {
        Self { points }
    }
    pub fn points(&self) -> &[Vector] {
        &self.points
    }
    pub fn into_points(self) -> Vec<Vector> {
        self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn first(&self) -> Option<&Vector> {
        self.points.first()
    }
    pub fn last(&self) -> Option<&Vector> {
        self.points.last()
    }
    /// The uniqueness pass.
    /// Removes every point which quantizes onto the same `grid` point as its predecessor.
    pub fn unique(&self, grid: &Grid) -> Polyline {
        let mut points: Vec<Vector> = Vec::with_capacity(self.points.len());
        let mut prev = None;
        for v in &self.points {
            let p = grid.point(v);
            if prev != Some(p) {
                points.push(*v);
                prev = Some(p);
            }
        }
        Polyline { points }
    }
    /// Total arc length
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|s| s[0].distance(&s[1])).sum()
    }
    /// Cumulative arc length at each point. Starts at zero.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut acc = 0.0;
        let mut rv = Vec::with_capacity(self.points.len());
        for (idx, p) in self.points.iter().enumerate() {
            if idx > 0 {
                acc += self.points[idx - 1].distance(p);
            }
            rv.push(acc);
        }
        rv
    }
    /// A new [Polyline] traversing ours back to front
    pub fn reversed(&self) -> Polyline {
        let mut points = self.points.clone();
        points.reverse();
        Polyline { points }
    }
    /// Append `other`, skipping its first point if it coincides with our last
    pub fn extend(&mut self, other: &Polyline) -> LayoutResult<()> {
        let skip = match (self.points.last(), other.points.first()) {
            (Some(a), Some(b)) => usize::from(a.distance(b) < 1e-12),
            _ => 0,
        };
        let rest = &other.points[skip..];
        if let (Some(a), Some(b)) = (self.points.last(), rest.first()) {
            if a == b {
                return Err(LayoutError::degenerate("Duplicate point at polyline junction"));
            }
        }
        self.points.extend_from_slice(rest);
        Ok(())
    }
    /// Unit direction of the first segment
    pub fn start_direction(&self) -> LayoutResult<Vector> {
        match self.points.as_slice() {
            [a, b, ..] => (*b - *a).normalize(),
            _ => Err(LayoutError::degenerate("Direction of a polyline with fewer than two points")),
        }
    }
    /// Unit direction of the last segment
    pub fn end_direction(&self) -> LayoutResult<Vector> {
        match self.points.as_slice() {
            [.., a, b] => (*b - *a).normalize(),
            _ => Err(LayoutError::degenerate("Direction of a polyline with fewer than two points")),
        }
    }
}

/// # Closed Curve
///
/// A ring of points, the last conceptually adjacent to the first.
/// The first point is never repeated at the end.
///
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedCurve {
    points: Vec<Vector>,
}
impl ClosedCurve {
    /// Create a new [ClosedCurve], dropping a literally repeated closing point.
    pub fn new(mut points: Vec<Vector>) -> LayoutResult<Self> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(LayoutError::degenerate(format!(
                "Closed curve requires at least three points, got {}",
                points.len()
            )));
        }
        Polyline::new(points).map(|p| Self { points: p.points })
    }
    pub fn points(&self) -> &[Vector] {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Shoelace area. Positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| self.points[i].cross(&self.points[(i + 1) % n]))
            .sum();
        twice / 2.0
    }
    /// Length of the closed boundary, including the closing segment
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].distance(&self.points[(i + 1) % n]))
            .sum()
    }
    /// A new [ClosedCurve] with opposite winding
    pub fn reversed(&self) -> ClosedCurve {
        let mut points = self.points.clone();
        points.reverse();
        ClosedCurve { points }
    }
}

/// # Width Profile
///
/// Waveguide width as a function of position along the centerline.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidthProfile {
    Constant(f64),
    /// Linear interpolation from `start` to `end` along arc length
    Linear { start: f64, end: f64 },
}
impl WidthProfile {
    /// Width at arc length `s` of `total`
    pub fn at(&self, s: f64, total: f64) -> f64 {
        match *self {
            Self::Constant(w) => w,
            Self::Linear { start, end } => {
                if total <= 0.0 {
                    return start;
                }
                let t = (s / total).clamp(0.0, 1.0);
                start + (end - start) * t
            }
        }
    }
    /// Widths at each point of `line`
    pub fn sample(&self, line: &Polyline) -> Vec<f64> {
        let total = line.length();
        line.cumulative_lengths()
            .iter()
            .map(|s| self.at(*s, total))
            .collect()
    }
    /// The larger of the profile's two end-widths
    pub fn max(&self) -> f64 {
        match *self {
            Self::Constant(w) => w,
            Self::Linear { start, end } => start.max(end),
        }
    }
}
impl From<f64> for WidthProfile {
    fn from(w: f64) -> Self {
        Self::Constant(w)
    }
}
