//!
//! # Vector and Angle Primitives
//!
//! Real-valued two-dimensional vectors, in micrometers.
//! All angles are in degrees, counter-clockwise positive.
//!

// Crates.io
use derive_more::{Add, AddAssign, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

// Local imports
use crate::raw::{LayoutError, LayoutResult};

/// # Two-Dimensional Vector
///
/// Doubles as a point in real-valued layout space.
///
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}
impl Vector {
    /// Create a new [Vector] from (x,y) components
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    /// Unit vector at `angle` degrees, scaled by `radius`
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(radius * cos, radius * sin)
    }
    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
    /// Distance to `other`
    pub fn distance(&self, other: &Vector) -> f64 {
        (*other - *self).norm()
    }
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }
    /// Z-component of the cross product. Positive when `other` lies counter-clockwise of `self`.
    pub fn cross(&self, other: &Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }
    /// The normal rotated 90 degrees counter-clockwise, i.e. pointing to the left of travel
    pub fn left_normal(&self) -> Vector {
        Vector::new(-self.y, self.x)
    }
    /// Unit vector in our direction.
    /// Fails with [LayoutError::DivideByZero] for zero-length vectors.
    pub fn normalize(&self) -> LayoutResult<Vector> {
        let n = self.norm();
        if n == 0.0 {
            return Err(LayoutError::DivideByZero);
        }
        Ok(Vector::new(self.x / n, self.y / n))
    }
}
impl std::ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}
impl From<(f64, f64)> for Vector {
    fn from(xy: (f64, f64)) -> Self {
        Self::new(xy.0, xy.1)
    }
}

/// Angle of `v` from the positive x-axis, in `[0, 360)` degrees
pub fn angle_of_vector(v: &Vector) -> f64 {
    let deg = v.y.atan2(v.x).to_degrees();
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    // `-0.0 + 360.0` and rounding near the wrap both land here
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}
/// Signed angle turning from `v1` to `v2`, in `(-180, 180]` degrees
pub fn angle_between(v1: &Vector, v2: &Vector) -> f64 {
    let deg = v1.cross(v2).atan2(v1.dot(v2)).to_degrees();
    if deg <= -180.0 {
        deg + 360.0
    } else {
        deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn angles_of_cardinal_vectors() {
        assert_abs_diff_eq!(angle_of_vector(&Vector::new(1., 0.)), 0.0);
        assert_abs_diff_eq!(angle_of_vector(&Vector::new(0., 2.)), 90.0);
        assert_abs_diff_eq!(angle_of_vector(&Vector::new(-1., 0.)), 180.0);
        assert_abs_diff_eq!(angle_of_vector(&Vector::new(0., -1.)), 270.0);
        assert_abs_diff_eq!(angle_of_vector(&Vector::new(1., -1e-18)), 0.0, epsilon = 1e-9);
    }
    #[test]
    fn signed_angle_between() {
        let x = Vector::new(1., 0.);
        assert_abs_diff_eq!(angle_between(&x, &Vector::new(0., 1.)), 90.0);
        assert_abs_diff_eq!(angle_between(&x, &Vector::new(0., -1.)), -90.0);
        assert_abs_diff_eq!(angle_between(&x, &Vector::new(-1., 0.)), 180.0);
        assert_abs_diff_eq!(angle_between(&Vector::new(0., 1.), &x), -90.0);
        assert_abs_diff_eq!(angle_between(&x, &Vector::new(-1., 1.)), 135.0, epsilon = 1e-12);
    }
    #[test]
    fn normalize_zero_fails() {
        assert!(matches!(
            Vector::new(0., 0.).normalize(),
            Err(LayoutError::DivideByZero)
        ));
        let u = Vector::new(3., 4.).normalize().unwrap();
        assert_abs_diff_eq!(u.x, 0.6);
        assert_abs_diff_eq!(u.y, 0.8);
    }
    #[test]
    fn arithmetic() {
        let a = Vector::new(1., 2.);
        let b = Vector::new(3., -1.);
        assert_eq!(a + b, Vector::new(4., 1.));
        assert_eq!(a - b, Vector::new(-2., 3.));
        assert_eq!(-a, Vector::new(-1., -2.));
        assert_eq!(a * 2.0, Vector::new(2., 4.));
        assert_eq!(a.left_normal(), Vector::new(-2., 1.));
        assert_abs_diff_eq!(a.cross(&b), -7.0);
        let p = Vector::from_polar(2.0, 90.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0);
    }
}
