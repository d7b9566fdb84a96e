//!
//! # Ports
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::geom::{angle_of_vector, Vector};

/// # Pin Orientation
///
/// The outward-facing direction of a port. Always one of the four cardinal directions.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinDir {
    East,
    North,
    West,
    South,
}
impl PinDir {
    /// Angle in degrees, counter-clockwise from east
    pub fn angle(&self) -> f64 {
        match self {
            Self::East => 0.0,
            Self::North => 90.0,
            Self::West => 180.0,
            Self::South => 270.0,
        }
    }
    /// Nearest cardinal direction to `angle` degrees
    pub fn from_angle(angle: f64) -> Self {
        let quadrant = (angle.rem_euclid(360.0) / 90.0).round() as usize % 4;
        [Self::East, Self::North, Self::West, Self::South][quadrant]
    }
    /// Nearest cardinal direction to `v`
    pub fn from_vector(v: &Vector) -> Self {
        Self::from_angle(angle_of_vector(v))
    }
    pub fn unit(&self) -> Vector {
        match self {
            Self::East => Vector::new(1.0, 0.0),
            Self::North => Vector::new(0.0, 1.0),
            Self::West => Vector::new(-1.0, 0.0),
            Self::South => Vector::new(0.0, -1.0),
        }
    }
}

/// # Pin Kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinKind {
    Optical,
    Electrical,
}
impl PinKind {
    /// Default recognition layer for this kind of pin
    pub fn layer(&self) -> &'static str {
        match self {
            Self::Optical => "PinRec",
            Self::Electrical => "PinRecM",
        }
    }
}

/// # Pin
///
/// A component port: its location, facing, and width.
/// Drawn as a short path across the port boundary, plus a text label, on its recognition `layer`.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub loc: Vector,
    pub dir: PinDir,
    pub width: f64,
    pub kind: PinKind,
    pub layer: String,
}
impl Pin {
    pub fn new(
        name: impl Into<String>,
        loc: Vector,
        dir: PinDir,
        width: f64,
        kind: PinKind,
    ) -> Self {
        Self {
            name: name.into(),
            loc,
            dir,
            width,
            kind,
            layer: kind.layer().into(),
        }
    }
    pub fn optical(name: impl Into<String>, loc: Vector, dir: PinDir, width: f64) -> Self {
        Self::new(name, loc, dir, width, PinKind::Optical)
    }
    pub fn electrical(name: impl Into<String>, loc: Vector, dir: PinDir, width: f64) -> Self {
        Self::new(name, loc, dir, width, PinKind::Electrical)
    }
    /// Move to recognition layer `layer`. Consumes and returns `self` for chainability.
    pub fn on(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }
    /// End points of the marker path of `length`, running from inside the component outward
    pub fn marker(&self, length: f64) -> [Vector; 2] {
        let half = self.dir.unit() * (length / 2.0);
        [self.loc - half, self.loc + half]
    }
}
