//!
//! # Spiral Length Solver
//!
//! Packs a waveguide of a target length into a double Archimedes spiral.
//! Two interleaved arms wind outward from a central S-connector of two semicircles,
//! one arm carrying light in and the other carrying it out.
//!
//! The solver picks the number of turns, then root-finds the connector radius such that the
//! closed-form length of the drawn arms and connector matches the target.
//!

// Std-Lib
use std::f64::consts::{PI, TAU};

// Crates.io
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Local imports
use crate::curves::{sample, Arc, ArchimedesSpiral};
use crate::raw::{LayoutError, LayoutResult};
use crate::{Grid, Polyline, Vector};

/// Iteration cap of the radius root-finder
pub const MAX_NEWTON_ITERATIONS: usize = 50;
/// Root-finder convergence tolerance, relative to the target length
const NEWTON_TOLERANCE: f64 = 1e-9;

/// # Spiral Parameters
///
/// Solved geometric parameters of a double spiral. Derived by [solve_spiral], never set directly.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralParameters {
    /// Radius of each semicircle of the central S-connector.
    /// The arms start at twice this radius.
    pub radius: f64,
    /// Center-to-center spacing of neighboring waveguides
    pub spacing: f64,
    /// Number of full turns of each arm
    pub turns: usize,
    /// Radial growth of each arm per radian
    pub a: f64,
    /// Whether the outer arm winds an extra half-turn, bringing both ports to the same side
    pub ports_same_side: bool,
}
impl SpiralParameters {
    /// Inner arm, winding out from the connector's right end
    pub fn inner_arm(&self) -> ArchimedesSpiral {
        ArchimedesSpiral {
            center: Vector::default(),
            a: self.a,
            r0: 2.0 * self.radius,
            start: 0.0,
            sweep: TAU * self.turns as f64,
        }
    }
    /// Outer arm, winding out from the connector's left end, one spacing outside the inner arm
    pub fn outer_arm(&self) -> ArchimedesSpiral {
        let extra = if self.ports_same_side { PI } else { 0.0 };
        ArchimedesSpiral {
            center: Vector::default(),
            a: self.a,
            r0: 2.0 * self.radius + self.spacing,
            start: -PI,
            sweep: TAU * self.turns as f64 + extra,
        }
    }
    /// Closed-form length of both arms and the connector
    pub fn length(&self) -> f64 {
        TAU * self.radius + self.inner_arm().length() + self.outer_arm().length()
    }
}

/// # Length Discrepancy
///
/// Reported when a target length is infeasible under the radius constraint,
/// and the geometry was clamped to the nearest feasible spiral.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthDiscrepancy {
    pub requested: f64,
    pub achieved: f64,
}

/// # Spiral Geometry
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralGeometry {
    /// Centerline, from the inner arm's outer end, through the connector,
    /// to the outer arm's outer end
    pub centerline: Polyline,
    /// Length of the sampled centerline
    pub actual_length: f64,
    pub params: SpiralParameters,
    pub discrepancy: Option<LengthDiscrepancy>,
}

/// Solve for the [SpiralParameters] reaching `target_length`,
/// with connector radius at least `min_radius`.
/// Returns any [LengthDiscrepancy] alongside.
pub fn solve_spiral(
    target_length: f64,
    min_radius: f64,
    spacing: f64,
    ports_same_side: bool,
) -> LayoutResult<(SpiralParameters, Option<LengthDiscrepancy>)> {
    if !(target_length > 0.0 && min_radius > 0.0 && spacing > 0.0) {
        return Err(LayoutError::Validation(format!(
            "Spiral requires positive length, radius, and spacing; got {}, {}, {}",
            target_length, min_radius, spacing
        )));
    }
    let make = |radius: f64, turns: usize| SpiralParameters {
        radius,
        spacing,
        turns,
        // Each arm's neighbors on either side belong to the other arm
        a: spacing / PI,
        ports_same_side,
    };

    // Initial turn count from the first turn's length, which underestimates the rest
    let connector = TAU * min_radius;
    let first_turn = make(min_radius, 1).length() - connector;
    let mut turns = (((target_length - connector) / first_turn).floor().max(0.0) as usize) + 1;
    while turns > 1 && make(min_radius, turns).length() > target_length {
        turns -= 1;
    }
    debug!("Spiral of length {} uses {} turns", target_length, turns);

    let at_min = make(min_radius, turns);
    if at_min.length() > target_length {
        let achieved = at_min.length();
        warn!(
            "Spiral length {} infeasible at minimum radius {}; drawing {}",
            target_length, min_radius, achieved
        );
        let disc = LengthDiscrepancy {
            requested: target_length,
            achieved,
        };
        return Ok((at_min, Some(disc)));
    }

    let f = |r: f64| make(r, turns).length() - target_length;
    let tol = NEWTON_TOLERANCE * target_length;
    let r = newton(f, min_radius, tol, MAX_NEWTON_ITERATIONS)?;
    if r < min_radius {
        let clamped = make(min_radius, turns);
        let disc = LengthDiscrepancy {
            requested: target_length,
            achieved: clamped.length(),
        };
        warn!("Spiral radius {} clamped to {}", r, min_radius);
        return Ok((clamped, Some(disc)));
    }
    Ok((make(r, turns), None))
}

/// Newton's method on `f` from `x0`, with a central-difference derivative.
/// Stops once `|f(x)| <= tol`. Fails with [LayoutError::NumericNonConvergence], carrying the last
/// estimate, after `max_iterations` steps or on a non-positive slope.
fn newton(
    f: impl Fn(f64) -> f64,
    x0: f64,
    tol: f64,
    max_iterations: usize,
) -> LayoutResult<f64> {
    let mut x = x0;
    let mut iterations = 0;
    loop {
        let err = f(x);
        if err.abs() <= tol {
            return Ok(x);
        }
        if iterations >= max_iterations {
            return Err(LayoutError::NumericNonConvergence {
                message: format!("Spiral radius not found, residual {}", err),
                iterations,
                last: x,
            });
        }
        let h = 1e-6 * x.abs().max(1.0);
        let slope = (f(x + h) - f(x - h)) / (2.0 * h);
        if !(slope > 0.0) {
            return Err(LayoutError::NumericNonConvergence {
                message: format!("Spiral length derivative {} at radius {}", slope, x),
                iterations,
                last: x,
            });
        }
        x -= err / slope;
        iterations += 1;
        debug!("Spiral radius iteration {}: r = {}, error = {}", iterations, x, err);
    }
}

/// # Build Spiral
///
/// Solve for and sample a double spiral of `target_length`.
/// `spacing` is the center-to-center distance between neighboring waveguides.
///
pub fn build_spiral(
    target_length: f64,
    min_radius: f64,
    spacing: f64,
    ports_same_side: bool,
    grid: &Grid,
) -> LayoutResult<SpiralGeometry> {
    let (params, discrepancy) = solve_spiral(target_length, min_radius, spacing, ports_same_side)?;
    let b = params.radius;

    let mut centerline = sample(&params.inner_arm(), grid).reversed();
    // S-connector: clockwise about (b, 0), then counter-clockwise about (-b, 0)
    let first = Arc::new(Vector::new(b, 0.0), b, 0.0, -180.0);
    let second = Arc::new(Vector::new(-b, 0.0), b, 0.0, 180.0);
    centerline.extend(&sample(&first, grid))?;
    centerline.extend(&sample(&second, grid))?;
    centerline.extend(&sample(&params.outer_arm(), grid))?;
    let centerline = centerline.unique(grid);

    let actual_length = centerline.length();
    debug!(
        "Spiral drawn: radius {}, {} turns, length {}",
        b, params.turns, actual_length
    );
    Ok(SpiralGeometry {
        centerline,
        actual_length,
        params,
        discrepancy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solves_target_length() -> LayoutResult<()> {
        let (params, disc) = solve_spiral(3000.0, 20.0, 11.0, false)?;
        assert!(disc.is_none());
        assert!(params.radius >= 20.0);
        assert!(params.turns >= 1);
        assert_relative_eq!(params.length(), 3000.0, max_relative = 1e-8);
        Ok(())
    }
    #[test]
    fn drawn_length_matches() -> LayoutResult<()> {
        let grid = Grid::default();
        let geo = build_spiral(3000.0, 20.0, 11.0, false, &grid)?;
        assert_relative_eq!(geo.actual_length, 3000.0, max_relative = 1e-2);
        // Ports on opposite sides of the x axis origin
        let (first, last) = (geo.centerline.first().unwrap(), geo.centerline.last().unwrap());
        assert!(first.x > 0.0 && last.x < 0.0);

        let same = build_spiral(3000.0, 20.0, 11.0, true, &grid)?;
        let (first, last) = (same.centerline.first().unwrap(), same.centerline.last().unwrap());
        assert!(first.x > 0.0 && last.x > 0.0);
        assert_relative_eq!(same.actual_length, 3000.0, max_relative = 1e-2);
        Ok(())
    }
    #[test]
    fn short_targets_clamp() -> LayoutResult<()> {
        let (params, disc) = solve_spiral(100.0, 20.0, 11.0, false)?;
        assert_eq!(params.turns, 1);
        assert_eq!(params.radius, 20.0);
        let disc = disc.unwrap();
        assert_eq!(disc.requested, 100.0);
        assert!(disc.achieved > 100.0);
        Ok(())
    }
    #[test]
    fn solver_is_deterministic() -> LayoutResult<()> {
        let grid = Grid::default();
        let a = build_spiral(1234.5, 15.0, 6.0, false, &grid)?;
        let b = build_spiral(1234.5, 15.0, 6.0, false, &grid)?;
        assert_eq!(a, b);
        Ok(())
    }
    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            solve_spiral(-1.0, 20.0, 11.0, false),
            Err(LayoutError::Validation(_))
        ));
        assert!(solve_spiral(1000.0, 20.0, 0.0, false).is_err());
    }
    #[test]
    fn root_finder_gives_up() {
        let cube = |x: f64| x * x * x - 2.0;
        assert_relative_eq!(newton(cube, 1.0, 1e-12, 50).unwrap(), 2f64.cbrt(), epsilon = 1e-9);
        // One step from 1.0 lands near 4/3, short of the root
        match newton(cube, 1.0, 1e-12, 1) {
            Err(LayoutError::NumericNonConvergence {
                iterations, last, ..
            }) => {
                assert_eq!(iterations, 1);
                assert_relative_eq!(last, 4.0 / 3.0, epsilon = 1e-6);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
        // A flat function has no usable slope
        match newton(|_| 1.0, 20.0, 1e-9, 50) {
            Err(LayoutError::NumericNonConvergence {
                iterations, last, ..
            }) => {
                assert_eq!(iterations, 0);
                assert_eq!(last, 20.0);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }
}
