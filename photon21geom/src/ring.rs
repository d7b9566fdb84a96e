//!
//! # Ring Resonator Geometry
//!
//! An annular ring coupled to a straight through-bus, and optionally to a second drop-bus above it.
//! Also the ring's optional metal heater trace.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::assembly::{annulus, disc, path_polygon, rect};
use crate::curves::{sample, Arc};
use crate::merge::merge;
use crate::raw::{LayoutError, LayoutResult, Polygon};
use crate::{Grid, Polyline, Vector};

/// Default device-recognition clearance around the ring and buses, in microns
pub const RING_CLEARANCE: f64 = 5.0;

/// # Ring Resonator Parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    /// Centerline radius
    pub radius: f64,
    pub width_ring: f64,
    pub width_bus: f64,
    /// Gap between the through-bus and the ring
    pub gap: f64,
    pub use_drop: bool,
    /// Gap between the ring and the drop-bus
    pub gap_drop: f64,
    /// Device-recognition clearance
    pub clearance: f64,
}
impl RingSpec {
    /// Create a new [RingSpec], with the drop gap equal to the through gap, and default clearance
    pub fn new(radius: f64, width_ring: f64, width_bus: f64, gap: f64, use_drop: bool) -> Self {
        Self {
            radius,
            width_ring,
            width_bus,
            gap,
            use_drop,
            gap_drop: gap,
            clearance: RING_CLEARANCE,
        }
    }
    /// Length of each bus waveguide
    pub fn bus_length(&self) -> f64 {
        2.0 * (self.radius + self.width_bus)
    }
    /// Ring center, relative to the through-bus starting at the origin
    pub fn center(&self) -> Vector {
        Vector::new(
            self.bus_length() / 2.0,
            self.radius + self.gap + (self.width_ring + self.width_bus) / 2.0,
        )
    }
    /// Centerline y-coordinate of the drop-bus
    pub fn drop_y(&self) -> f64 {
        2.0 * self.radius + self.width_ring + self.width_bus + self.gap + self.gap_drop
    }
}

/// # Ring Geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    /// Through-bus, then the drop-bus if requested
    pub bus: Vec<Polygon>,
    /// The ring annulus
    pub ring: Polygon,
    /// Merged device-recognition outline
    pub devrec: Vec<Polygon>,
    pub center: Vector,
    pub bus_length: f64,
    /// Drop-bus centerline y-coordinate, if present
    pub drop_y: Option<f64>,
}

/// # Build Ring Annulus
///
/// The through-bus runs from the origin along +x.
/// Its device-recognition box, the drop-bus's box, and a clearance annulus about the ring
/// are merged.
///
pub fn build_ring_annulus(spec: &RingSpec, grid: &Grid) -> LayoutResult<RingGeometry> {
    let RingSpec {
        radius,
        width_bus,
        clearance,
        ..
    } = *spec;
    let len = spec.bus_length();
    let center = spec.center();
    let ring = annulus(center, radius, spec.width_ring, grid)?;

    let bus_at = |y: f64| {
        rect(
            Vector::new(0.0, y - width_bus / 2.0),
            Vector::new(len, y + width_bus / 2.0),
            grid,
        )
    };
    let clear_at = |y: f64| {
        rect(
            Vector::new(0.0, y - clearance),
            Vector::new(len, y + clearance),
            grid,
        )
    };
    let mut bus = vec![bus_at(0.0)];
    let mut clear = vec![clear_at(0.0)];
    let drop_y = match spec.use_drop {
        true => {
            let y = spec.drop_y();
            bus.push(bus_at(y));
            clear.push(clear_at(y));
            Some(y)
        }
        false => None,
    };
    // Ring clearance. Small rings have no room for a hole.
    clear.push(match radius > clearance {
        true => annulus(center, radius, 2.0 * clearance, grid)?,
        false => disc(center, radius + clearance, grid),
    });
    let devrec = merge(&clear);

    Ok(RingGeometry {
        bus,
        ring,
        devrec,
        center,
        bus_length: len,
        drop_y,
    })
}

/// Angle below horizontal at which the heater leads leave the ring, in degrees
const HEATER_ANGLE: f64 = 60.0;
/// Length of each curved heater lead
const HEATER_LEAD_LENGTH: f64 = 20.0;
/// Number of steps in each heater lead
const HEATER_LEAD_STEPS: usize = 31;
/// Width of the heater's contact pads
pub const HEATER_PAD_WIDTH: f64 = 15.0;

/// Lateral inset of the square-ended pads from the heater's end, in microns
const HEATER_PAD_INSET: f64 = 0.75;
/// Height of the square-ended pads, in microns
const HEATER_PAD_HEIGHT: f64 = 3.0;

/// # Heater End Style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeaterEnds {
    /// Curved leads bending to head straight down, each ending in a pad taper
    #[default]
    Round,
    /// The bare arc, with a rectangular pad and triangular fillet below each end
    Square,
}

/// # Heater Geometry
#[derive(Debug, Clone, PartialEq)]
pub struct HeaterGeometry {
    /// Merged metal polygons
    pub polygons: Vec<Polygon>,
    /// Contact-pad centers, first at the lead leaving the ring's right side
    pub pads: [Vector; 2],
}

/// # Ring Heater
///
/// A metal trace of `width` over the ring from -60 to 240 degrees, with pads of width
/// [HEATER_PAD_WIDTH] below each end, shaped per `ends`.
///
pub fn build_heater(
    center: Vector,
    radius: f64,
    width: f64,
    ends: HeaterEnds,
    grid: &Grid,
) -> LayoutResult<HeaterGeometry> {
    if width <= 0.0 || radius <= width / 2.0 {
        return Err(LayoutError::degenerate(format!(
            "Heater of width {} does not fit a ring of radius {}",
            width, radius
        )));
    }
    let arc = Arc::new(center, radius, -HEATER_ANGLE, 180.0 + HEATER_ANGLE);
    let arc_pts = sample(&arc, grid);
    let (polygons, pads) = match ends {
        HeaterEnds::Round => round_heater(arc_pts, width, grid)?,
        HeaterEnds::Square => square_heater(center, arc_pts, radius, width, grid)?,
    };
    Ok(HeaterGeometry {
        polygons: merge(&polygons),
        pads,
    })
}

fn round_heater(
    arc: Polyline,
    width: f64,
    grid: &Grid,
) -> LayoutResult<(Vec<Polygon>, [Vector; 2])> {
    let step = HEATER_LEAD_LENGTH / HEATER_LEAD_STEPS as f64;
    // Lead headings sweep from tangent to the ring towards straight down
    let lead = |from: Vector, mirror: f64| -> Vec<Vector> {
        let mut p = from;
        (0..HEATER_LEAD_STEPS)
            .map(|i| {
                let frac = i as f64 / (HEATER_LEAD_STEPS - 1) as f64;
                let heading = (90.0 - HEATER_ANGLE) + HEATER_ANGLE * frac;
                let d = Vector::from_polar(step, heading);
                p = p + Vector::new(-mirror * d.x, -d.y);
                p
            })
            .collect()
    };
    let (first, last) = match (arc.first(), arc.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(LayoutError::degenerate("Empty heater arc")),
    };
    let mut pts: Vec<Vector> = lead(first, 1.0).into_iter().rev().collect();
    pts.extend(arc.into_points());
    pts.extend(lead(last, -1.0));
    let trace = Polyline::new(pts)?.unique(grid);

    let (wm, wp) = (width, HEATER_PAD_WIDTH);
    let ends = match (trace.first(), trace.last()) {
        (Some(f), Some(l)) => [*f, *l],
        _ => return Err(LayoutError::degenerate("Empty heater trace")),
    };
    let mut polygons = vec![path_polygon(&trace, wm, grid)?];
    let mut pads = [Vector::default(); 2];
    for (idx, end) in ends.iter().enumerate() {
        let y_pad = end.y - wp / 2.0 + wm / 2.0;
        polygons.push(grid.polygon(&[
            Vector::new(end.x + wm / 2.0, end.y),
            Vector::new(end.x - wm / 2.0, end.y),
            Vector::new(end.x - wp / 2.0, y_pad),
            Vector::new(end.x + wp / 2.0, y_pad),
        ]));
        pads[idx] = Vector::new(end.x, y_pad);
    }
    Ok((polygons, pads))
}

fn square_heater(
    center: Vector,
    arc: Polyline,
    radius: f64,
    width: f64,
    grid: &Grid,
) -> LayoutResult<(Vec<Polygon>, [Vector; 2])> {
    let (wm, wp) = (width, HEATER_PAD_WIDTH);
    let angle = HEATER_ANGLE.to_radians();
    // Pad corners, relative to the ring center, for the right-hand pad
    let x0 = radius * angle.cos() - HEATER_PAD_INSET;
    let y0 = -radius * angle.sin() + wm * angle.cos();
    let x1 = x0 + wp;
    let y1 = -radius * (x1 / radius).min(1.0).acos().sin() - wm / 2.0;
    let y2 = y0 - HEATER_PAD_HEIGHT;

    let mut polygons = vec![path_polygon(&arc, wm, grid)?];
    for side in [1.0, -1.0] {
        let (near, far) = (side * x0, side * x1);
        let (lo, hi) = (near.min(far), near.max(far));
        // Counter-clockwise on either side
        let tri = match side > 0.0 {
            true => [Vector::new(near, y0), Vector::new(far, y0), Vector::new(far, y1)],
            false => [Vector::new(far, y0), Vector::new(near, y0), Vector::new(far, y1)],
        };
        let tri: Vec<Vector> = tri.iter().map(|v| center + *v).collect();
        polygons.push(grid.polygon(&tri));
        polygons.push(rect(
            center + Vector::new(lo, y2),
            center + Vector::new(hi, y0),
            grid,
        ));
    }
    let x_pad = x0 + wp / 2.0;
    let pads = [
        center + Vector::new(x_pad, y2),
        center + Vector::new(-x_pad, y2),
    ];
    Ok((polygons, pads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{BoundBoxTrait, Point, ShapeTrait};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn ring_layout() -> LayoutResult<()> {
        let grid = Grid::default();
        let spec = RingSpec::new(10.0, 1.0, 0.5, 0.2, true);
        let geo = build_ring_annulus(&spec, &grid)?;
        assert_eq!(geo.bus.len(), 2);
        assert_relative_eq!(geo.bus_length, 21.0);
        assert_relative_eq!(geo.center.y, 10.0 + 0.2 + 0.75);
        let expected = PI * (10.5f64.powi(2) - 9.5f64.powi(2)) * 1e6;
        assert_relative_eq!(geo.ring.area(), expected, max_relative = 1e-3);

        // Gap between the ring's top and the drop-bus's bottom
        let ring_top = geo.ring.bbox().p1.y;
        let drop_bottom = geo.bus[1].bbox().p0.y;
        assert_eq!(drop_bottom - ring_top, 200);

        // Devrec covers both buses and the ring
        assert_eq!(geo.devrec.len(), 1);
        let devrec = &geo.devrec[0];
        assert!(devrec.contains(&Point::new(10_500, 0)));
        assert!(devrec.contains(&grid.point(&Vector::new(10.5, spec.drop_y()))));
        assert!(devrec.contains(&grid.point(&(geo.center + Vector::new(10.0, 0.0)))));
        Ok(())
    }
    #[test]
    fn ring_without_drop() -> LayoutResult<()> {
        let spec = RingSpec::new(50.0, 1.0, 1.0, 0.3, false);
        let geo = build_ring_annulus(&spec, &Grid::default())?;
        assert_eq!(geo.bus.len(), 1);
        assert!(geo.drop_y.is_none());
        // Clearance annulus keeps its hole
        assert!(geo.devrec.iter().any(|p| !p.holes.is_empty()));
        Ok(())
    }
    #[test]
    fn heater_pads() -> LayoutResult<()> {
        let grid = Grid::default();
        let heater = build_heater(Vector::new(51.0, 51.3), 50.0, 3.0, HeaterEnds::Round, &grid)?;
        assert_eq!(heater.polygons.len(), 1);
        let [right, left] = heater.pads;
        assert!(right.x > 51.0 && left.x < 51.0);
        assert_relative_eq!(right.y, left.y, epsilon = 1e-9);
        assert_relative_eq!(right.x - 51.0, 51.0 - left.x, epsilon = 1e-9);
        // Below the ring's lowest heater point
        assert!(right.y < 51.3 - 50.0 * (HEATER_ANGLE.to_radians().sin()));
        assert!(build_heater(Vector::default(), 1.0, 3.0, HeaterEnds::Round, &grid).is_err());
        Ok(())
    }
    #[test]
    fn square_heater_pads() -> LayoutResult<()> {
        let grid = Grid::default();
        let center = Vector::new(51.0, 51.3);
        let heater = build_heater(center, 50.0, 3.0, HeaterEnds::Square, &grid)?;
        assert_eq!(heater.polygons.len(), 1);
        let [right, left] = heater.pads;
        // Pads centered 0.75um inside the arc ends, plus half a pad width
        assert_relative_eq!(right.x - center.x, 25.0 - 0.75 + 7.5, epsilon = 1e-9);
        assert_relative_eq!(center.x - left.x, right.x - center.x, epsilon = 1e-9);
        let y2 = -50.0 * 3f64.sqrt() / 2.0 + 1.5 - 3.0;
        assert_relative_eq!(right.y - center.y, y2, epsilon = 1e-9);
        // Pad bottoms are flat, at the pad-center height
        let bottom = heater.polygons[0].bbox().p0.y;
        assert_eq!(bottom, grid.point(&right).y);
        Ok(())
    }
}
