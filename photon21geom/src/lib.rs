//!
//! # Photon21 Geometry
//!
//! The centerline-to-polygon construction engine for photonic waveguides.
//!
//! Centerlines are explicit [Polyline]s, or are sampled from the closed-form [curves].
//! Sharp vertices are filleted or chamfered by [corner],
//! then each boundary is generated by [offset],
//! and the two are stitched into a closed outline by [assembly].
//! Ring annuli, device-recognition outlines, and double spirals are built atop the same primitives.
//!
//! All math is in `f64` micrometers. Quantization onto the integer [raw] grid happens once,
//! at polygon construction, through a [Grid].
//!

pub use photon21raw as raw;

pub mod assembly;
pub mod corner;
pub mod curves;
pub mod grid;
pub mod merge;
pub mod offset;
pub mod polyline;
pub mod ring;
pub mod spiral;
pub mod stack;
pub mod vector;

pub use assembly::{annulus, path_polygon, waveguide_outline};
pub use corner::{fillet_polyline, CornerMode};
pub use curves::{sample, Arc, ArchimedesSpiral, Curve, Parametric, SBend, SBendMode};
pub use grid::Grid;
pub use merge::merge;
pub use offset::{offset_polyline, offset_polyline_varying};
pub use polyline::{ClosedCurve, Polyline, WidthProfile};
pub use ring::{
    build_heater, build_ring_annulus, HeaterEnds, HeaterGeometry, RingGeometry, RingSpec,
};
pub use spiral::{build_spiral, LengthDiscrepancy, SpiralGeometry, SpiralParameters};
pub use stack::{
    build_waveguide_polygon, BuildOptions, LayerPolygon, LayerSpec, WaveguideStack,
};
pub use vector::{angle_between, angle_of_vector, Vector};

use raw::{LayoutError, LayoutResult, Polygon};

/// # Build S-Bend
///
/// Outline of an S-bend waveguide of `width`, from the origin to `(length, height)`,
/// with square ends.
///
pub fn build_sbend(
    length: f64,
    height: f64,
    width: f64,
    mode: SBendMode,
    grid: &Grid,
) -> LayoutResult<Polygon> {
    if !(length > 0.0 && width > 0.0) {
        return Err(LayoutError::Validation(format!(
            "S-bend requires positive length and width; got {} and {}",
            length, width
        )));
    }
    let centerline = sample(&SBend::new(length, height, mode), grid);
    waveguide_outline(&centerline, WidthProfile::Constant(width), 0.0, true, grid)
}
