//!
//! # Multi-Layer Waveguide Stack
//!
//! Fans one centerline out into a polygon per layer, each with its own width and lateral offset.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::assembly::waveguide_outline;
use crate::corner::{fillet_polyline, CornerMode};
use crate::raw::{LayoutError, LayoutResult, Polygon};
use crate::{Grid, Polyline, WidthProfile};

/// # Layer Specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Symbolic layer name
    pub layer: String,
    pub width: f64,
    /// Lateral offset of this layer's center from the shared centerline
    #[serde(default)]
    pub offset: f64,
    /// Side from which `offset` is measured: `1` to the left, `-1` to the right
    #[serde(default = "default_turn")]
    pub turn: i8,
}
fn default_turn() -> i8 {
    1
}
impl LayerSpec {
    pub fn new(layer: impl Into<String>, width: f64, offset: f64) -> Self {
        Self {
            layer: layer.into(),
            width,
            offset,
            turn: 1,
        }
    }
    /// Offset to the left of the centerline, with `turn` applied
    pub fn signed_offset(&self) -> f64 {
        self.offset * f64::from(self.turn.signum())
    }
}

/// # Stack Build Options
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BuildOptions {
    pub square_ends: bool,
    /// Corner treatment and requested radius, applied to the centerline before offsetting
    pub corner: Option<(CornerMode, f64)>,
    pub grid: Grid,
}

/// # Layer Polygon
/// One output polygon, tagged with its symbolic layer name
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPolygon {
    pub layer: String,
    pub polygon: Polygon,
}

/// # Waveguide Stack
///
/// An ordered list of [LayerSpec]s sharing one centerline.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveguideStack {
    pub layers: Vec<LayerSpec>,
}
impl WaveguideStack {
    pub fn new(layers: Vec<LayerSpec>) -> Self {
        Self { layers }
    }
    /// Create from parallel lists of layer names, widths, and offsets.
    /// Fails with [LayoutError::ConfigurationMismatch] unless all three are the same length.
    pub fn from_lists(
        layers: &[String],
        widths: &[f64],
        offsets: &[f64],
    ) -> LayoutResult<Self> {
        if layers.len() != widths.len() || layers.len() != offsets.len() {
            return Err(LayoutError::mismatch(format!(
                "Waveguide stack lists differ in length: {} layers, {} widths, {} offsets",
                layers.len(),
                widths.len(),
                offsets.len()
            )));
        }
        let layers = layers
            .iter()
            .zip(widths.iter().zip(offsets.iter()))
            .map(|(layer, (w, off))| LayerSpec::new(layer.clone(), *w, *off))
            .collect();
        Ok(Self { layers })
    }
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
    /// Widest extent of any layer from the centerline, on either side
    pub fn half_extent(&self) -> f64 {
        self.layers
            .iter()
            .map(|l| l.signed_offset().abs() + l.width / 2.0)
            .fold(0.0, f64::max)
    }
    /// The centerline after any corner treatment in `options`
    pub fn centerline(
        &self,
        centerline: &Polyline,
        options: &BuildOptions,
    ) -> LayoutResult<Polyline> {
        match options.corner {
            Some((mode, radius)) => fillet_polyline(centerline, radius, mode, &options.grid),
            None => Ok(centerline.unique(&options.grid)),
        }
    }
    /// Build one [LayerPolygon] per layer, in stack order
    pub fn build(
        &self,
        centerline: &Polyline,
        options: &BuildOptions,
    ) -> LayoutResult<Vec<LayerPolygon>> {
        let line = self.centerline(centerline, options)?;
        self.outlines(&line, options)
    }
    /// Build one [LayerPolygon] per layer along `line`, taken as already corner-treated.
    /// The `corner` field of `options` is not applied.
    pub fn outlines(
        &self,
        line: &Polyline,
        options: &BuildOptions,
    ) -> LayoutResult<Vec<LayerPolygon>> {
        self.layers
            .iter()
            .map(|spec| {
                let polygon = waveguide_outline(
                    line,
                    WidthProfile::Constant(spec.width),
                    spec.signed_offset(),
                    options.square_ends,
                    &options.grid,
                )?;
                Ok(LayerPolygon {
                    layer: spec.layer.clone(),
                    polygon,
                })
            })
            .collect()
    }
}

/// # Build Waveguide Polygon
///
/// Convenience wrapper over [WaveguideStack::build], with square ends.
/// Interior vertices get `corner` treatment if provided, and a plain miter otherwise.
///
pub fn build_waveguide_polygon(
    centerline: &Polyline,
    stack: &WaveguideStack,
    corner: Option<(CornerMode, f64)>,
    grid: &Grid,
) -> LayoutResult<Vec<LayerPolygon>> {
    let options = BuildOptions {
        square_ends: true,
        corner,
        grid: *grid,
    };
    stack.build(centerline, &options)
}
