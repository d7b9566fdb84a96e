//!
//! # Wireguide
//!
//! A metal route: one or more parallel flush-ended paths
//! sharing a filleted or chamfered centerline.
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::{finish, MODEL_TEXT_SIZE};
use crate::annotate::ModelInfo;
use crate::component::{Component, PCell, PathShape};
use crate::geom::{fillet_polyline, offset_polyline, CornerMode, Polyline, Vector, WaveguideStack};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// # Wireguide Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct WireguideParams {
    /// Centerline vertices, (x, y) in micrometers
    pub path: Vec<(f64, f64)>,
    /// Requested corner radius
    pub radius: f64,
    pub corner: CornerMode,
    /// Layer names, one per path
    pub layers: Vec<String>,
    /// Path widths, one per layer
    pub widths: Vec<f64>,
    /// Offsets of each path from the centerline, one per layer
    pub offsets: Vec<f64>,
}
impl Default for WireguideParams {
    fn default() -> Self {
        Self {
            path: vec![(0.0, 0.0), (-100.0, 0.0), (-100.0, 100.0)],
            radius: 50.0,
            corner: CornerMode::Chamfer,
            layers: vec!["M1P".into()],
            widths: vec![2.0],
            offsets: vec![0.0],
        }
    }
}
impl ErrorHelper for WireguideParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Wireguide: {}", msg.into()))
    }
}

/// # Wireguide
#[derive(Debug, Clone, PartialEq)]
pub struct Wireguide {
    params: WireguideParams,
    path: Polyline,
    stack: WaveguideStack,
}
impl Wireguide {
    pub fn new(params: WireguideParams) -> LayoutResult<Self> {
        let stack = WaveguideStack::from_lists(&params.layers, &params.widths, &params.offsets)?;
        params.assert(!stack.is_empty(), "requires at least one layer")?;
        params.assert(stack.layers.iter().all(|l| l.width > 0.0), "widths must be positive")?;
        params.assert(params.path.len() >= 2, "path requires at least two points")?;
        let path = Polyline::from_xy(&params.path)?;
        Ok(Self { params, path, stack })
    }
}
impl PCell for Wireguide {
    fn name(&self) -> String {
        format!("Wireguide_{}pts_L{:.3}", self.path.len(), self.path.length())
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let p = &self.params;
        let grid = tech.grid();
        let line = fillet_polyline(&self.path, p.radius, p.corner, &grid)?;

        let mut comp = Component::new(self.name());
        for spec in &self.stack.layers {
            let points = match spec.signed_offset() {
                off if off == 0.0 => line.clone(),
                off => Polyline::new(offset_polyline(&line, off, false)?)?,
            };
            comp.paths.push(PathShape {
                layer: spec.layer.clone(),
                points,
                width: spec.width,
            });
        }

        let (first, last) = match (line.first(), line.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return p.fail("empty centerline"),
        };
        let width = self.stack.half_extent() * 2.0;
        let start = PinDir::from_vector(&-line.start_direction()?);
        let end = PinDir::from_vector(&line.end_direction()?);
        comp.pins.push(Pin::electrical("pin1", first, start, width));
        comp.pins.push(Pin::electrical("pin2", last, end, width));

        let length = line.length();
        let info =
            ModelInfo::new("Design kits/PRL_PDK", "PRL_Wireguide").length("wire_length", length);
        let loc = first + Vector::new(0.0, width + 4.0 * MODEL_TEXT_SIZE);
        comp.texts = info.texts(loc, MODEL_TEXT_SIZE);
        comp.length = length;
        Ok(finish(comp))
    }
}
