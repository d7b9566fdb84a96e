//!
//! # Routed Waveguide
//!
//! A waveguide of a technology-defined type along an arbitrary manhattan or angled path,
//! its corners filleted at the type's bend radius.
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::{finish, waveguide_type, MODEL_TEXT_SIZE};
use crate::annotate::ModelInfo;
use crate::component::{Component, PCell};
use crate::geom::{BuildOptions, CornerMode, Polyline, Vector};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// # Waveguide Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct WaveguideParams {
    /// Waveguide type name. Defaults to the technology's first.
    pub waveguide_type: Option<String>,
    /// Centerline vertices, (x, y) in micrometers
    pub path: Vec<(f64, f64)>,
}
impl Default for WaveguideParams {
    fn default() -> Self {
        Self {
            waveguide_type: None,
            path: vec![(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)],
        }
    }
}
impl ErrorHelper for WaveguideParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Waveguide: {}", msg.into()))
    }
}

/// # Waveguide
#[derive(Debug, Clone, PartialEq)]
pub struct Waveguide {
    params: WaveguideParams,
    path: Polyline,
}
impl Waveguide {
    pub fn new(params: WaveguideParams) -> LayoutResult<Self> {
        params.assert(params.path.len() >= 2, "path requires at least two points")?;
        let path = Polyline::from_xy(&params.path)?;
        Ok(Self { params, path })
    }
}
impl PCell for Waveguide {
    fn name(&self) -> String {
        format!("Waveguide_{}pts_L{:.3}", self.path.len(), self.path.length())
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let wg = waveguide_type(tech, self.params.waveguide_type.as_deref())?;
        let width = wg.width()?;
        let options = BuildOptions {
            square_ends: true,
            corner: Some((CornerMode::Arc, wg.radius)),
            grid: tech.grid(),
        };
        let stack = wg.stack();
        let line = stack.centerline(&self.path, &options)?;

        let mut comp = Component::new(self.name());
        comp.polygons = stack.outlines(&line, &options)?;
        let (first, last) = match (line.first(), line.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return self.params.fail("empty centerline"),
        };
        let start = PinDir::from_vector(&-line.start_direction()?);
        let end = PinDir::from_vector(&line.end_direction()?);
        comp.pins.push(Pin::optical("opt1", first, start, width));
        comp.pins.push(Pin::optical("opt2", last, end, width));

        let length = line.length();
        let info = ModelInfo::new(wg.library.as_str(), wg.model.as_str())
            .length("wg_length", length)
            .length("wg_width", width)
            .num("delay compensation", 0.0);
        comp.texts = info.texts(first + Vector::new(0.0, 4.0 * MODEL_TEXT_SIZE), MODEL_TEXT_SIZE);
        comp.length = length;
        Ok(finish(comp))
    }
}
