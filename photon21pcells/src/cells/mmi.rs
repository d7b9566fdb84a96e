//!
//! # Multimode Interference Coupler
//!
//! A rectangular multimode section fed by tapered single-mode inputs on its west side,
//! and tapered outputs on its east side.
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::{finish, MODEL_TEXT_SIZE};
use crate::annotate::{ModelInfo, MODEL_LAYER};
use crate::component::{Component, PCell};
use crate::geom::assembly::rect;
use crate::geom::{waveguide_outline, Grid, Polyline, Vector, WidthProfile};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult, Polygon};
use crate::tech::Technology;

/// # MMI Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct MmiParams {
    pub layer: String,
    /// Single-mode port width
    pub width: f64,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub mmi_width: f64,
    pub mmi_length: f64,
    /// Clear gap between neighboring input tapers' port ends
    pub input_spacing: f64,
    /// Clear gap between neighboring output tapers' port ends
    pub output_spacing: f64,
    pub taper_length: f64,
    /// Taper width where it meets the multimode section
    pub taper_width: f64,
}
impl Default for MmiParams {
    fn default() -> Self {
        Self {
            layer: "Si".into(),
            width: 1.0,
            num_inputs: 2,
            num_outputs: 2,
            mmi_width: 6.0,
            mmi_length: 20.0,
            input_spacing: 1.2,
            output_spacing: 2.0,
            taper_length: 3.0,
            taper_width: 1.2,
        }
    }
}
impl ErrorHelper for MmiParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Mmi: {}", msg.into()))
    }
}
impl MmiParams {
    /// Span of a group of `num` tapers, center to center, at pitch `spacing + width`
    fn span(&self, num: usize, spacing: f64) -> f64 {
        (num.saturating_sub(1)) as f64 * (spacing + self.width)
    }
}

/// # MMI
#[derive(Debug, Clone, PartialEq)]
pub struct Mmi {
    params: MmiParams,
}
impl Mmi {
    pub fn new(params: MmiParams) -> LayoutResult<Self> {
        let p = &params;
        p.assert(
            p.num_inputs > 0 && p.num_outputs > 0,
            "requires at least one input and one output",
        )?;
        p.assert(p.width > 0.0 && p.taper_width > 0.0, "widths must be positive")?;
        p.assert(p.mmi_length > 0.0 && p.taper_length > 0.0, "lengths must be positive")?;
        p.assert(
            p.input_spacing >= 0.0 && p.output_spacing >= 0.0,
            "spacings must be non-negative",
        )?;
        for (num, spacing) in [(p.num_inputs, p.input_spacing), (p.num_outputs, p.output_spacing)] {
            p.assert(
                p.span(num, spacing) + p.taper_width <= p.mmi_width,
                format!("{} tapers do not fit a multimode section {} wide", num, p.mmi_width),
            )?;
        }
        Ok(Self { params })
    }
    /// Taper from its port `at` to the multimode section, heading `dx` (+1 east, -1 west)
    fn taper(&self, at: Vector, dx: f64, grid: &Grid) -> LayoutResult<Polygon> {
        let p = &self.params;
        let end = at + Vector::new(dx * p.taper_length, 0.0);
        let line = Polyline::new(vec![at, end])?;
        let profile = WidthProfile::Linear {
            start: p.width,
            end: p.taper_width,
        };
        waveguide_outline(&line, profile, 0.0, true, grid)
    }
}
impl PCell for Mmi {
    fn name(&self) -> String {
        let p = &self.params;
        format!("MMI_{}x{}_W{}_L{}", p.num_inputs, p.num_outputs, p.mmi_width, p.mmi_length)
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let p = &self.params;
        let grid = tech.grid();
        let total = 2.0 * p.taper_length + p.mmi_length;
        let y_center = p.span(p.num_inputs, p.input_spacing) / 2.0;
        let y_out0 = y_center - p.span(p.num_outputs, p.output_spacing) / 2.0;

        let mut comp = Component::new(self.name());
        for i in 0..p.num_inputs {
            let at = Vector::new(0.0, i as f64 * (p.input_spacing + p.width));
            comp.polygon(p.layer.as_str(), self.taper(at, 1.0, &grid)?);
            comp.pins.push(Pin::optical(format!("opt{}", i + 1), at, PinDir::West, p.width));
        }
        for i in 0..p.num_outputs {
            let at = Vector::new(total, y_out0 + i as f64 * (p.output_spacing + p.width));
            comp.polygon(p.layer.as_str(), self.taper(at, -1.0, &grid)?);
            let name = format!("opt{}", p.num_inputs + i + 1);
            comp.pins.push(Pin::optical(name, at, PinDir::East, p.width));
        }
        let (y0, y1) = (y_center - p.mmi_width / 2.0, y_center + p.mmi_width / 2.0);
        comp.polygon(
            p.layer.as_str(),
            rect(
                Vector::new(p.taper_length, y0),
                Vector::new(p.taper_length + p.mmi_length, y1),
                &grid,
            ),
        );
        comp.polygon(MODEL_LAYER, rect(Vector::new(0.0, y0), Vector::new(total, y1), &grid));

        let info = ModelInfo::new("Design kits/PRL_PDK", "PRL_MMI")
            .length("mmi_width", p.mmi_width)
            .length("mmi_length", p.mmi_length)
            .num("inputs", p.num_inputs as f64)
            .num("outputs", p.num_outputs as f64);
        comp.texts = info.texts(Vector::new(p.taper_length, y1 - MODEL_TEXT_SIZE), MODEL_TEXT_SIZE);
        comp.length = total;
        Ok(finish(comp))
    }
}
