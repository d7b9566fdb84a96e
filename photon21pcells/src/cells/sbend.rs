//!
//! # S-Bend
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::{finish, MODEL_TEXT_SIZE};
use crate::annotate::{ModelInfo, MODEL_LAYER};
use crate::component::{Component, PCell};
use crate::geom::assembly::rect;
use crate::geom::curves::SBend as SBendCurve;
use crate::geom::{build_sbend, sample, SBendMode, Vector};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// # S-Bend Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct SBendParams {
    pub layer: String,
    /// Horizontal extent
    pub length: f64,
    /// Vertical offset between the two ends
    pub height: f64,
    pub width: f64,
    pub mode: SBendMode,
}
impl Default for SBendParams {
    fn default() -> Self {
        Self {
            layer: "Si".into(),
            length: 20.0,
            height: 4.0,
            width: 1.0,
            mode: SBendMode::Bezier,
        }
    }
}
impl ErrorHelper for SBendParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("SBend: {}", msg.into()))
    }
}

/// # S-Bend
///
/// Joins the origin to `(length, height)`, horizontal at both ends.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SBend {
    params: SBendParams,
}
impl SBend {
    pub fn new(params: SBendParams) -> LayoutResult<Self> {
        params.assert(params.length > 0.0, "length must be positive")?;
        params.assert(params.width > 0.0, "width must be positive")?;
        Ok(Self { params })
    }
}
impl PCell for SBend {
    fn name(&self) -> String {
        let p = &self.params;
        format!("SBend_L{}_H{}_W{}", p.length, p.height, p.width)
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let SBendParams {
            length: l,
            height: h,
            width: w,
            mode,
            ..
        } = self.params;
        let grid = tech.grid();

        let mut comp = Component::new(self.name());
        comp.polygon(self.params.layer.as_str(), build_sbend(l, h, w, mode, &grid)?);
        comp.polygon(
            MODEL_LAYER,
            rect(
                Vector::new(0.0, (-3.0 * w).min(h - 3.0 * w)),
                Vector::new(l, (3.0 * w).max(h + 3.0 * w)),
                &grid,
            ),
        );
        comp.pins.push(Pin::optical("pin1", Vector::new(0.0, 0.0), PinDir::West, w));
        comp.pins.push(Pin::optical("pin2", Vector::new(l, h), PinDir::East, w));

        let info = ModelInfo::new("Design kits/PRL_PDK", "PRL_Sine_bend")
            .length("x_length", l)
            .length("jog", h)
            .length("width", w)
            .num("delay compensation", 0.0);
        comp.texts = info.texts(Vector::new(0.0, (3.0 * w).max(h + 3.0 * w)), MODEL_TEXT_SIZE);
        comp.length = sample(&SBendCurve::new(l, h, mode), &grid).length();
        Ok(finish(comp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::BoundBoxTrait;

    #[test]
    fn sbend_pins_and_devrec() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        for mode in [SBendMode::Arc, SBendMode::Bezier] {
            let params = SBendParamsBuilder::default().mode(mode).build().unwrap();
            let comp = SBend::new(params)?.build(&tech)?;
            assert_eq!(comp.pin("pin2").unwrap().loc, Vector::new(20.0, 4.0));
            let devrec = comp.layer_polygons("DevRec").next().unwrap().bbox();
            assert_eq!((devrec.p0.y, devrec.p1.y), (-3_000, 7_000));
            // Longer than the straight-line distance, shorter than the manhattan one
            assert!(comp.length > 20f64.hypot(4.0) && comp.length < 24.0);
        }
        Ok(())
    }
    #[test]
    fn downward_jog() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        let params = SBendParamsBuilder::default().height(-4.0).build().unwrap();
        let comp = SBend::new(params)?.build(&tech)?;
        let devrec = comp.layer_polygons("DevRec").next().unwrap().bbox();
        assert_eq!((devrec.p0.y, devrec.p1.y), (-7_000, 3_000));
        Ok(())
    }
}
