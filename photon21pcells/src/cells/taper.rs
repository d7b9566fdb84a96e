//!
//! # Linear Taper
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::{finish, MODEL_TEXT_SIZE};
use crate::annotate::{ModelInfo, MODEL_LAYER};
use crate::component::{Component, PCell};
use crate::geom::assembly::rect;
use crate::geom::{waveguide_outline, Polyline, Vector, WidthProfile};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// Device-recognition margin beyond the wider end, in micrometers
const DEVREC_MARGIN: f64 = 1.0;

/// # Taper Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct TaperParams {
    pub layer: String,
    /// Width at the west end
    pub w1: f64,
    /// Width at the east end
    pub w2: f64,
    pub length: f64,
}
impl Default for TaperParams {
    fn default() -> Self {
        Self {
            layer: "Si".into(),
            w1: 1.0,
            w2: 2.0,
            length: 20.0,
        }
    }
}
impl ErrorHelper for TaperParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Taper: {}", msg.into()))
    }
}

/// # Taper
///
/// Linear width transition from `w1` at the origin to `w2` at `(length, 0)`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Taper {
    params: TaperParams,
}
impl Taper {
    pub fn new(params: TaperParams) -> LayoutResult<Self> {
        params.assert(params.w1 > 0.0 && params.w2 > 0.0, "widths must be positive")?;
        params.assert(params.length > 0.0, "length must be positive")?;
        Ok(Self { params })
    }
}
impl PCell for Taper {
    fn name(&self) -> String {
        let p = &self.params;
        format!("Taper_{}_{}_L{}", p.w1, p.w2, p.length)
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let TaperParams { w1, w2, length, .. } = self.params;
        let grid = tech.grid();
        let centerline = Polyline::from_xy(&[(0.0, 0.0), (length, 0.0)])?;
        let profile = WidthProfile::Linear { start: w1, end: w2 };

        let mut comp = Component::new(self.name());
        comp.polygon(
            self.params.layer.as_str(),
            waveguide_outline(&centerline, profile, 0.0, true, &grid)?,
        );
        let half = profile.max() / 2.0 + DEVREC_MARGIN;
        comp.polygon(
            MODEL_LAYER,
            rect(Vector::new(0.0, -half), Vector::new(length, half), &grid),
        );
        comp.pins.push(Pin::optical("opt1", Vector::new(0.0, 0.0), PinDir::West, w1));
        comp.pins.push(Pin::optical("opt2", Vector::new(length, 0.0), PinDir::East, w2));

        let info = ModelInfo::new("Design kits/PRL_PDK", "PRL_Taper")
            .length("wg_width1", w1)
            .length("wg_width2", w2)
            .length("wg_length", length);
        comp.texts = info.texts(Vector::new(0.0, half + 3.0 * MODEL_TEXT_SIZE), MODEL_TEXT_SIZE);
        comp.length = length;
        Ok(finish(comp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{BoundBoxTrait, Point, ShapeTrait};

    #[test]
    fn linear_taper() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        let comp = Taper::new(TaperParams::default())?.build(&tech)?;
        let core = comp.layer_polygons("Si").next().unwrap();
        assert_eq!(core.points.len(), 4);
        assert!(core.points.contains(&Point::new(0, 500)));
        assert!(core.points.contains(&Point::new(20_000, -1_000)));
        assert_eq!(core.area(), 30.0 * 1e6);

        let devrec = comp.layer_polygons("DevRec").next().unwrap().bbox();
        assert_eq!((devrec.p0.y, devrec.p1.y), (-2_000, 2_000));
        assert_eq!(comp.pin("opt2").unwrap().width, 2.0);
        Ok(())
    }
    #[test]
    fn rejects_bad_params() {
        let params = TaperParamsBuilder::default().w2(0.0).build().unwrap();
        assert!(matches!(Taper::new(params), Err(LayoutError::Validation(_))));
    }
}
