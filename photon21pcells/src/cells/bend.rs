//!
//! # Circular Bend
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Local imports
use super::{finish, MODEL_TEXT_SIZE};
use crate::annotate::ModelInfo;
use crate::component::{Component, PCell};
use crate::geom::{sample, waveguide_outline, Arc, Vector, WidthProfile};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// Largest bend angle, in degrees
pub const MAX_BEND_ANGLE: f64 = 180.0;

/// # Bend Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct BendParams {
    pub layer: String,
    /// Swept angle in degrees, counter-clockwise. Clamped to [MAX_BEND_ANGLE].
    pub angle: f64,
    /// Centerline radius
    pub radius: f64,
    pub width: f64,
    pub pinrec: String,
    pub devrec: String,
}
impl Default for BendParams {
    fn default() -> Self {
        Self {
            layer: "Si".into(),
            angle: 90.0,
            radius: 10.0,
            width: 0.5,
            pinrec: "PinRec".into(),
            devrec: "DevRec".into(),
        }
    }
}
impl ErrorHelper for BendParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Bend: {}", msg.into()))
    }
}

/// # Bend
///
/// A circular arc starting at the origin heading east,
/// turning left through `angle` about `(0, radius)`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Bend {
    params: BendParams,
}
impl Bend {
    pub fn new(mut params: BendParams) -> LayoutResult<Self> {
        params.assert(params.radius > 0.0, "radius must be positive")?;
        params.assert(params.width > 0.0, "width must be positive")?;
        params.assert(
            params.width < 2.0 * params.radius,
            "width must be less than twice the radius",
        )?;
        params.assert(params.angle > 0.0, "angle must be positive")?;
        if params.angle > MAX_BEND_ANGLE {
            debug!("Bend angle {} clamped to {}", params.angle, MAX_BEND_ANGLE);
            params.angle = MAX_BEND_ANGLE;
        }
        Ok(Self { params })
    }
    pub fn params(&self) -> &BendParams {
        &self.params
    }
    fn arc(&self) -> Arc {
        let p = &self.params;
        Arc::new(Vector::new(0.0, p.radius), p.radius, 270.0, 270.0 + p.angle)
    }
}
impl PCell for Bend {
    fn name(&self) -> String {
        let p = &self.params;
        format!("Bend_R{}_A{}_W{}", p.radius, p.angle, p.width)
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let p = &self.params;
        let grid = tech.grid();
        let arc = self.arc();
        let centerline = sample(&arc, &grid);

        let mut comp = Component::new(self.name());
        comp.polygon(
            p.layer.as_str(),
            waveguide_outline(&centerline, WidthProfile::Constant(p.width), 0.0, false, &grid)?,
        );
        comp.polygon(
            p.devrec.as_str(),
            waveguide_outline(
                &centerline,
                WidthProfile::Constant(3.0 * p.width),
                0.0,
                false,
                &grid,
            )?,
        );

        let end = arc.center + Vector::from_polar(p.radius, arc.stop);
        let pinrec = p.pinrec.as_str();
        let pin1 = Pin::optical("pin1", Vector::new(0.0, 0.0), PinDir::West, p.width);
        comp.pins.push(pin1.on(pinrec));
        let pin2 = Pin::optical("pin2", end, PinDir::from_angle(p.angle), p.width);
        comp.pins.push(pin2.on(pinrec));

        let info = ModelInfo::new("Design kits/PRL_PDK", "PRL_Arc_waveguide")
            .num("theta", p.angle)
            .length("width", p.width)
            .length("radius", p.radius)
            .num("delay compensation", 0.0);
        comp.texts = info.texts(Vector::new(0.0, p.radius / 2.0), MODEL_TEXT_SIZE);
        comp.length = arc.length();
        Ok(finish(comp))
    }
}
