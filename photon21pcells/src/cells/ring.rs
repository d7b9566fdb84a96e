//!
//! # Ring Resonator
//!
//! An all-pass or add-drop ring: a through-bus, an optional drop-bus, and an optional metal heater.
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::{finish, MODEL_TEXT_SIZE};
use crate::annotate::{ModelInfo, MODEL_LAYER};
use crate::component::{Component, PCell};
use crate::geom::ring::{HEATER_PAD_WIDTH, RING_CLEARANCE};
use crate::geom::{build_heater, build_ring_annulus, HeaterEnds, RingSpec, Vector};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// # Ring Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct RingParams {
    pub layer: String,
    pub width_bus: f64,
    pub width_ring: f64,
    /// Ring centerline radius
    pub radius: f64,
    pub gap: f64,
    pub use_drop: bool,
    pub gap_drop: f64,
    pub use_heater: bool,
    pub layer_heater: String,
    pub width_heater: f64,
    pub heater_ends: HeaterEnds,
    /// Device-recognition clearance around ring and buses
    pub clearance: f64,
    /// Annotate with the generic ring compact model.
    /// Otherwise its component and parameters are `NA`.
    pub compact_model: bool,
    /// Compact-model propagation loss, dB/m
    pub loss: f64,
    /// Compact-model effective index
    pub neff: f64,
    /// Compact-model group index
    pub ng: f64,
    /// Compact-model dispersion, ps/nm/km
    pub dispersion: f64,
}
impl Default for RingParams {
    fn default() -> Self {
        Self {
            layer: "Si".into(),
            width_bus: 1.0,
            width_ring: 1.0,
            radius: 50.0,
            gap: 0.3,
            use_drop: true,
            gap_drop: 0.3,
            use_heater: false,
            layer_heater: "M1_heater".into(),
            width_heater: 3.0,
            heater_ends: HeaterEnds::Round,
            clearance: RING_CLEARANCE,
            compact_model: true,
            loss: 11.262,
            neff: 2.253075,
            ng: 2.635705,
            dispersion: 400.0,
        }
    }
}
impl ErrorHelper for RingParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Ring: {}", msg.into()))
    }
}
impl RingParams {
    fn spec(&self) -> RingSpec {
        RingSpec {
            gap_drop: self.gap_drop,
            clearance: self.clearance,
            ..RingSpec::new(self.radius, self.width_ring, self.width_bus, self.gap, self.use_drop)
        }
    }
}

/// # Ring
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    params: RingParams,
}
impl Ring {
    pub fn new(params: RingParams) -> LayoutResult<Self> {
        let p = &params;
        p.assert(p.width_bus > 0.0 && p.width_ring > 0.0, "waveguide widths must be positive")?;
        p.assert(p.radius > p.width_ring / 2.0, "radius must exceed half the ring width")?;
        p.assert(p.gap >= 0.0 && p.gap_drop >= 0.0, "gaps must be non-negative")?;
        p.assert(p.clearance > 0.0, "clearance must be positive")?;
        if p.use_heater {
            p.assert(
                p.width_heater > 0.0 && p.width_heater / 2.0 < p.radius,
                "heater must be narrower than the ring's diameter",
            )?;
        }
        Ok(Self { params })
    }
}
impl PCell for Ring {
    fn name(&self) -> String {
        let p = &self.params;
        let kind = if p.use_drop { "AddDrop" } else { "AllPass" };
        format!("Ring{}_R{}_G{}", kind, p.radius, p.gap)
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let p = &self.params;
        let grid = tech.grid();
        let geo = build_ring_annulus(&p.spec(), &grid)?;
        let len = geo.bus_length;

        let mut comp = Component::new(self.name());
        comp.polygon(p.layer.as_str(), geo.ring);
        comp.polygons(&p.layer, geo.bus);
        comp.polygons(MODEL_LAYER, geo.devrec);

        let w = p.width_bus;
        comp.pins.push(Pin::optical("opt1", Vector::new(0.0, 0.0), PinDir::West, w));
        comp.pins.push(Pin::optical("opt2", Vector::new(len, 0.0), PinDir::East, w));
        if let Some(y) = geo.drop_y {
            comp.pins.push(Pin::optical("opt3", Vector::new(0.0, y), PinDir::West, w));
            comp.pins.push(Pin::optical("opt4", Vector::new(len, y), PinDir::East, w));
        }

        if p.use_heater {
            let heater =
                build_heater(geo.center, p.radius, p.width_heater, p.heater_ends, &grid)?;
            comp.polygons(&p.layer_heater, heater.polygons);
            let [right, left] = heater.pads;
            comp.pins.push(Pin::electrical("ele1", left, PinDir::South, HEATER_PAD_WIDTH));
            comp.pins.push(Pin::electrical("ele2", right, PinDir::South, HEATER_PAD_WIDTH));
        }

        let mut info = ModelInfo::new("Modulators/Optical", "Optical Ring Modulator")
            .length("length", 2.0 * std::f64::consts::PI * p.radius)
            .num("loss", p.loss)
            .num("effective index", p.neff)
            .num("group index", p.ng)
            .num("dispersion", p.dispersion);
        if !p.compact_model {
            info = info.unavailable();
        }
        comp.texts = info.texts(geo.center, MODEL_TEXT_SIZE);
        comp.length = 2.0 * std::f64::consts::PI * p.radius;
        Ok(finish(comp))
    }
}
