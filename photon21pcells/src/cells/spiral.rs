//!
//! # Double Spiral
//!
//! A delay line of requested length, wound as two interleaved Archimedean spirals
//! joined at the center by an S-shaped pair of half circles.
//!

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Local imports
use super::{finish, waveguide_type, MODEL_TEXT_SIZE};
use crate::annotate::ModelInfo;
use crate::component::{Component, PCell};
use crate::geom::{build_spiral, BuildOptions, Vector};
use crate::pin::{Pin, PinDir};
use crate::raw::{ErrorHelper, LayoutError, LayoutResult};
use crate::tech::Technology;

/// # Spiral Parameters
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), default)]
#[serde(default)]
pub struct SpiralParams {
    /// Waveguide type name. Defaults to the technology's first.
    pub waveguide_type: Option<String>,
    /// Requested centerline length
    pub length: f64,
    /// Clear spacing between neighboring waveguides
    pub wg_spacing: f64,
    /// Place both ports on the same side of the spiral
    pub ports_same_side: bool,
}
impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            waveguide_type: None,
            length: 3000.0,
            wg_spacing: 10.0,
            ports_same_side: false,
        }
    }
}
impl ErrorHelper for SpiralParams {
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Validation(format!("Spiral: {}", msg.into()))
    }
}

/// # Spiral
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    params: SpiralParams,
}
impl Spiral {
    pub fn new(params: SpiralParams) -> LayoutResult<Self> {
        params.assert(params.length > 0.0, "length must be positive")?;
        params.assert(params.wg_spacing >= 0.0, "waveguide spacing must be non-negative")?;
        Ok(Self { params })
    }
}
impl PCell for Spiral {
    fn name(&self) -> String {
        let p = &self.params;
        format!("Spiral_L{}_S{}", p.length, p.wg_spacing)
    }
    fn build(&self, tech: &Technology) -> LayoutResult<Component> {
        let p = &self.params;
        let grid = tech.grid();
        let wg = waveguide_type(tech, p.waveguide_type.as_deref())?;
        let width = wg.width()?;
        let spacing = p.wg_spacing + width;
        debug!("Spiral of type `{}`: spacing {}, minimum radius {}", wg.name, spacing, wg.radius);

        let geo = build_spiral(p.length, wg.radius, spacing, p.ports_same_side, &grid)?;
        let options = BuildOptions {
            square_ends: true,
            corner: None,
            grid,
        };

        let mut comp = Component::new(self.name());
        comp.polygons = wg.stack().build(&geo.centerline, &options)?;

        let line = &geo.centerline;
        let (first, last) = match (line.first(), line.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return p.fail("empty spiral centerline"),
        };
        let start = PinDir::from_vector(&-line.start_direction()?);
        let end = PinDir::from_vector(&line.end_direction()?);
        comp.pins.push(Pin::optical("pin1", first, start, width));
        comp.pins.push(Pin::optical("pin2", last, end, width));

        let info = ModelInfo::new(wg.library.as_str(), wg.model.as_str())
            .length("wg_length", geo.actual_length)
            .length("wg_width", width)
            .length("min_radius", geo.params.radius);
        comp.texts = info.texts(Vector::new(-geo.params.radius, 0.0), MODEL_TEXT_SIZE);
        comp.length = geo.actual_length;
        comp.discrepancy = geo.discrepancy;
        Ok(finish(comp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn opposite_ports() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        let comp = Spiral::new(SpiralParams::default())?.build(&tech)?;
        assert_relative_eq!(comp.length, 3000.0, max_relative = 1e-2);
        assert!(comp.discrepancy.is_none());
        let (pin1, pin2) = (comp.pin("pin1").unwrap(), comp.pin("pin2").unwrap());
        assert_eq!(pin1.dir, PinDir::North);
        assert_eq!(pin2.dir, PinDir::South);
        assert!(pin1.loc.x > 0.0 && pin2.loc.x < 0.0);
        // One polygon per layer of the waveguide type
        assert_eq!(comp.polygons.len(), 2);
        assert_eq!(comp.layer_polygons("DevRec").count(), 1);
        Ok(())
    }
    #[test]
    fn same_side_ports() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        let params = SpiralParamsBuilder::default().ports_same_side(true).build().unwrap();
        let comp = Spiral::new(params)?.build(&tech)?;
        let (pin1, pin2) = (comp.pin("pin1").unwrap(), comp.pin("pin2").unwrap());
        assert_eq!(pin2.dir, PinDir::North);
        assert!(pin1.loc.x > 0.0 && pin2.loc.x > 0.0);
        Ok(())
    }
    #[test]
    fn short_target_reports_discrepancy() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        let params = SpiralParamsBuilder::default().length(50.0).build().unwrap();
        let comp = Spiral::new(params)?.build(&tech)?;
        let disc = comp.discrepancy.unwrap();
        assert_eq!(disc.requested, 50.0);
        assert!(comp.length > 50.0);
        Ok(())
    }
    #[test]
    fn named_waveguide_type() -> LayoutResult<()> {
        let tech = Technology::builtin()?;
        let params = SpiralParamsBuilder::default()
            .waveguide_type(Some("Rib TE 1550 nm, w=1000 nm".to_string()))
            .build()
            .unwrap();
        let comp = Spiral::new(params)?.build(&tech)?;
        assert_eq!(comp.polygons.len(), 3);
        assert!(comp.texts[2].string.contains("min_radius="));

        let params = SpiralParamsBuilder::default()
            .waveguide_type(Some("Nope".to_string()))
            .build()
            .unwrap();
        assert!(matches!(Spiral::new(params)?.build(&tech), Err(LayoutError::Lookup(_))));
        Ok(())
    }
}
