//!
//! # Component Generators
//!
//! One module per generator.
//! Each pairs a serde-deserializable, builder-constructible parameter struct
//! with a validated generator implementing [PCell].
//!

// Crates.io
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

// Local imports
use crate::component::{Component, PCell};
use crate::raw::{LayoutError, LayoutResult, SerdeFile, SerializationFormat};
use crate::tech::{Technology, WaveguideType};

pub mod bend;
pub mod mmi;
pub mod ring;
pub mod sbend;
pub mod spiral;
pub mod taper;
pub mod waveguide;
pub mod wireguide;

pub use bend::{Bend, BendParams, BendParamsBuilder};
pub use mmi::{Mmi, MmiParams, MmiParamsBuilder};
pub use ring::{Ring, RingParams, RingParamsBuilder};
pub use sbend::{SBend, SBendParams, SBendParamsBuilder};
pub use spiral::{Spiral, SpiralParams, SpiralParamsBuilder};
pub use taper::{Taper, TaperParams, TaperParamsBuilder};
pub use waveguide::{Waveguide, WaveguideParams, WaveguideParamsBuilder};
pub use wireguide::{Wireguide, WireguideParams, WireguideParamsBuilder};

/// Height of compact-model annotation text, in micrometers
pub const MODEL_TEXT_SIZE: f64 = 0.5;

/// # Generator
///
/// Any one of our validated generators.
///
#[enum_dispatch(PCell)]
#[derive(Debug, Clone)]
pub enum Generator {
    Bend(Bend),
    Ring(Ring),
    Taper(Taper),
    SBend(SBend),
    Spiral(Spiral),
    Mmi(Mmi),
    Waveguide(Waveguide),
    Wireguide(Wireguide),
}

/// # Cell Parameters
///
/// Parameters for any generator, tagged by a `cell` field naming it, e.g.
///
/// ```yaml
/// cell: ring
/// radius: 10
/// use_heater: true
/// ```
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum CellParams {
    Bend(BendParams),
    Ring(RingParams),
    Taper(TaperParams),
    #[serde(rename = "sbend")]
    SBend(SBendParams),
    Spiral(SpiralParams),
    Mmi(MmiParams),
    Waveguide(WaveguideParams),
    Wireguide(WireguideParams),
}
impl SerdeFile for CellParams {}
impl CellParams {
    /// Load from file `fname`, in the format implied by its extension
    pub fn load(fname: impl AsRef<std::path::Path>) -> LayoutResult<Self> {
        let fname = fname.as_ref();
        let fmt = match SerializationFormat::from_path(fname) {
            Some(f) => f,
            None => {
                return Err(LayoutError::Validation(format!(
                    "Cannot infer parameter-file format from {:?}",
                    fname
                )))
            }
        };
        Ok(Self::open(fname, fmt)?)
    }
    /// Validate, converting into a [Generator]
    pub fn generator(self) -> LayoutResult<Generator> {
        Ok(match self {
            Self::Bend(p) => Bend::new(p)?.into(),
            Self::Ring(p) => Ring::new(p)?.into(),
            Self::Taper(p) => Taper::new(p)?.into(),
            Self::SBend(p) => SBend::new(p)?.into(),
            Self::Spiral(p) => Spiral::new(p)?.into(),
            Self::Mmi(p) => Mmi::new(p)?.into(),
            Self::Waveguide(p) => Waveguide::new(p)?.into(),
            Self::Wireguide(p) => Wireguide::new(p)?.into(),
        })
    }
}

/// Log completion of `component`, passing it through
pub(crate) fn finish(component: Component) -> Component {
    tracing::info!(
        "Built {}: {} polygons, {} pins, length {:.3}",
        component.name,
        component.polygons.len() + component.paths.len(),
        component.pins.len(),
        component.length
    );
    component
}

/// Waveguide type `name` in `tech`, or its default type if `None`
pub(crate) fn waveguide_type<'t>(
    tech: &'t Technology,
    name: Option<&str>,
) -> LayoutResult<&'t WaveguideType> {
    match name {
        Some(name) => tech.waveguide(name),
        None => tech.default_waveguide(),
    }
}

/// Build the component described by `params` in `tech`
pub fn build(params: CellParams, tech: &Technology) -> LayoutResult<Component> {
    params.generator()?.build(tech)
}
