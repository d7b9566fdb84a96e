//!
//! # Technology Table
//!
//! Read-only description of a photonic process: its grid, its named layers,
//! and its waveguide types. Loaded from a markup file and passed explicitly to every generator.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::geom::{Grid, WaveguideStack};
use crate::raw::{
    Layer, LayerPurpose, Layers, LayoutError, LayoutResult, Library, SerdeFile, SerializationFormat,
    Units,
};

/// Names of the layers every technology must define
pub const REQUIRED_LAYERS: [&str; 3] = ["PinRec", "PinRecM", "DevRec"];

/// Built-in technology definition
const DEFAULT_TECH: &str = include_str!("../resources/tech.yaml");

/// # Technology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    /// Database unit, in micrometers
    pub dbu: f64,
    /// Length of pin marker paths, in micrometers
    #[serde(default = "default_pin_length")]
    pub pin_length: f64,
    pub layers: Vec<LayerDef>,
    #[serde(default)]
    pub waveguides: Vec<WaveguideType>,
}
fn default_pin_length() -> f64 {
    0.1
}
impl SerdeFile for Technology {}

/// # Layer Definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDef {
    pub name: String,
    pub num: i16,
    #[serde(default)]
    pub datatype: i16,
    pub purpose: LayerPurpose,
}

/// # Waveguide Type
///
/// A named cross-section: its minimum bend radius, and the layer stack drawn along its centerline.
/// The first component is the core.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveguideType {
    pub name: String,
    pub radius: f64,
    pub components: Vec<crate::geom::LayerSpec>,
    /// Compact-model component name
    #[serde(default)]
    pub model: String,
    /// Compact-model library
    #[serde(default)]
    pub library: String,
}
impl WaveguideType {
    /// Width of the core component
    pub fn width(&self) -> LayoutResult<f64> {
        match self.components.first() {
            Some(c) => Ok(c.width),
            None => Err(LayoutError::Validation(format!(
                "Waveguide type `{}` has no components",
                self.name
            ))),
        }
    }
    /// Layer name of the core component
    pub fn core_layer(&self) -> LayoutResult<&str> {
        match self.components.first() {
            Some(c) => Ok(&c.layer),
            None => Err(LayoutError::Validation(format!(
                "Waveguide type `{}` has no components",
                self.name
            ))),
        }
    }
    pub fn stack(&self) -> WaveguideStack {
        WaveguideStack::new(self.components.clone())
    }
}

impl Technology {
    /// The built-in technology
    pub fn builtin() -> LayoutResult<Self> {
        let tech: Self = SerializationFormat::Yaml.from_str(DEFAULT_TECH)?;
        tech.validate()?;
        Ok(tech)
    }
    /// Load and validate a technology file, in the format implied by its extension
    pub fn load(fname: impl AsRef<std::path::Path>) -> LayoutResult<Self> {
        let fname = fname.as_ref();
        let fmt = match SerializationFormat::from_path(fname) {
            Some(f) => f,
            None => {
                return Err(LayoutError::Validation(format!(
                    "Cannot infer technology-file format from {:?}",
                    fname
                )))
            }
        };
        let tech = Self::open(fname, fmt)?;
        tech.validate()?;
        Ok(tech)
    }
    /// Check the layer table is self-consistent and defines every required layer,
    /// and that every waveguide type refers only to defined layers.
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.dbu > 0.0) {
            return Err(LayoutError::Validation(format!(
                "Technology `{}` has non-positive database unit {}",
                self.name, self.dbu
            )));
        }
        for name in REQUIRED_LAYERS {
            self.layer(name)?;
        }
        for wg in &self.waveguides {
            wg.width()?;
            for c in &wg.components {
                self.layer(&c.layer)?;
            }
        }
        // Building the raw table catches duplicate names
        self.raw_layers()?;
        Ok(())
    }
    pub fn grid(&self) -> Grid {
        Grid::new(self.dbu)
    }
    /// Look up layer `name`.
    /// Fails with [LayoutError::Lookup] if it is not defined.
    pub fn layer(&self, name: &str) -> LayoutResult<&LayerDef> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| {
                LayoutError::lookup(format!("Layer `{}` not in technology `{}`", name, self.name))
            })
    }
    /// Look up waveguide type `name`.
    /// Fails with [LayoutError::Lookup] if it is not defined.
    pub fn waveguide(&self, name: &str) -> LayoutResult<&WaveguideType> {
        self.waveguides.iter().find(|w| w.name == name).ok_or_else(|| {
            LayoutError::lookup(format!(
                "Waveguide type `{}` not in technology `{}`",
                name, self.name
            ))
        })
    }
    /// The first waveguide type, used where parameters leave it unspecified
    pub fn default_waveguide(&self) -> LayoutResult<&WaveguideType> {
        self.waveguides
            .first()
            .ok_or_else(|| {
                LayoutError::lookup(format!("Technology `{}` has no waveguide types", self.name))
            })
    }
    /// Convert our layer definitions into a raw [Layers] table
    pub fn raw_layers(&self) -> LayoutResult<Layers> {
        let mut layers = Layers::default();
        for def in &self.layers {
            let layer = Layer::new(def.num, def.name.clone())
                .add_pairs(&[(def.datatype, def.purpose.clone())])?;
            layers.add(layer)?;
        }
        Ok(layers)
    }
    /// Create an empty [Library] on our grid and layers
    pub fn library(&self, name: impl Into<String>) -> LayoutResult<Library> {
        let mut lib = Library::new(name, Units::from_dbu(self.dbu)?);
        lib.layers = self.raw_layers()?;
        Ok(lib)
    }
}
