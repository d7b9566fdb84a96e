//!
//! # Raw Layout Data Model
//!
//! Defines the primary structures for representation of "raw" geometry-based photonic layout,
//! including [Library], [Layout], [Element], and the [Layers] manager.
//!

// Std-Lib
use std::collections::HashMap;

// Crates.io
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

// Local Imports
use crate::{
    bbox::{BoundBox, BoundBoxTrait},
    error::{LayoutError, LayoutResult},
    geom::{Point, Shape},
    ser::SerdeFile,
};

/// # Location Integer Type-Alias
///
/// Used for all layout spatial coordinates.
/// Designed for quickly swapping to other integer types, if we so desire.
///
pub type Int = isize;

// Create key-types for each internal type stored in [SlotMap]s
new_key_type! {
    /// Keys for [Layer] entries
    pub struct LayerKey;
}

/// Distance Units Enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Units {
    /// Micrometers, or microns for we olde folke
    Micro,
    /// Nanometers
    Nano,
    /// Angstroms
    Angstrom,
    /// Picometers
    Pico,
}
impl Default for Units {
    /// Default units are nanometers, i.e. a 0.001um database unit
    fn default() -> Units {
        Units::Nano
    }
}
impl Units {
    /// Size of one database unit, in microns
    pub fn microns(&self) -> f64 {
        match self {
            Units::Micro => 1.0,
            Units::Nano => 1e-3,
            Units::Angstrom => 1e-4,
            Units::Pico => 1e-6,
        }
    }
    /// Find the [Units] whose database unit is `dbu` microns
    pub fn from_dbu(dbu: f64) -> LayoutResult<Self> {
        for units in [Units::Micro, Units::Nano, Units::Angstrom, Units::Pico] {
            if ((units.microns() - dbu) / dbu).abs() < 1e-9 {
                return Ok(units);
            }
        }
        LayoutError::fail(format!("Unsupported database unit {}um", dbu))
    }
}

/// # Layer Set & Manager
///
/// Keep track of active layers, and index them by name.
/// Serialized as a flat list of [Layer]s; the indices are rebuilt on load.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Layer>", from = "Vec<Layer>")]
pub struct Layers {
    slots: SlotMap<LayerKey, Layer>,
    names: HashMap<String, LayerKey>,
}
impl Layers {
    /// Add a [Layer] to our slot-map and name-map.
    /// Names must be unique. Several named layers may share a layer number, differing in datatype.
    pub fn add(&mut self, layer: Layer) -> LayoutResult<LayerKey> {
        if self.names.contains_key(&layer.name) {
            return LayoutError::fail(format!("Duplicate layer name {}", layer.name));
        }
        let name = layer.name.clone();
        let key = self.slots.insert(layer);
        self.names.insert(name, key);
        Ok(key)
    }
    /// Get the [LayerKey] for layer-name `name`
    pub fn keyname(&self, name: &str) -> Option<LayerKey> {
        self.names.get(name).copied()
    }
    /// Get a reference to [Layer] name `name`
    pub fn name(&self, name: &str) -> Option<&Layer> {
        let key = self.names.get(name)?;
        self.slots.get(*key)
    }
    /// Get a reference to [Layer] from [LayerKey] `key`
    pub fn get(&self, key: LayerKey) -> Option<&Layer> {
        self.slots.get(key)
    }
    /// Number of [Layer]s defined
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    /// Boolean indication of whether no [Layer]s are defined
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
impl From<Layers> for Vec<Layer> {
    fn from(layers: Layers) -> Self {
        // Slot order is insertion order, so reloading reproduces the same [LayerKey]s
        layers.slots.into_iter().map(|(_, l)| l).collect()
    }
}
impl From<Vec<Layer>> for Layers {
    fn from(list: Vec<Layer>) -> Self {
        let mut layers = Layers::default();
        for layer in list {
            // Duplicates cannot be produced by [Layers::add], and are dropped on load
            let _ = layers.add(layer);
        }
        layers
    }
}

/// Layer-Purpose Enumeration
/// Includes the common use-cases for each shape,
/// and an "escape hatch" for numbered datatypes without first-class support.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LayerPurpose {
    // First-class enumerated purposes
    Drawing,
    Pin,
    Label,
    /// Device-recognition outline
    Outline,
    /// Other purpose, not first-class supported
    Other(i16),
}
/// # Per-Layer Datatype Specification
/// Includes the datatypes used for each category of element on layer `layernum`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Layer {
    /// Layer Number
    pub layernum: i16,
    /// Layer Name
    pub name: String,
    /// Datatype-Purpose pairs
    #[serde(default)]
    purposes: Vec<Datatype>,
}
/// # Datatype-number and [LayerPurpose] Pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Datatype {
    pub num: i16,
    pub purpose: LayerPurpose,
}
impl Layer {
    /// Create a new [Layer] with the given `layernum` and `name`
    pub fn new(layernum: i16, name: impl Into<String>) -> Self {
        Self {
            layernum,
            name: name.into(),
            ..Default::default()
        }
    }
    /// Add purpose-numbers `pairs`. Consumes and returns `self` for chainability.
    pub fn add_pairs(mut self, pairs: &[(i16, LayerPurpose)]) -> LayoutResult<Self> {
        for (num, purpose) in pairs {
            self.add_purpose(*num, purpose.clone())?;
        }
        Ok(self)
    }
    fn add_purpose(&mut self, num: i16, purp: LayerPurpose) -> LayoutResult<()> {
        // If we get a numbered purpose, make sure its id matches `num`.
        if let LayerPurpose::Other(k) = purp {
            if k != num {
                LayoutError::fail("Invalid LayerPurpose")?;
            }
        }
        if self.purpose(num).is_some() || self.num(&purp).is_some() {
            return LayoutError::fail(format!(
                "Duplicate purpose {:?}/{} on layer {}",
                purp, num, self.name
            ));
        }
        self.purposes.push(Datatype { num, purpose: purp });
        Ok(())
    }
    /// Retrieve purpose-number `num`
    pub fn purpose(&self, num: i16) -> Option<&LayerPurpose> {
        self.purposes
            .iter()
            .find(|d| d.num == num)
            .map(|d| &d.purpose)
    }
    /// Retrieve the purpose-number for this layer and [LayerPurpose] `purpose`
    pub fn num(&self, purpose: &LayerPurpose) -> Option<i16> {
        self.purposes
            .iter()
            .find(|d| &d.purpose == purpose)
            .map(|d| d.num)
    }
    /// All datatype-purpose pairs, in insertion order
    pub fn purposes(&self) -> &[Datatype] {
        &self.purposes
    }
}

/// # Raw Layout Library
/// A collection of generated cells, and the layers they are drawn on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    /// Library Name
    pub name: String,
    /// Distance Units
    pub units: Units,
    /// Layer Definitions
    pub layers: Layers,
    /// Cell Layouts
    pub cells: Vec<Layout>,
}
impl Library {
    /// Create a new and empty Library
    pub fn new(name: impl Into<String>, units: Units) -> Self {
        Self {
            name: name.into(),
            units,
            ..Default::default()
        }
    }
    /// Get a reference to the [Layout] named `name`
    pub fn cell(&self, name: &str) -> Option<&Layout> {
        self.cells.iter().find(|c| c.name == name)
    }
}
impl SerdeFile for Library {}

/// # Raw-Layout Implementation
///
/// The geometric-level layout-definition of a generated cell.
/// Comprised of geometric [Element]s and text annotations.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Cell Name
    pub name: String,
    /// Primitive/ Geometric Elements
    pub elems: Vec<Element>,
    /// Text Annotations
    pub annotations: Vec<TextElement>,
}
impl Layout {
    /// Create a new and empty [Layout] named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
impl BoundBoxTrait for Layout {
    fn bbox(&self) -> BoundBox {
        let mut bbox = BoundBox::empty();
        for elem in &self.elems {
            bbox = elem.inner.union(&bbox);
        }
        bbox
    }
}

/// # Text Annotation
///
/// Note [Layout]s include text-valued annotations,
/// generally used for pin names and simulation-model metadata.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextElement {
    /// String Value
    pub string: String,
    /// Text height, in database units. Defaults to the viewer's choice if [None].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Int>,
    /// Location
    pub loc: Point,
    /// Horizontal alignment about `loc`
    #[serde(default)]
    pub align: TextAlign,
    /// Layer
    pub layer: LayerKey,
}
/// Horizontal Text Alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

///
/// # Primitive Geometric Element
///
/// Primary unit of [Layout] definition.
/// Combines a geometric [Shape] with a z-axis [Layer],
/// and optional net connectivity annotation.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    /// Net Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
    /// Purpose
    pub purpose: LayerPurpose,
    /// Layer (Reference)
    pub layer: LayerKey,
    /// Shape
    pub inner: Shape,
}
