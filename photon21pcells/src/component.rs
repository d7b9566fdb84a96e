//!
//! # Components
//!
//! A [Component] is the pure-data output of a generator: polygons and paths tagged by layer name,
//! pins, and text annotations, all in micrometers.
//! Nothing reaches a layout until [Component::draw] hands it to a [LayoutHost].
//!

// Crates.io
use enum_dispatch::enum_dispatch;

// Local imports
use crate::geom::spiral::LengthDiscrepancy;
use crate::geom::{LayerPolygon, Polyline, Vector};
use crate::host::LayoutHost;
use crate::raw::{LayoutResult, Polygon, TextAlign};
use crate::tech::Technology;

/// Height of pin labels, in micrometers
pub const PIN_TEXT_SIZE: f64 = 0.4;

/// # Text Annotation
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub layer: String,
    pub string: String,
    pub loc: Vector,
    /// Text height, in micrometers
    pub size: f64,
    pub align: TextAlign,
}

/// # Path Shape
/// A constant-width path, inserted as its outline polygon
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub layer: String,
    pub points: Polyline,
    pub width: f64,
}

/// # Component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    pub name: String,
    pub polygons: Vec<LayerPolygon>,
    pub paths: Vec<PathShape>,
    pub pins: Vec<crate::Pin>,
    pub texts: Vec<Text>,
    /// Drawn optical or electrical length, in micrometers
    pub length: f64,
    /// Set when the drawn length could not reach the requested one
    pub discrepancy: Option<LengthDiscrepancy>,
}
impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Add `polygon` on layer `layer`
    pub fn polygon(&mut self, layer: impl Into<String>, polygon: Polygon) {
        self.polygons.push(LayerPolygon {
            layer: layer.into(),
            polygon,
        });
    }
    /// Add each of `polygons` on layer `layer`
    pub fn polygons(&mut self, layer: &str, polygons: impl IntoIterator<Item = Polygon>) {
        for polygon in polygons {
            self.polygon(layer, polygon);
        }
    }
    /// Polygons on layer `layer`
    pub fn layer_polygons<'c>(&'c self, layer: &'c str) -> impl Iterator<Item = &'c Polygon> + 'c {
        self.polygons.iter().filter(move |p| p.layer == layer).map(|p| &p.polygon)
    }
    /// Get our pin named `name`
    pub fn pin(&self, name: &str) -> Option<&crate::Pin> {
        self.pins.iter().find(|p| p.name == name)
    }
    /// Insert everything into `host`.
    /// Pins become a marker path plus a label on their recognition layer.
    pub fn draw<H: LayoutHost>(&self, host: &mut H, pin_length: f64) -> LayoutResult<()> {
        for p in &self.polygons {
            let layer = host.layer_id(&p.layer)?;
            host.insert_polygon(layer, p.polygon.clone())?;
        }
        for p in &self.paths {
            let layer = host.layer_id(&p.layer)?;
            host.insert_path_as_polygon(layer, &p.points, p.width)?;
        }
        for pin in &self.pins {
            let layer = host.layer_id(&pin.layer)?;
            host.insert_path(layer, &pin.marker(pin_length), pin.width)?;
            let label = Text {
                layer: pin.layer.clone(),
                string: pin.name.clone(),
                loc: pin.loc,
                size: PIN_TEXT_SIZE,
                align: TextAlign::Left,
            };
            host.insert_text(layer, &label)?;
        }
        for text in &self.texts {
            let layer = host.layer_id(&text.layer)?;
            host.insert_text(layer, text)?;
        }
        Ok(())
    }
}

/// # Parametric Cell Trait
///
/// Implemented by each component generator.
/// Parameters are validated when the generator is created, so [PCell::build] fails only on
/// geometric or technology-lookup errors.
///
#[enum_dispatch]
pub trait PCell {
    /// Cell name, derived from the parameters
    fn name(&self) -> String;
    /// Build the component's geometry
    fn build(&self, tech: &Technology) -> LayoutResult<Component>;
}
