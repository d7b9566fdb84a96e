//!
//! # Layout Host Adapter
//!
//! The narrow interface through which components reach a layout:
//! layer lookup by name, and polygon, path, and text insertion.
//! [RawHost] implements it over a [raw::Layout](crate::raw::Layout).
//!

// Crates.io
use tracing::debug;

// Local imports
use crate::component::{Component, PCell, Text};
use crate::geom::{path_polygon, Grid, Polyline, Vector};
use crate::raw::{
    self, Element, LayerKey, LayerPurpose, Layers, Layout, LayoutError, LayoutResult, Library,
};
use crate::tech::Technology;

/// # Layout Host
pub trait LayoutHost {
    /// Host-side layer handle
    type Layer: Copy;
    /// Look up layer `name`
    fn layer_id(&self, name: &str) -> LayoutResult<Self::Layer>;
    /// The grid on which inserted geometry is quantized
    fn grid(&self) -> &Grid;
    fn insert_polygon(&mut self, layer: Self::Layer, polygon: raw::Polygon) -> LayoutResult<()>;
    /// Insert a zero-area path through `points` of `width`, e.g. a pin marker
    fn insert_path(
        &mut self,
        layer: Self::Layer,
        points: &[Vector],
        width: f64,
    ) -> LayoutResult<()>;
    fn insert_text(&mut self, layer: Self::Layer, text: &Text) -> LayoutResult<()>;
    /// Insert the outline polygon of a flush-ended path of `width` along `points`
    fn insert_path_as_polygon(
        &mut self,
        layer: Self::Layer,
        points: &Polyline,
        width: f64,
    ) -> LayoutResult<()> {
        let polygon = path_polygon(points, width, self.grid())?;
        self.insert_polygon(layer, polygon)
    }
}

/// # Raw Layout Host
///
/// Collects inserted geometry into a [Layout], against a read-only [Layers] table.
///
#[derive(Debug)]
pub struct RawHost<'l> {
    layers: &'l Layers,
    grid: Grid,
    layout: Layout,
}
impl<'l> RawHost<'l> {
    pub fn new(name: impl Into<String>, layers: &'l Layers, grid: Grid) -> Self {
        Self {
            layers,
            grid,
            layout: Layout::new(name),
        }
    }
    /// Consume ourselves, returning the collected [Layout]
    pub fn into_layout(self) -> Layout {
        self.layout
    }
    /// Purpose of the first datatype on `layer`
    fn purpose(&self, layer: LayerKey) -> LayerPurpose {
        self.layers
            .get(layer)
            .and_then(|l| l.purposes().first())
            .map(|d| d.purpose.clone())
            .unwrap_or(LayerPurpose::Drawing)
    }
    fn push(&mut self, layer: LayerKey, inner: raw::Shape) {
        let purpose = self.purpose(layer);
        self.layout.elems.push(Element {
            net: None,
            purpose,
            layer,
            inner,
        });
    }
}
impl LayoutHost for RawHost<'_> {
    type Layer = LayerKey;
    fn layer_id(&self, name: &str) -> LayoutResult<LayerKey> {
        self.layers
            .keyname(name)
            .ok_or_else(|| LayoutError::lookup(format!("Layer `{}` not defined", name)))
    }
    fn grid(&self) -> &Grid {
        &self.grid
    }
    fn insert_polygon(&mut self, layer: LayerKey, polygon: raw::Polygon) -> LayoutResult<()> {
        if polygon.points.len() < 3 {
            return Err(LayoutError::degenerate(format!(
                "Polygon of {} points on layer {:?}",
                polygon.points.len(),
                layer
            )));
        }
        self.push(layer, raw::Shape::Polygon(polygon));
        Ok(())
    }
    fn insert_path(&mut self, layer: LayerKey, points: &[Vector], width: f64) -> LayoutResult<()> {
        let points = points.iter().map(|p| self.grid.point(p)).collect();
        let width = usize::try_from(self.grid.to_db(width))?;
        self.push(layer, raw::Shape::Path(raw::Path::new(points, width)));
        Ok(())
    }
    fn insert_text(&mut self, layer: LayerKey, text: &Text) -> LayoutResult<()> {
        self.layout.annotations.push(raw::TextElement {
            string: text.string.clone(),
            height: Some(self.grid.to_db(text.size)),
            loc: self.grid.point(&text.loc),
            align: text.align,
            layer,
        });
        Ok(())
    }
}

/// Build `cell` in technology `tech` and draw it into a new single-cell [Library]
pub fn generate(tech: &Technology, cell: &impl PCell) -> LayoutResult<(Library, Component)> {
    let component = cell.build(tech)?;
    let mut lib = tech.library(component.name.clone())?;
    let mut host = RawHost::new(component.name.clone(), &lib.layers, tech.grid());
    component.draw(&mut host, tech.pin_length)?;
    let layout = host.into_layout();
    debug!(
        "Drew {} with {} elements and {} annotations",
        layout.name,
        layout.elems.len(),
        layout.annotations.len()
    );
    lib.cells.push(layout);
    Ok((lib, component))
}
