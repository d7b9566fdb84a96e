//!
//! # Photon21 Raw Layout
//!
//! The database-unit representation layer of photon21.
//! Consists of integer-grid geometric primitives on named layers,
//! collected into per-cell [Layout]s and an exportable [Library].
//!
//! Also home to the shared [LayoutError] type and the markup-format
//! [SerdeFile] utilities used throughout the workspace.
//!

pub mod bbox;
pub mod data;
pub mod error;
pub mod geom;
pub mod ser;

pub use bbox::{BoundBox, BoundBoxTrait};
pub use data::*;
pub use error::{ErrorHelper, LayoutError, LayoutResult};
pub use geom::{Path, Point, Polygon, Rect, Shape, ShapeTrait};
pub use ser::{SerdeFile, SerializationFormat};
