//!
//! # Photon21 Parametric Cells
//!
//! Photonic component generators, drawn through the [geom] construction engine.
//!
//! Each generator is created from a parameter struct, validated once at creation,
//! and builds a pure-data [Component] against a [Technology].
//! Components reach a layout only through a [LayoutHost], of which [RawHost] writes
//! into the [raw] data model.
//!
//! ```text
//! CellParams --generator()--> Generator --build(tech)--> Component --draw(host)--> Layout
//! ```
//!

pub use photon21geom as geom;
pub use photon21raw as raw;

pub mod tech;
pub mod pin;
pub mod annotate;
pub mod component;
pub mod host;
pub mod cells;

pub use cells::{CellParams, Generator};
pub use component::{Component, PCell, PathShape, Text};
pub use host::{generate, LayoutHost, RawHost};
pub use pin::{Pin, PinDir, PinKind};
pub use tech::{LayerDef, Technology, WaveguideType};

#[cfg(test)]
mod tests;
