//! # hexspacer
//!
//! Cut geometry for hexagonal battery-pack spacers and nickel strips.
//!
//! Cells sit on an offset-row hex grid. Given the occupied cells of a group,
//! the library works out the outline of a plate that keeps a web of material
//! between every pair of neighbouring cells and rounds every corner:
//!
//! ```text
//! cells ─▶ Group ─▶ triangles ─▶ synthesize ─▶ Shape list ─▶ DrawingSink
//!                    (classify)   (fillets)      (Line/Arc)    (DXF, SVG)
//! ```
//!
//! [`LayerCompositor`] strings several groups together into a stacked pack
//! and nests the layers onto one sheet.
//!
//! ## Rust Lesson #7: Modules
//!
//! Each stage lives in its own module and only the types a caller needs are
//! re-exported here. `pub(crate)` keeps helpers shared between stages out of
//! the public API.

pub mod compose;
pub mod config;
pub mod dxf;
pub mod error;
pub mod geometry;
pub mod group;
pub mod hex;
pub mod reference;
pub mod shape;
pub mod svg;
pub mod synth;
pub mod triangle;

// Re-export common types at crate root for convenience.
pub use compose::{LayerCompositor, PlacedLayer, compose_stack};
pub use config::{DilatationConfig, PlateConfig};
pub use dxf::DxfWriter;
pub use error::{Error, Result};
pub use geometry::{BoundingBox, DegenerateVector, Vector};
pub use group::Group;
pub use hex::{GridCoord, HexLayout, Node};
pub use shape::{Drawing, DrawingLayer, DrawingSink, PersistentSink, Shape};
pub use svg::SvgWriter;
pub use synth::{Connection, GroupOutline, OutlineStats, synthesize};
pub use triangle::{Triangle, TriangleClass};
