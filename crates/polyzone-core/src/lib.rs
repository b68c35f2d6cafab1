//! # Polyzone Core
//!
//! Polygon descriptors, fill palettes, seedable random generation, and the
//! buffer/work collections that polygons move between.
//!
//! Everything here is UI-agnostic; rendering and input live in
//! `polyzone-renderer` and `polyzone-dragdrop`.

pub mod geometry;
pub mod color;
pub mod generator;
pub mod board;

pub use board::{Board, Placement};
pub use color::{Color, ColorMode, Palette};
pub use generator::PolygonGenerator;
pub use geometry::{Point, PolygonDescriptor, PolygonId};
