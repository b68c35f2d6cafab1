//! # Polyzone Renderer
//!
//! Pan/zoom state of the work canvas, ruler labels, and the render
//! primitives a front end draws.
//!
//! Nothing here touches a real drawing surface: frames are plain,
//! JSON-serializable data that any canvas or SVG layer can consume.

pub mod transform;
pub mod grid;
pub mod render_data;

pub use grid::{AxisLabel, GridLabels, OriginLabel};
pub use render_data::{RenderFrame, RenderPolygon, RenderTile};
pub use transform::ViewTransform;
