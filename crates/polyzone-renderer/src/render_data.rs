use polyzone_core::{Board, Point, PolygonDescriptor, PolygonId};
use serde::{Deserialize, Serialize};

use crate::grid::GridLabels;
use crate::transform::ViewTransform;

/// Side length of the square tile a polygon is drawn in, in logical units.
pub const TILE_SIZE: f64 = 100.0;
/// Opacity of a buffer tile while it is being dragged.
pub const DRAGGING_OPACITY: f32 = 0.5;

/// A buffer polygon, drawn untransformed inside its own `TILE_SIZE` tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTile {
    pub id: PolygonId,
    /// SVG `points` attribute in tile coordinates.
    pub points: String,
    pub fill: String,
    pub opacity: f32,
}

/// A work-canvas polygon as a closed path in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPolygon {
    pub id: PolygonId,
    /// Flat array of vertices: [x0, y0, x1, y1, ...]
    pub vertices: Vec<f64>,
    pub fill: String,
    /// Screen position of the tile's top-left corner.
    pub position: Point,
}

impl RenderPolygon {
    /// Project a placed polygon through `view`. Unplaced polygons sit at the logical origin.
    pub fn project(polygon: &PolygonDescriptor, view: &ViewTransform, canvas_origin: Point) -> Self {
        let at = polygon.position().unwrap_or(Point::new(0.0, 0.0));
        let vertices = polygon
            .points()
            .iter()
            .flat_map(|p| {
                let screen = view.logical_to_screen(p.translate(at.x, at.y), canvas_origin);
                [screen.x, screen.y]
            })
            .collect();

        Self {
            id: polygon.id(),
            vertices,
            fill: polygon.fill().css(),
            position: view.logical_to_screen(at, canvas_origin),
        }
    }
}

/// Complete frame data for one redraw of both zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub buffer: Vec<RenderTile>,
    pub work: Vec<RenderPolygon>,
    pub view: ViewTransform,
    pub grid: GridLabels,
    /// Transient message shown over the work canvas, if any.
    pub notice: Option<String>,
}

impl RenderFrame {
    /// Build a frame for a `width` × `height` work canvas whose top-left
    /// corner sits at `canvas_origin`. `dragging` dims the matching buffer tile.
    pub fn build(
        board: &Board,
        view: &ViewTransform,
        width: f64,
        height: f64,
        canvas_origin: Point,
        dragging: Option<PolygonId>,
    ) -> Self {
        let buffer = board
            .buffer()
            .iter()
            .map(|p| RenderTile {
                id: p.id(),
                points: p.svg_points(),
                fill: p.fill().css(),
                opacity: if dragging == Some(p.id()) {
                    DRAGGING_OPACITY
                } else {
                    1.0
                },
            })
            .collect();

        let work = board
            .work()
            .iter()
            .map(|p| RenderPolygon::project(p, view, canvas_origin))
            .collect();

        Self {
            buffer,
            work,
            view: *view,
            grid: GridLabels::compute(view, width, height),
            notice: None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
