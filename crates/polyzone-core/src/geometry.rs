use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;

/// Unique polygon identifier. Stable across drag transfers.
pub type PolygonId = Uuid;

/// A 2D point in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A generated polygon: identity, outline and fill, plus a logical position
/// once it has been placed on the work canvas.
///
/// The id and the vertex order are fixed at construction. Placement only ever
/// produces a new descriptor through [`PolygonDescriptor::with_position`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonDescriptor {
    id: PolygonId,
    points: Vec<Point>,
    fill: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
}

impl PolygonDescriptor {
    pub fn new(id: PolygonId, points: Vec<Point>, fill: Color) -> Self {
        Self {
            id,
            points,
            fill,
            x: None,
            y: None,
        }
    }

    pub fn id(&self) -> PolygonId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn fill(&self) -> &Color {
        &self.fill
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Logical position on the work canvas, if placed.
    pub fn position(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position().is_some()
    }

    /// Same polygon, positioned at `at` in logical coordinates.
    pub fn with_position(&self, at: Point) -> Self {
        Self {
            x: Some(at.x),
            y: Some(at.y),
            ..self.clone()
        }
    }

    /// Same polygon with any placement stripped (the form held in the buffer).
    pub fn without_position(&self) -> Self {
        Self {
            x: None,
            y: None,
            ..self.clone()
        }
    }

    /// Vertex list in SVG `points` attribute form: `"x0,y0 x1,y1 ..."`.
    pub fn svg_points(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PolygonDescriptor {
        PolygonDescriptor::new(
            Uuid::nil(),
            vec![
                Point::new(10.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(50.0, 80.0),
            ],
            Color::rgb(255, 0, 0),
        )
    }

    #[test]
    fn test_placement_keeps_identity() {
        let poly = triangle();
        assert!(!poly.is_placed());

        let placed = poly.with_position(Point::new(12.5, -4.0));
        assert_eq!(placed.id(), poly.id());
        assert_eq!(placed.points(), poly.points());
        assert_eq!(placed.position(), Some(Point::new(12.5, -4.0)));
        assert_eq!(placed.without_position(), poly);
    }

    #[test]
    fn test_position_omitted_from_json_until_placed() {
        let poly = triangle();
        let json = serde_json::to_value(&poly).unwrap();
        assert!(json.get("x").is_none());
        assert!(json.get("y").is_none());

        let placed = serde_json::to_value(poly.with_position(Point::new(1.0, 2.0))).unwrap();
        assert_eq!(placed["x"], 1.0);
        assert_eq!(placed["y"], 2.0);
    }

    #[test]
    fn test_svg_points() {
        assert_eq!(triangle().svg_points(), "10,10 90,10 50,80");
    }
}
