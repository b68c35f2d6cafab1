use polyzone_core::Point;
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;
/// Scale multiplier for one wheel notch towards the user.
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Scale multiplier for one wheel notch away from the user.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Pan/zoom state of the work canvas.
///
/// Maps logical coordinates to screen pixels as
/// `screen = logical * scale + offset + canvas_origin`.
/// Zoom is anchored at the canvas origin, not at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformState")]
pub struct ViewTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    /// Last pointer position while a pan gesture is active.
    #[serde(skip)]
    pan_anchor: Option<Point>,
}

/// Wire form of [`ViewTransform`]; scale is re-clamped on the way in.
#[derive(Deserialize)]
struct TransformState {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl From<TransformState> for ViewTransform {
    fn from(state: TransformState) -> Self {
        Self::from_parts(state.scale, state.offset_x, state.offset_y)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            pan_anchor: None,
        }
    }

    /// Build a transform from raw parts. Non-finite or out-of-range scales are clamped.
    pub fn from_parts(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: clamp_scale(scale),
            offset_x,
            offset_y,
            pan_anchor: None,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    // ── Zoom ─────────────────────────────────────────────────────────

    /// Apply one wheel event. Positive `delta_y` (scrolling away) zooms out,
    /// negative zooms in, zero leaves the scale untouched. Returns the new scale.
    pub fn zoom(&mut self, delta_y: f64) -> f64 {
        if delta_y > 0.0 {
            self.zoom_by(ZOOM_OUT_FACTOR)
        } else if delta_y < 0.0 {
            self.zoom_by(ZOOM_IN_FACTOR)
        } else {
            self.scale
        }
    }

    /// Multiply the scale by `factor`, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom_by(&mut self, factor: f64) -> f64 {
        self.scale = clamp_scale(self.scale * factor);
        self.scale
    }

    // ── Pan ──────────────────────────────────────────────────────────

    pub fn begin_pan(&mut self, screen: Point) {
        self.pan_anchor = Some(screen);
    }

    /// Shift the offset by the pointer movement since the previous step.
    /// Returns `false` when no pan is in progress.
    pub fn update_pan(&mut self, screen: Point) -> bool {
        let Some(last) = self.pan_anchor else {
            return false;
        };
        self.pan_by(screen.x - last.x, screen.y - last.y);
        self.pan_anchor = Some(screen);
        true
    }

    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Pan by a delta in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    // ── Coordinate conversion ────────────────────────────────────────

    /// Convert a screen position to logical coordinates.
    /// `canvas_origin` is the top-left of the canvas in screen space.
    pub fn screen_to_logical(&self, screen: Point, canvas_origin: Point) -> Point {
        Point::new(
            (screen.x - canvas_origin.x - self.offset_x) / self.scale,
            (screen.y - canvas_origin.y - self.offset_y) / self.scale,
        )
    }

    /// Convert logical coordinates to a screen position.
    pub fn logical_to_screen(&self, logical: Point, canvas_origin: Point) -> Point {
        Point::new(
            logical.x * self.scale + self.offset_x + canvas_origin.x,
            logical.y * self.scale + self.offset_y + canvas_origin.y,
        )
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[test]
    fn test_initial_state() {
        let view = ViewTransform::new();
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.offset(), ORIGIN);
        assert!(!view.is_panning());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut view = ViewTransform::new();
        for _ in 0..200 {
            view.zoom(-120.0);
            assert!(view.scale() <= MAX_SCALE);
        }
        assert!((view.scale() - MAX_SCALE).abs() < 1e-12);

        for _ in 0..200 {
            view.zoom(3.0);
            assert!(view.scale() >= MIN_SCALE);
        }
        assert!((view.scale() - MIN_SCALE).abs() < 1e-12);

        view.zoom_by(1e-30);
        assert_eq!(view.scale(), MIN_SCALE);
        view.zoom_by(f64::INFINITY);
        assert_eq!(view.scale(), MAX_SCALE);
    }

    #[test]
    fn test_zoom_monotonic() {
        let mut view = ViewTransform::new();
        let mut last = view.scale();
        for _ in 0..50 {
            let next = view.zoom(-1.0);
            assert!(next >= last);
            last = next;
        }
        for _ in 0..80 {
            let next = view.zoom(1.0);
            assert!(next <= last);
            last = next;
        }
    }

    #[test]
    fn test_zoom_multiplicative() {
        let mut view = ViewTransform::new();
        view.zoom(-1.0);
        assert!((view.scale() - 1.1).abs() < 1e-12);
        view.zoom(1.0);
        assert!((view.scale() - 0.99).abs() < 1e-12);
        view.zoom(0.0);
        assert!((view.scale() - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_keeps_offset() {
        let mut view = ViewTransform::from_parts(1.0, 30.0, -12.0);
        view.zoom(-1.0);
        assert_eq!(view.offset(), Point::new(30.0, -12.0));
    }

    #[test]
    fn test_incremental_pan() {
        let mut view = ViewTransform::new();
        assert!(!view.update_pan(Point::new(5.0, 5.0)));

        view.begin_pan(Point::new(100.0, 100.0));
        assert!(view.update_pan(Point::new(110.0, 95.0)));
        assert!(view.update_pan(Point::new(130.0, 90.0)));
        assert_eq!(view.offset(), Point::new(30.0, -10.0));

        view.end_pan();
        assert!(!view.update_pan(Point::new(500.0, 500.0)));
        assert_eq!(view.offset(), Point::new(30.0, -10.0));
    }

    #[test]
    fn test_pan_there_and_back() {
        let mut view = ViewTransform::from_parts(2.0, 17.0, -3.0);
        view.pan_by(42.0, -7.0);
        view.pan_by(-42.0, 7.0);
        assert_eq!(view.offset(), Point::new(17.0, -3.0));
    }

    #[test]
    fn test_screen_to_logical() {
        let view = ViewTransform::from_parts(2.0, 10.0, 10.0);
        let p = view.screen_to_logical(Point::new(110.0, 50.0), ORIGIN);
        assert!((p.x - 50.0).abs() < 1e-10);
        assert!((p.y - 20.0).abs() < 1e-10);

        let shifted = view.screen_to_logical(Point::new(130.0, 70.0), Point::new(20.0, 20.0));
        assert_eq!(shifted, p);
    }

    #[test]
    fn test_roundtrip() {
        let origin = Point::new(13.0, 250.0);
        for &(scale, ox, oy) in &[(1.0, 0.0, 0.0), (0.1, -400.0, 33.3), (4.7, 12.5, -900.0)] {
            let view = ViewTransform::from_parts(scale, ox, oy);
            for &(x, y) in &[(0.0, 0.0), (50.0, -25.0), (-1234.5, 987.25)] {
                let logical = Point::new(x, y);
                let back = view.screen_to_logical(view.logical_to_screen(logical, origin), origin);
                assert!((back.x - x).abs() < 1e-9);
                assert!((back.y - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_deserialize_clamps_scale() {
        let view: ViewTransform =
            serde_json::from_str(r#"{"scale":0.0,"offset_x":4.0,"offset_y":5.0}"#).unwrap();
        assert_eq!(view.scale(), MIN_SCALE);
        assert_eq!(view.offset(), Point::new(4.0, 5.0));

        let json = serde_json::to_string(&ViewTransform::from_parts(2.0, 1.0, 1.0)).unwrap();
        assert!(!json.contains("pan_anchor"));
    }
}
