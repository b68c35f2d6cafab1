//! Ruler labels along the edges of the work canvas.
//!
//! Labels are recomputed from scratch for every transform; nothing here is
//! cached or updated incrementally.
//!
//! The two axes are not symmetric. A horizontal label shows `t / scale` for
//! its unshifted tick coordinate `t` and so ignores the pan offset, while a
//! vertical label is measured upward from the bottom edge of the canvas and
//! does account for `offset_y`. This matches how the canvas has always labelled
//! its rulers and is kept as is.

use serde::{Deserialize, Serialize};

use crate::transform::ViewTransform;

/// Logical distance between two ruler ticks at scale 1.
pub const GRID_STEP: f64 = 50.0;
/// How far outside the canvas (in pixels) a label may sit and still be drawn.
pub const LABEL_TOLERANCE: f64 = 10.0;

/// One ruler label: where it goes along its axis, in canvas pixels, and the value it shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub position: f64,
    pub value: i64,
}

/// The shared "0" drawn where the two rulers meet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginLabel {
    pub x: f64,
    pub y: f64,
}

/// All labels to draw for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLabels {
    /// Labels under the x axis; `position` is the distance from the left edge.
    pub horizontal: Vec<AxisLabel>,
    /// Labels beside the y axis; `position` is the distance from the top edge.
    pub vertical: Vec<AxisLabel>,
    pub origin: Option<OriginLabel>,
}

impl GridLabels {
    /// Compute ruler labels for a `width` × `height` canvas.
    pub fn compute(view: &ViewTransform, width: f64, height: f64) -> Self {
        let scale = view.scale();
        let offset_x = view.offset_x();
        let offset_y = view.offset_y();
        let step = GRID_STEP * scale;

        // Logical coordinates of the screen point where the origin label goes.
        let origin_x = round_half_up(-offset_x / scale);
        let origin_y = round_half_up(offset_y / scale);
        let origin_drawn = origin_x == 0 && origin_y == 0;

        let horizontal = ticks(offset_x, width, step)
            .filter_map(|t| {
                let value = round_half_up(t / scale);
                let left = t - offset_x;
                if origin_drawn && value == 0 {
                    return None;
                }
                within(left, width).then_some(AxisLabel {
                    position: left,
                    value,
                })
            })
            .collect();

        let vertical = ticks(offset_y, height, step)
            .filter_map(|t| {
                let top = t - offset_y;
                let value = round_half_up((height - top) / scale);
                if origin_drawn && value == 0 {
                    return None;
                }
                Some(AxisLabel {
                    position: top,
                    value,
                })
            })
            .collect();

        let zero_left = -offset_x;
        let zero_top = height - offset_y;
        let origin = (origin_drawn && within(zero_left, width) && within(zero_top, height))
            .then_some(OriginLabel {
                x: zero_left,
                y: zero_top,
            });

        Self {
            horizontal,
            vertical,
            origin,
        }
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len() + usize::from(self.origin.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unshifted tick coordinates covering `extent` pixels plus one extra step,
/// starting from the last multiple of `step` at or below `offset`.
fn ticks(offset: f64, extent: f64, step: f64) -> impl Iterator<Item = f64> {
    let start = (offset / step).floor() * step;
    let end = start + extent + step;
    (0u32..)
        .map(move |k| start + f64::from(k) * step)
        .take_while(move |t| *t < end)
}

fn within(position: f64, extent: f64) -> bool {
    position > -LABEL_TOLERANCE && position < extent + LABEL_TOLERANCE
}

/// Round to the nearest integer, ties toward +∞.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(labels: &[AxisLabel]) -> Vec<i64> {
        labels.iter().map(|l| l.value).collect()
    }

    #[test]
    fn test_identity_transform() {
        let labels = GridLabels::compute(&ViewTransform::new(), 200.0, 400.0);

        // The zero ticks on both rulers give way to the single origin label.
        assert_eq!(values(&labels.horizontal), vec![50, 100, 150, 200]);
        assert_eq!(
            values(&labels.vertical),
            vec![400, 350, 300, 250, 200, 150, 100, 50]
        );
        assert_eq!(labels.origin, Some(OriginLabel { x: 0.0, y: 400.0 }));
        assert_eq!(labels.len(), 13);
    }

    #[test]
    fn test_exactly_one_zero() {
        let labels = GridLabels::compute(&ViewTransform::new(), 1500.0, 400.0);
        let zeros = labels
            .horizontal
            .iter()
            .chain(labels.vertical.iter())
            .filter(|l| l.value == 0)
            .count();
        assert_eq!(zeros, 0);
        assert!(labels.origin.is_some());
    }

    #[test]
    fn test_positions_follow_scale() {
        let view = ViewTransform::from_parts(2.0, 0.0, 0.0);
        let labels = GridLabels::compute(&view, 300.0, 200.0);
        for label in &labels.horizontal {
            assert!((label.position - label.value as f64 * 2.0).abs() < 1e-9);
        }
        assert_eq!(values(&labels.horizontal), vec![50, 100, 150]);
        assert_eq!(values(&labels.vertical), vec![100, 50]);
    }

    #[test]
    fn test_horizontal_value_ignores_offset() {
        let view = ViewTransform::from_parts(1.0, 120.0, 0.0);
        let labels = GridLabels::compute(&view, 200.0, 100.0);

        // Ticks start at floor(120 / 50) * 50 = 100 and are drawn at t - 120;
        // the first one lands at -20 and falls outside the tolerance.
        assert_eq!(values(&labels.horizontal), vec![150, 200, 250, 300]);
        assert!((labels.horizontal[0].position - 30.0).abs() < 1e-9);
        assert!(labels.origin.is_none());
    }

    #[test]
    fn test_vertical_value_tracks_offset() {
        let view = ViewTransform::from_parts(1.0, 0.0, 30.0);
        let labels = GridLabels::compute(&view, 100.0, 100.0);
        for label in &labels.vertical {
            assert_eq!(label.value, (100.0 - label.position).round() as i64);
        }
        // Origin is 30 logical units off, so nothing is suppressed or merged.
        assert!(labels.origin.is_none());
        assert!(labels.horizontal.iter().any(|l| l.value == 0));
    }

    #[test]
    fn test_origin_rounding_tolerance() {
        // Sub-unit pans still round to the origin.
        let view = ViewTransform::from_parts(1.0, -0.4, 0.3);
        let labels = GridLabels::compute(&view, 500.0, 400.0);
        let origin = labels.origin.unwrap();
        assert!((origin.x - 0.4).abs() < 1e-9);
        assert!((origin.y - 399.7).abs() < 1e-9);
    }

    #[test]
    fn test_origin_hidden_when_panned_vertically() {
        let view = ViewTransform::from_parts(1.0, 0.0, 1000.0);
        let labels = GridLabels::compute(&view, 100.0, 400.0);
        assert!(labels.origin.is_none());
        // Without an origin label the zero tick on the vertical ruler stays.
        let zero = labels.vertical.iter().find(|l| l.value == 0).unwrap();
        assert!((zero.position - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_count_bounded() {
        for &scale in &[0.1, 0.37, 1.0, 5.0] {
            let view = ViewTransform::from_parts(scale, -1234.0, 987.0);
            let labels = GridLabels::compute(&view, 1500.0, 400.0);
            let step = GRID_STEP * scale;
            assert!(labels.horizontal.len() as f64 <= 1500.0 / step + 2.0);
            assert!(labels.vertical.len() as f64 <= 400.0 / step + 2.0);
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.2), 0);
    }
}
