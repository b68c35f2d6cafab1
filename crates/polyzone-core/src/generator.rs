//! Random polygon generation.
//!
//! Polygons are star-shaped around the logical point (50, 50): vertices are
//! spread at equal angles with a random radius each, so every generated
//! outline fits inside a 100×100 tile.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::color::{Color, ColorMode, Palette};
use crate::geometry::{Point, PolygonDescriptor};

pub const VERTEX_COUNT: RangeInclusive<usize> = 3..=10;
pub const BATCH_SIZE: RangeInclusive<usize> = 5..=20;
pub const MIN_RADIUS: f64 = 20.0;
pub const MAX_RADIUS: f64 = 50.0;
pub const CENTER: Point = Point { x: 50.0, y: 50.0 };

/// Produces random polygons from an injected random source.
#[derive(Debug)]
pub struct PolygonGenerator<R = StdRng> {
    rng: R,
    mode: ColorMode,
    palette: Palette,
}

impl PolygonGenerator<StdRng> {
    /// Deterministic generator, for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PolygonGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            mode: ColorMode::Random,
            palette: Palette::default(),
        }
    }

    pub fn with_color_mode(mut self, mode: ColorMode, palette: Palette) -> Self {
        self.mode = mode;
        self.palette = palette;
        self
    }

    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    /// Generate one polygon. `color_index` is the shared palette cursor and is
    /// only advanced in [`ColorMode::Palette`].
    pub fn generate(&mut self, color_index: &mut usize) -> PolygonDescriptor {
        let id = Builder::from_random_bytes(self.rng.gen()).into_uuid();
        let vertices = self.rng.gen_range(VERTEX_COUNT);

        let points = (0..vertices)
            .map(|i| {
                let angle = (i as f64 / vertices as f64) * 2.0 * PI;
                let radius = self.rng.gen_range(MIN_RADIUS..=MAX_RADIUS);
                Point::new(
                    CENTER.x + radius * angle.cos(),
                    CENTER.y + radius * angle.sin(),
                )
            })
            .collect();

        let fill = match self.mode {
            ColorMode::Random => Color::hue(self.rng.gen_range(0.0..360.0)),
            ColorMode::Palette => self.palette.next(color_index),
        };

        PolygonDescriptor::new(id, points, fill)
    }

    /// Generate between 5 and 20 polygons.
    pub fn generate_batch(&mut self, color_index: &mut usize) -> Vec<PolygonDescriptor> {
        let count = self.rng.gen_range(BATCH_SIZE);
        log::debug!("generating batch of {count} polygons");
        (0..count).map(|_| self.generate(color_index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_and_bounds() {
        let mut gen = PolygonGenerator::seeded(7);
        let mut index = 0;
        for _ in 0..500 {
            let poly = gen.generate(&mut index);
            assert!(VERTEX_COUNT.contains(&poly.vertex_count()));
            for p in poly.points() {
                assert!((0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y));
            }
            assert!(!poly.is_placed());
        }
    }

    #[test]
    fn test_radius_within_range() {
        let mut gen = PolygonGenerator::seeded(11);
        let mut index = 0;
        for _ in 0..100 {
            for p in gen.generate(&mut index).points() {
                let r = ((p.x - CENTER.x).powi(2) + (p.y - CENTER.y).powi(2)).sqrt();
                assert!(r >= MIN_RADIUS - 1e-9 && r <= MAX_RADIUS + 1e-9);
            }
        }
    }

    #[test]
    fn test_first_vertex_on_positive_x_axis() {
        let mut gen = PolygonGenerator::seeded(3);
        let poly = gen.generate(&mut 0);
        assert!((poly.points()[0].y - CENTER.y).abs() < 1e-10);
        assert!(poly.points()[0].x > CENTER.x);
    }

    #[test]
    fn test_batch_size() {
        let mut gen = PolygonGenerator::seeded(42);
        let mut index = 0;
        for _ in 0..200 {
            let batch = gen.generate_batch(&mut index);
            assert!(BATCH_SIZE.contains(&batch.len()));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = PolygonGenerator::seeded(99).generate_batch(&mut 0);
        let b = PolygonGenerator::seeded(99).generate_batch(&mut 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut gen = PolygonGenerator::seeded(5);
        let mut index = 0;
        let mut ids: Vec<_> = (0..200).map(|_| gen.generate(&mut index).id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_random_mode_uses_fixed_saturation() {
        let mut gen = PolygonGenerator::seeded(1);
        let mut index = 0;
        for _ in 0..50 {
            match *gen.generate(&mut index).fill() {
                Color::Hsl {
                    hue,
                    saturation,
                    lightness,
                } => {
                    assert!((0.0..360.0).contains(&hue));
                    assert_eq!(saturation, 70);
                    assert_eq!(lightness, 50);
                }
                other => panic!("unexpected fill {other:?}"),
            }
        }
        assert_eq!(index, 0);
    }

    #[test]
    fn test_palette_mode_cycles() {
        let palette = Palette::new(vec![
            Color::rgb(1, 0, 0),
            Color::rgb(2, 0, 0),
            Color::rgb(3, 0, 0),
        ]);
        let mut gen =
            PolygonGenerator::seeded(8).with_color_mode(ColorMode::Palette, palette.clone());
        let mut index = 1;
        let fills: Vec<Color> = (0..4).map(|_| *gen.generate(&mut index).fill()).collect();
        assert_eq!(
            fills,
            vec![
                palette.colors()[1],
                palette.colors()[2],
                palette.colors()[0],
                palette.colors()[1],
            ]
        );
        assert_eq!(index, 2);
    }
}
