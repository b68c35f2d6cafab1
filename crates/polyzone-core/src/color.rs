use std::fmt;

use serde::{Deserialize, Serialize};

/// Saturation used for randomly generated fills, in percent.
pub const RANDOM_SATURATION: u8 = 70;
/// Lightness used for randomly generated fills, in percent.
pub const RANDOM_LIGHTNESS: u8 = 50;

/// Fill color of a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Color {
    Hsl {
        hue: f64,
        saturation: u8,
        lightness: u8,
    },
    Rgb {
        r: u8,
        g: u8,
        b: u8,
    },
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// A random-mode fill: the given hue at the fixed saturation and lightness.
    pub fn hue(hue: f64) -> Self {
        Color::Hsl {
            hue,
            saturation: RANDOM_SATURATION,
            lightness: RANDOM_LIGHTNESS,
        }
    }

    /// CSS color string, usable directly as an SVG `fill`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::rgb(128, 128, 128)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
            Color::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// How new polygons get their fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Uniform random hue.
    #[default]
    Random,
    /// Walk a fixed palette with a shared cyclic index.
    Palette,
}

/// A fixed list of fills walked in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `*index` (modulo palette size), then advance the index with wraparound.
    ///
    /// An empty palette yields the default gray and leaves the index alone.
    pub fn next(&self, index: &mut usize) -> Color {
        if self.colors.is_empty() {
            return Color::default();
        }
        let color = self.colors[*index % self.colors.len()];
        *index = (*index + 1) % self.colors.len();
        color
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(vec![
            Color::rgb(0xe6, 0x19, 0x4b),
            Color::rgb(0x3c, 0xb4, 0x4b),
            Color::rgb(0xff, 0xe1, 0x19),
            Color::rgb(0x43, 0x63, 0xd8),
            Color::rgb(0xf5, 0x82, 0x31),
            Color::rgb(0x91, 0x1e, 0xb4),
            Color::rgb(0x46, 0xf0, 0xf0),
            Color::rgb(0xf0, 0x32, 0xe6),
            Color::rgb(0xbc, 0xf6, 0x0c),
            Color::rgb(0x00, 0x80, 0x80),
        ])
    }
}
