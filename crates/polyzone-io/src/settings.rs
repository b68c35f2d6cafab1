use std::fs;
use std::path::Path;
use std::time::Duration;

use polyzone_core::{ColorMode, Palette, Point};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::persist::DEFAULT_STATE_KEY;

/// User-tunable settings, read from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    /// Work canvas size in pixels, used when laying out ruler labels.
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Top-left corner of the work canvas in screen space.
    pub canvas_origin: Point,
    pub storage_key: String,
    pub color_mode: ColorMode,
    pub palette: Palette,
    pub notice_ttl_ms: u64,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            canvas_width: 1500.0,
            canvas_height: 400.0,
            canvas_origin: Point::new(0.0, 0.0),
            storage_key: DEFAULT_STATE_KEY.to_string(),
            color_mode: ColorMode::Random,
            palette: Palette::default(),
            notice_ttl_ms: 3000,
        }
    }
}

impl ZoneSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.canvas_width) || !positive(self.canvas_height) {
            return Err(SettingsError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(SettingsError::Invalid("storage_key is empty".into()));
        }
        if self.color_mode == ColorMode::Palette && self.palette.is_empty() {
            return Err(SettingsError::Invalid(
                "palette color mode needs at least one color".into(),
            ));
        }
        Ok(())
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}
