use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{coords::Margins, MotifError, Result};

/// Top-level configuration structure for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub viewport: ViewportConfig,
    pub coords: CoordinateConfig,
    pub animation: AnimationConfig,
    pub kolintang: KolintangConfig,
}

impl AppConfig {
    /// Parses a JSON document; missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.viewport;
        if !(v.width > 0.0 && v.height > 0.0) {
            return Err(MotifError::invalid_config(format!(
                "viewport must be positive, got {}x{}",
                v.width, v.height
            )));
        }
        if !(self.coords.grid_spacing > 0.0) {
            return Err(MotifError::invalid_config("grid_spacing must be positive"));
        }
        let a = &self.animation;
        if a.min_scale > a.max_scale {
            return Err(MotifError::invalid_config(format!(
                "min_scale {} exceeds max_scale {}",
                a.min_scale, a.max_scale
            )));
        }
        self.kolintang.validate()
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateConfig {
    pub margins: Margins,
    pub show_axes: bool,
    pub show_grid: bool,
    pub grid_spacing: f32,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            show_axes: true,
            show_grid: false,
            grid_spacing: 50.0,
        }
    }
}

/// Base speeds (radians per second) and scale bounds shared by the orbiting
/// and breathing motifs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub orbit_speed: f32,
    pub breathing_speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Pixels per second.
    pub scroll_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            orbit_speed: 0.3,
            breathing_speed: 0.5,
            min_scale: 0.7,
            max_scale: 1.3,
            scroll_speed: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KolintangConfig {
    pub bar_count: usize,
    pub mallet_speed: f32,
    pub vibration_speed: f32,
    pub vibration_frequency: f32,
    pub max_displacement: f32,
    pub horizontal_vibration: f32,
    pub auto_play_interval: f32,
    pub strike_speed: f32,
    /// Sequential sweep when true, random targets otherwise.
    pub sequential: bool,
    /// Start with the single click-driven mallet instead of the sweep.
    pub interactive: bool,
    pub seed: u64,
    pub left_width: f32,
    pub right_width: f32,
    pub length: f32,
}

impl Default for KolintangConfig {
    fn default() -> Self {
        Self {
            bar_count: 12,
            mallet_speed: 1.2,
            vibration_speed: 8.0,
            vibration_frequency: 10.0,
            max_displacement: 4.0,
            horizontal_vibration: 2.5,
            auto_play_interval: 0.5,
            strike_speed: 2.5,
            sequential: true,
            interactive: true,
            seed: 0x6b6f_6c69,
            left_width: 130.0,
            right_width: 329.0,
            length: 1076.0,
        }
    }
}

impl KolintangConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bar_count < 2 || self.bar_count % 2 != 0 {
            return Err(MotifError::invalid_config(format!(
                "bar_count must be even and at least 2, got {}",
                self.bar_count
            )));
        }
        if !(self.auto_play_interval > 0.0) {
            return Err(MotifError::invalid_config(
                "auto_play_interval must be positive",
            ));
        }
        Ok(())
    }
}
