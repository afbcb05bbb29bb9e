//! Per-world protection settings — loaded from a TOML file per world.
//!
//! A world only comes under plot control once its settings are loaded;
//! worlds without settings bypass the engine entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors producing or loading world settings. Invalid dimensions are fatal
/// at construction and are never silently defaulted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("plot size must be positive, got {0}")]
    InvalidPlotSize(i32),
    #[error("road width must not be negative, got {0}")]
    InvalidRoadWidth(i32),
    #[error("read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Protection settings for one world under plot control.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Edge length of a plot's buildable area, in blocks.
    pub plot_size: i32,
    /// Width of the road band between plots, in blocks.
    #[serde(default = "default_road_width")]
    pub road_width: i32,
    /// When true, PvP is denied everywhere in the world regardless of
    /// per-plot flags (bypass permission still wins).
    #[serde(default)]
    pub restrict_pvp: bool,
    /// When true, non-player entity motion is cancelled.
    #[serde(default = "default_true")]
    pub restrict_entity_movement: bool,
    /// When false, liquid spread is cancelled everywhere in the world.
    #[serde(default)]
    pub update_plot_liquids: bool,
}

fn default_road_width() -> i32 {
    7
}

fn default_true() -> bool {
    true
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            plot_size: 32,
            road_width: 7,
            restrict_pvp: false,
            restrict_entity_movement: true,
            update_plot_liquids: false,
        }
    }
}

impl WorldSettings {
    /// Reject dimensions the grid cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plot_size <= 0 {
            return Err(ConfigError::InvalidPlotSize(self.plot_size));
        }
        if self.road_width < 0 {
            return Err(ConfigError::InvalidRoadWidth(self.road_width));
        }
        Ok(())
    }

    /// Full grid cell edge: buildable area plus road band.
    #[must_use]
    pub const fn total_size(&self) -> i32 {
        self.plot_size + self.road_width
    }

    /// Load settings from a TOML file, writing built-in defaults on first
    /// run. The result is validated before it is returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = if path.exists() {
            let text = std::fs::read_to_string(path)?;
            toml::from_str(&text)?
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let defaults = Self::default();
            let text = toml::to_string_pretty(&defaults)
                .expect("default settings always serialize");
            std::fs::write(path, text)?;
            log::info!("plotguard: Created default world settings at {path:?}");
            defaults
        };
        settings.validate()?;
        Ok(settings)
    }
}
