//! Game settings
//!
//! Loaded from a JSON file next to the binary. Every field has a default, so a
//! partial file only overrides what it names.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Level ===
    /// Level width in tiles
    pub level_width: u32,
    /// Level height in tiles
    pub level_height: u32,
    /// Fixed seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// World x of each safe strip
    pub safe_zone_positions: Vec<f32>,

    // === Population ===
    pub turret_odds: u32,
    pub moving_turret_odds: u32,
    /// Spawning turrets are off in the shipped game
    pub spawning_turrets: bool,
    pub spawning_turret_odds: u32,
    pub max_spawning_turrets: usize,

    // === View ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Runner ===
    /// Minimum wall-clock gap between ticks when pacing in real time
    pub frame_limit_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_width: LEVEL_WIDTH,
            level_height: LEVEL_HEIGHT,
            seed: None,
            safe_zone_positions: vec![0.0],

            turret_odds: TURRET_ODDS,
            moving_turret_odds: MOVING_TURRET_ODDS,
            spawning_turrets: false,
            spawning_turret_odds: SPAWNING_TURRET_ODDS,
            max_spawning_turrets: MAX_SPAWNING_TURRETS,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            frame_limit_ms: 2,
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Reject settings that cannot produce a level
    pub fn validate(&self) -> Result<()> {
        if self.level_width == 0 || self.level_height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.level_width,
                height: self.level_height,
            });
        }
        if self.level_width < MIN_LEVEL_WIDTH {
            return Err(Error::LevelTooNarrow {
                width: self.level_width,
            });
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(Error::Settings(format!(
                "viewport {}x{} must be positive",
                self.viewport_width, self.viewport_height
            )));
        }
        Ok(())
    }

    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let settings: Self =
            serde_json::from_str(&json).map_err(|e| Error::Settings(e.to_string()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("death_by_dots_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.spawning_turrets);
        assert_eq!(settings.viewport(), Vec2::new(700.0, 700.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"level_width": 40, "seed": 9}"#).unwrap();
        assert_eq!(settings.level_width, 40);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.level_height, LEVEL_HEIGHT);
    }

    #[test]
    fn test_validate_rejects_bad_levels() {
        let narrow = Settings {
            level_width: 5,
            ..Settings::default()
        };
        assert!(matches!(narrow.validate(), Err(Error::LevelTooNarrow { width: 5 })));
        let flat = Settings {
            level_height: 0,
            ..Settings::default()
        };
        assert!(matches!(flat.validate(), Err(Error::InvalidDimensions { .. })));
        let blind = Settings {
            viewport_width: 0.0,
            ..Settings::default()
        };
        assert!(matches!(blind.validate(), Err(Error::Settings(_))));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip.json");
        let settings = Settings {
            seed: Some(77),
            spawning_turrets: true,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults_and_garbage_errors() {
        let missing = temp_path("missing.json");
        assert_eq!(Settings::load(&missing).unwrap(), Settings::default());

        let garbage = temp_path("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(Settings::load(&garbage), Err(Error::Settings(_))));
        let _ = std::fs::remove_file(&garbage);
    }
}
