//! Game settings
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use crate::error::SettingsError;
use crate::sim::Arena;

/// Smallest arena that still fits the boss, its home margin and spawn band
pub const MIN_ARENA_WIDTH: f32 = 640.0;
pub const MIN_ARENA_HEIGHT: f32 = 368.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield size in pixels
    pub arena_width: f32,
    pub arena_height: f32,
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Debug ===
    /// Ask renderers to outline hitboxes
    pub show_hitboxes: bool,

    // === Accessibility ===
    /// Renderers skip the invincibility blink and damage flashes
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            seed: None,
            show_hitboxes: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}): {}",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Arena from the configured size, raised to the playable minimum
    pub fn arena(&self) -> Arena {
        Arena::new(
            sanitize(self.arena_width, DEFAULT_ARENA_WIDTH, MIN_ARENA_WIDTH),
            sanitize(self.arena_height, DEFAULT_ARENA_HEIGHT, MIN_ARENA_HEIGHT),
        )
    }
}

fn sanitize(value: f32, fallback: f32, min: f32) -> f32 {
    if value.is_finite() {
        value.max(min)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.arena_width, DEFAULT_ARENA_WIDTH);
        assert!(!settings.show_hitboxes);
    }

    #[test]
    fn test_arena_minimum() {
        let settings = Settings {
            arena_width: 100.0,
            arena_height: f32::NAN,
            ..Default::default()
        };
        let arena = settings.arena();
        assert_eq!(arena.width, MIN_ARENA_WIDTH);
        assert_eq!(arena.height, DEFAULT_ARENA_HEIGHT);
        assert_eq!(Settings::default().arena(), Arena::default());
    }

    #[test]
    fn test_load_errors() {
        let dir = std::env::temp_dir();
        let missing = dir.join("scroll_fish_settings_missing.json");
        assert!(matches!(
            Settings::load_from(&missing),
            Err(SettingsError::Io(_))
        ));
        assert_eq!(Settings::load_or_default(&missing), Settings::default());

        let bad = dir.join(format!("scroll_fish_settings_bad_{}.json", std::process::id()));
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&bad),
            Err(SettingsError::Parse(_))
        ));
        std::fs::remove_file(&bad).unwrap();
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!(
            "scroll_fish_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            arena_width: 1280.0,
            seed: Some(3),
            reduced_motion: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        std::fs::remove_file(&path).unwrap();
    }
}
