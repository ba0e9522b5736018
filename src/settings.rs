//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file on native.

use serde::{Deserialize, Serialize};

use crate::sim::Transition;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Loop the background music while playing
    pub music_enabled: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show the score counter
    pub show_score: bool,

    // === Accessibility ===
    /// Reduced motion (cut between scenes instead of flipping)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_enabled: true,
            mute_on_blur: true,

            show_score: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective music volume (0 when music is off)
    pub fn effective_music_volume(&self) -> f32 {
        if !self.music_enabled {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Scene swap animation (respects reduced_motion)
    pub fn transition(&self) -> Transition {
        if self.reduced_motion {
            Transition::None
        } else {
            Transition::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "monster_swipe_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_PATH: &'static str = "MONSTER_SWIPE_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `MONSTER_SWIPE_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volumes() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);

        settings.music_enabled = false;
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_reduced_motion_cuts() {
        let mut settings = Settings::default();
        assert_eq!(settings.transition(), Transition::default());
        settings.reduced_motion = true;
        assert_eq!(settings.transition(), Transition::None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "reduced_motion": true, "sfx_volume": 0.5 }"#);
        assert!(settings.reduced_motion);
        assert_eq!(settings.sfx_volume, 0.5);
        assert_eq!(settings.music_volume, Settings::default().music_volume);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
