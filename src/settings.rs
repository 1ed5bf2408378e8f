//! Runtime preferences, persisted as a small JSON file next to the binary

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player preferences. Game state is never persisted; this is config only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// RNG seed for headless demo runs
    pub demo_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            demo_seed: 0xC0FFEE,
        }
    }
}

impl Settings {
    pub const DEFAULT_PATH: &'static str = "starfall_settings.json";

    /// Load from `path`, falling back to defaults on a missing or
    /// malformed file
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("settings loaded from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file {} is malformed: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("could not save settings to {}: {err}", path.display());
                }
            }
            Err(err) => log::warn!("could not serialize settings: {err}"),
        }
    }
}
