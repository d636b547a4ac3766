//! Player preferences
//!
//! Persisted as JSON next to the high scores.

use serde::{Deserialize, Serialize};

use crate::consts::{MASTER_VOLUME, MUSIC_VOLUME};
use crate::highscores::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all sound
    pub muted: bool,

    // === Debug ===
    /// Outline hitboxes
    pub debug_hitboxes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: MASTER_VOLUME,
            music_volume: MUSIC_VOLUME,
            muted: false,
            debug_hitboxes: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arcade_settings";

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Discarding unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings load failed: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Best-effort save
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings save failed: {}", e),
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;

    #[test]
    fn test_defaults_when_missing_or_broken() {
        assert_eq!(Settings::load(&MemoryStore::new()), Settings::default());
        assert_eq!(Settings::load(&MemoryStore::unavailable()), Settings::default());
        let broken = MemoryStore::new().with(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&broken), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        settings.save(&mut store);
        assert!(Settings::load(&store).muted);
    }

    #[test]
    fn test_partial_json_fills_defaults_and_clamps() {
        let store = MemoryStore::new().with(Settings::STORAGE_KEY, r#"{"master_volume": 3.0}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.music_volume, MUSIC_VOLUME);
        assert!(!settings.muted);
    }
}
