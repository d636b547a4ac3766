//! Process-wide arcade context
//!
//! Created once at startup and handed to every scene; replaces engine-global
//! state such as the sound volume and mute flag.

use crate::consts::MUSIC_DUCKED_VOLUME;
use crate::highscores::{HighScores, KeyValueStore};
use crate::settings::Settings;

/// Shared state every scene can read and update
pub struct ArcadeContext {
    pub settings: Settings,
    pub high_scores: HighScores,
    /// Music is ducked while the menu voice message plays
    pub music_ducked: bool,
}

impl ArcadeContext {
    /// Build the context, reading settings from `store`
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let settings = Settings::load(store.as_ref());
        Self {
            settings,
            high_scores: HighScores::new(store),
            music_ducked: false,
        }
    }

    /// Clear transient per-scene state when a scene is torn down
    pub fn reset_for_scene(&mut self) {
        self.music_ducked = false;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.settings.save(self.high_scores.store_mut());
        log::info!("Sound {}", if self.settings.muted { "muted" } else { "unmuted" });
        self.settings.muted
    }

    pub fn toggle_debug_hitboxes(&mut self) -> bool {
        self.settings.debug_hitboxes = !self.settings.debug_hitboxes;
        self.settings.save(self.high_scores.store_mut());
        log::info!("Hitboxes {}", if self.settings.debug_hitboxes { "shown" } else { "hidden" });
        self.settings.debug_hitboxes
    }

    /// Effective sound effect volume
    pub fn sfx_volume(&self) -> f32 {
        if self.settings.muted {
            0.0
        } else {
            self.settings.master_volume
        }
    }

    /// Effective background music volume
    pub fn music_volume(&self) -> f32 {
        if self.settings.muted {
            0.0
        } else if self.music_ducked {
            MUSIC_DUCKED_VOLUME.min(self.settings.music_volume) * self.settings.master_volume
        } else {
            self.settings.music_volume * self.settings.master_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;

    #[test]
    fn test_mute_persists() {
        let mut ctx = ArcadeContext::new(Box::new(MemoryStore::new()));
        assert!(ctx.sfx_volume() > 0.0);
        assert!(ctx.toggle_mute());
        assert_eq!(ctx.sfx_volume(), 0.0);
        assert_eq!(ctx.music_volume(), 0.0);
        assert!(Settings::load(ctx.high_scores.store()).muted);
    }

    #[test]
    fn test_hitbox_overlay_persists() {
        let mut ctx = ArcadeContext::new(Box::new(MemoryStore::new()));
        assert!(ctx.toggle_debug_hitboxes());
        assert!(Settings::load(ctx.high_scores.store()).debug_hitboxes);
    }

    #[test]
    fn test_ducking_resets_on_teardown() {
        let mut ctx = ArcadeContext::new(Box::new(MemoryStore::new()));
        let normal = ctx.music_volume();
        ctx.music_ducked = true;
        assert!(ctx.music_volume() < normal);
        ctx.reset_for_scene();
        assert_eq!(ctx.music_volume(), normal);
    }
}
