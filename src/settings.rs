//! Game settings and preferences
//!
//! Persisted separately from scores through `persistence::JsonStore`.

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::persistence::{JsonStore, PersistError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Placement / game-over sound effects
    pub sound_effects: bool,
    /// Background music
    pub music: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Visual Effects ===
    /// Particle burst on placement
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_effects: true,
            music: true,
            master_volume: 0.8,
            particles: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "settings";

    /// Push every audio-related preference into `audio`
    pub fn apply_audio(&self, audio: &mut AudioManager) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_enabled(self.sound_effects);
        audio.set_music_enabled(self.music);
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &JsonStore) -> Self {
        let settings: Settings = store.load_or_default(Self::STORAGE_KEY);
        log::info!("Using settings from {}", store.dir().display());
        settings
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), PersistError> {
        store.save(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
