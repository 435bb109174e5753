//! Audio notification seam
//!
//! The game has no sound engine of its own. It fires notifications at an
//! `AudioSink`; hosts plug in whatever backend they have.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Block settled on the tower
    BlockPlaced,
    /// Drop missed the tower
    GameOver,
    /// New best score
    HighScore,
}

/// Receiver for fire-and-forget audio notifications
pub trait AudioSink {
    /// Play a one-shot effect at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start or stop background music
    fn set_music(&mut self, playing: bool, volume: f32);
}

/// Sink that only logs
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, volume);
    }

    fn set_music(&mut self, playing: bool, volume: f32) {
        log::debug!("music {} at {:.2}", if playing { "on" } else { "off" }, volume);
    }
}

/// Audio manager for the game
///
/// Applies the player's toggles and volume before anything reaches the sink.
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_enabled: bool,
    music_enabled: bool,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_enabled: true,
            music_enabled: true,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        if vol.is_finite() {
            self.master_volume = vol.clamp(0.0, 1.0);
        }
    }

    pub fn set_sfx_enabled(&mut self, enabled: bool) {
        self.sfx_enabled = enabled;
    }

    /// Toggle music; the sink hears about it immediately
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        self.sync_music();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    pub fn sfx_enabled(&self) -> bool {
        self.sfx_enabled
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Play a sound effect if effects are on
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted || !self.sfx_enabled {
            return;
        }
        self.sink.play(effect, self.master_volume);
    }

    fn sync_music(&mut self) {
        let playing = self.music_enabled && !self.muted;
        self.sink.set_music(playing, self.master_volume);
    }
}
