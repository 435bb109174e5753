//! Screen flow and process-wide state
//!
//! `App` owns the current screen, the running session and an `AppContext`
//! with everything that outlives a single run (best score, settings, audio).

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScores;
use crate::persistence::JsonStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession};
use crate::tuning::Tuning;

/// Which screen the player is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    /// Run ended with this score
    GameOver { score: u64 },
    Settings,
}

/// Navigation and preference commands from the UI layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    StartGame,
    OpenSettings,
    /// Settings → main menu
    Back,
    PlayAgain,
    MainMenu,
    SetSoundEffects(bool),
    SetMusic(bool),
    SetParticles(bool),
    SetVolume(f32),
}

/// State shared across runs
pub struct AppContext {
    pub high_scores: HighScores,
    pub settings: Settings,
    pub audio: AudioManager,
    pub tuning: Tuning,
    /// Where to save settings and scores; `None` keeps them in memory
    pub store: Option<JsonStore>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::in_memory(Tuning::default(), AudioManager::default())
    }
}

impl AppContext {
    /// Context that never touches disk
    pub fn in_memory(tuning: Tuning, audio: AudioManager) -> Self {
        let mut ctx = Self {
            high_scores: HighScores::new(),
            settings: Settings::default(),
            audio,
            tuning,
            store: None,
        };
        ctx.settings.apply_audio(&mut ctx.audio);
        ctx
    }

    /// Context backed by `store`, loading whatever was saved there
    pub fn with_store(tuning: Tuning, audio: AudioManager, store: JsonStore) -> Self {
        let mut ctx = Self {
            high_scores: HighScores::load(&store),
            settings: Settings::load(&store),
            audio,
            tuning,
            store: Some(store),
        };
        ctx.settings.apply_audio(&mut ctx.audio);
        ctx
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    /// Record a finished run; true when it beat the previous best
    pub fn record_score(&mut self, score: u64, tower_len: usize) -> bool {
        let is_best = score > self.high_scores.best();
        if let Some(rank) = self.high_scores.add_score(score, tower_len, now_ms()) {
            log::info!("Score {score} ranked #{rank}");
            if let Some(store) = &self.store {
                if let Err(e) = self.high_scores.save(store) {
                    log::warn!("Failed to save high scores: {e}");
                }
            }
        }
        is_best
    }

    fn save_settings(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = self.settings.save(store) {
                log::warn!("Failed to save settings: {e}");
            }
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The whole game: screens, current run and shared context
pub struct App {
    pub screen: Screen,
    pub session: GameSession,
    pub ctx: AppContext,
    seeds: Pcg32,
}

impl App {
    pub fn new(ctx: AppContext, seed: u64) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let session = GameSession::new(seeds.random(), ctx.tuning);
        Self {
            screen: Screen::MainMenu,
            session,
            ctx,
            seeds,
        }
    }

    /// Apply a UI command; returns false when it doesn't apply to this screen
    pub fn handle(&mut self, action: MenuAction) -> bool {
        match (self.screen, action) {
            (Screen::MainMenu, MenuAction::StartGame)
            | (Screen::GameOver { .. }, MenuAction::PlayAgain) => {
                self.start_session();
                true
            }
            (Screen::MainMenu, MenuAction::OpenSettings) => {
                self.screen = Screen::Settings;
                true
            }
            (Screen::Settings, MenuAction::Back)
            | (Screen::GameOver { .. }, MenuAction::MainMenu) => {
                self.screen = Screen::MainMenu;
                true
            }
            (Screen::Settings, MenuAction::SetSoundEffects(on)) => {
                self.ctx.settings.sound_effects = on;
                self.ctx.audio.set_sfx_enabled(on);
                self.ctx.save_settings();
                true
            }
            (Screen::Settings, MenuAction::SetMusic(on)) => {
                self.ctx.settings.music = on;
                self.ctx.audio.set_music_enabled(on);
                self.ctx.save_settings();
                true
            }
            (Screen::Settings, MenuAction::SetParticles(on)) => {
                self.ctx.settings.particles = on;
                self.ctx.save_settings();
                true
            }
            (Screen::Settings, MenuAction::SetVolume(vol)) => {
                if !vol.is_finite() {
                    log::debug!("Ignoring non-finite volume {vol}");
                    return false;
                }
                let vol = vol.clamp(0.0, 1.0);
                self.ctx.settings.master_volume = vol;
                self.ctx.audio.set_master_volume(vol);
                self.ctx.save_settings();
                true
            }
            (screen, action) => {
                log::debug!("Ignoring {action:?} on {screen:?}");
                false
            }
        }
    }

    /// React to something the session reported
    pub fn on_game_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::BlockPlaced { .. } => self.ctx.audio.play(SoundEffect::BlockPlaced),
            GameEvent::GameOver { score, tower_len } => {
                self.ctx.audio.play(SoundEffect::GameOver);
                if self.ctx.record_score(score, tower_len) {
                    log::info!("New high score: {score}");
                    self.ctx.audio.play(SoundEffect::HighScore);
                }
                self.screen = Screen::GameOver { score };
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    fn start_session(&mut self) {
        let seed = self.seeds.random();
        self.session = GameSession::new(seed, self.ctx.tuning);
        self.session.particles_enabled = self.ctx.settings.particles;
        self.screen = Screen::Playing;
        log::info!("Started new game with seed: {seed}");
    }
}
