//! Tower Builder - stack-the-blocks arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tower, oscillation, placement, scoring)
//! - `app`: Screen state machine and process-wide context
//! - `driver`: Serial event loop feeding the simulation
//! - `persistence`: Optional JSON save/load for settings and scores
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{App, AppContext, Screen};
pub use driver::{Driver, SessionEvent};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the ~16ms frame cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 360.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;

    /// Starting speed of the falling block
    pub const INITIAL_SPEED: f32 = 2.0;
    /// Speed multiplier applied on every successful placement
    pub const SPEED_GROWTH: f32 = 1.05;
    /// Speed ceiling; at this pace the block crosses the playfield 10k times a second
    pub const MAX_SPEED: f32 = 20_000.0;
    /// Time for one edge-to-edge sweep at speed 1.0
    pub const SWEEP_SECONDS: f32 = 2.0;
    /// Points per tower level, multiplied by tower length after placement
    pub const POINTS_PER_LEVEL: u64 = 10;

    /// Speed at which the HUD speed indicator is full
    pub const MAX_INDICATOR_SPEED: f32 = 10.0;
}

/// Normalized speed in [0, 1] for a HUD gauge
#[inline]
pub fn speed_indicator(speed: f32) -> f32 {
    (speed.abs() / consts::MAX_INDICATOR_SPEED).clamp(0.0, 1.0)
}

/// Horizontal travel range `[min, max]` for a block of the given width
#[inline]
pub fn travel_range(block_width: f32, playfield_width: f32) -> (f32, f32) {
    (-block_width / 2.0, playfield_width - block_width / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_indicator_clamps() {
        assert_eq!(speed_indicator(0.0), 0.0);
        assert!((speed_indicator(5.0) - 0.5).abs() < 1e-6);
        assert!((speed_indicator(-5.0) - 0.5).abs() < 1e-6);
        assert_eq!(speed_indicator(25.0), 1.0);
    }

    #[test]
    fn test_travel_range() {
        let (min, max) = travel_range(60.0, 360.0);
        assert_eq!(min, -30.0);
        assert_eq!(max, 330.0);
    }
}
