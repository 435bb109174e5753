//! Data-driven game balance
//!
//! Every number the simulation reads at runtime comes from a `Tuning`.
//! Defaults mirror `crate::consts`; hosts may override them from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Width of the base block and of the first falling block
    pub block_width: f32,
    pub block_height: f32,
    pub initial_speed: f32,
    pub speed_growth: f32,
    /// Ceiling for speed growth; keeps oscillator velocity finite
    pub max_speed: f32,
    /// Seconds for one edge-to-edge sweep at speed 1.0
    pub sweep_seconds: f32,
    pub points_per_level: u64,
    /// Particles spawned per successful placement
    pub burst_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            initial_speed: INITIAL_SPEED,
            speed_growth: SPEED_GROWTH,
            max_speed: MAX_SPEED,
            sweep_seconds: SWEEP_SECONDS,
            points_per_level: POINTS_PER_LEVEL,
            burst_particles: 20,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid(field) => write!(f, "tuning field out of range: {field}"),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.playfield_width) {
            return Err(TuningError::Invalid("playfield_width"));
        }
        if !positive(self.playfield_height) {
            return Err(TuningError::Invalid("playfield_height"));
        }
        if !positive(self.block_width) {
            return Err(TuningError::Invalid("block_width"));
        }
        if !positive(self.block_height) {
            return Err(TuningError::Invalid("block_height"));
        }
        if !positive(self.initial_speed) {
            return Err(TuningError::Invalid("initial_speed"));
        }
        // Every landed block must raise both speed and score
        if !self.speed_growth.is_finite() || self.speed_growth <= 1.0 {
            return Err(TuningError::Invalid("speed_growth"));
        }
        if !self.max_speed.is_finite() || self.max_speed <= self.initial_speed {
            return Err(TuningError::Invalid("max_speed"));
        }
        if self.points_per_level == 0 {
            return Err(TuningError::Invalid("points_per_level"));
        }
        if !positive(self.sweep_seconds) {
            return Err(TuningError::Invalid("sweep_seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.block_width, 60.0);
        assert_eq!(t.initial_speed, 2.0);
        assert_eq!(t.points_per_level, 10);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t = Tuning::from_json(r#"{ "initial_speed": 3.5 }"#).unwrap();
        assert_eq!(t.initial_speed, 3.5);
        assert_eq!(t.playfield_width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_rejects_shrinking_speed() {
        let err = Tuning::from_json(r#"{ "speed_growth": 0.9 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("speed_growth")));
    }

    #[test]
    fn test_rejects_flat_growth() {
        let err = Tuning::from_json(r#"{ "speed_growth": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("speed_growth")));

        let err = Tuning::from_json(r#"{ "points_per_level": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("points_per_level")));
    }

    #[test]
    fn test_rejects_unbounded_speed() {
        let err = Tuning::from_json(r#"{ "max_speed": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("max_speed")));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
