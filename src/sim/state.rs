//! Game session state and core simulation types
//!
//! Everything gameplay reads or writes for one run lives in `GameSession`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::oscillator::Oscillator;
use super::particles::{self, MAX_PARTICLES, Particle};
use super::placement::{Placement, resolve_placement};
use super::tower::Tower;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Falling block in motion, accepting drops
    Playing,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// Something that happened during a tick or drop, for audio/UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A block settled on the tower
    BlockPlaced {
        width: f32,
        tower_len: usize,
        score: u64,
    },
    /// The drop missed; carries the final score
    GameOver { score: u64, tower_len: usize },
}

/// Second RNG stream so visual effects never perturb gameplay randomness
const PARTICLE_STREAM: u64 = 0x5041_5254;

/// One run of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub tower: Tower,
    pub falling: Block,
    pub score: u64,
    pub speed: f32,
    pub phase: GamePhase,
    pub oscillator: Oscillator,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Whether drops emit particles
    pub particles_enabled: bool,
    rng: Pcg32,
    fx_rng: Pcg32,
}

impl GameSession {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let base = Block::new(tuning.block_width, tuning.block_height, 0.0, 0.0);
        let tower = Tower::new(base);
        let falling = Block::new(tuning.block_width, tuning.block_height, tower.height(), 0.0);

        Self {
            seed,
            tuning,
            oscillator: Oscillator::heading_inward(&falling, tuning.playfield_width),
            tower,
            falling,
            score: 0,
            speed: tuning.initial_speed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            particles: Vec::new(),
            particles_enabled: true,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::new(seed, PARTICLE_STREAM),
        }
    }

    /// Start over with the same seed and tuning
    pub fn reset(&mut self) {
        let particles_enabled = self.particles_enabled;
        *self = Self::new(self.seed, self.tuning);
        self.particles_enabled = particles_enabled;
    }

    /// Start over with a fresh seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Move the falling block and animate particles by one fixed step
    pub fn advance(&mut self, dt: f32) {
        if self.is_over() {
            return;
        }
        self.time_ticks += 1;
        self.falling = self
            .oscillator
            .advance(self.falling, self.speed, dt, &self.tuning);
        particles::update_particles(&mut self.particles);
    }

    /// Drop the falling block onto the tower
    pub fn place(&mut self) -> Option<GameEvent> {
        if self.is_over() {
            return None;
        }

        let placement = resolve_placement(
            &self.tower,
            &self.falling,
            self.score,
            self.speed,
            &self.tuning,
            &mut self.rng,
        );

        match placement {
            Placement::GameOver => {
                self.phase = GamePhase::GameOver;
                log::info!(
                    "Game over: score {} with {} blocks",
                    self.score,
                    self.tower.len()
                );
                Some(GameEvent::GameOver {
                    score: self.score,
                    tower_len: self.tower.len(),
                })
            }
            Placement::Placed {
                settled,
                next,
                score,
                speed,
            } => {
                self.tower.push(settled);
                self.falling = next;
                self.score = score;
                self.speed = speed;
                self.oscillator = Oscillator::heading_inward(&next, self.tuning.playfield_width);

                if self.particles_enabled {
                    let room = MAX_PARTICLES.saturating_sub(self.particles.len());
                    let count = self.tuning.burst_particles.min(room);
                    self.particles
                        .extend(particles::burst(&next, count, &mut self.fx_rng));
                }

                log::debug!(
                    "Placed block {} wide at x={:.1}; tower {} score {} speed {:.3}",
                    settled.width,
                    settled.x,
                    self.tower.len(),
                    self.score,
                    self.speed
                );
                Some(GameEvent::BlockPlaced {
                    width: settled.width,
                    tower_len: self.tower.len(),
                    score: self.score,
                })
            }
        }
    }

    /// Read-only view for renderers and host bridges
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tower: self.tower.blocks().to_vec(),
            falling: self.falling,
            score: self.score,
            speed: self.speed,
            speed_indicator: crate::speed_indicator(self.speed),
            is_over: self.is_over(),
            particles: self.particles.clone(),
        }
    }
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tower: Vec<Block>,
    pub falling: Block,
    pub score: u64,
    pub speed: f32,
    /// Speed gauge fill in [0, 1]
    pub speed_indicator: f32,
    pub is_over: bool,
    pub particles: Vec<Particle>,
}
