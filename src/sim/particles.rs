//! Placement sparkle particles
//!
//! Purely visual. Particles draw from their own RNG so toggling them never
//! changes the gameplay sequence.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::block::Block;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    /// RGBA, each channel in [0, 1]
    pub color: [f32; 4],
    pub size: f32,
    /// Ticks remaining
    pub lifetime: u32,
}

impl Particle {
    /// Advance one tick
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }
}

/// Spawn `count` particles at the centre of `block`
pub fn burst<R: Rng>(block: &Block, count: usize, rng: &mut R) -> Vec<Particle> {
    let origin = Vec2::new(block.center_x(), block.y + block.height / 2.0);
    (0..count)
        .map(|_| Particle {
            pos: origin,
            vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-4.0..0.0)),
            color: [rng.random(), rng.random(), rng.random(), 1.0],
            size: rng.random_range(2.0..7.0),
            lifetime: rng.random_range(20..40),
        })
        .collect()
}

/// Step every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain(Particle::is_alive);
    for p in particles.iter_mut() {
        p.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(5);
        let block = Block::new(60.0, 20.0, 40.0, 10.0);
        let particles = burst(&block, 20, &mut rng);
        assert_eq!(particles.len(), 20);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(40.0, 50.0));
            assert!((-2.0..2.0).contains(&p.vel.x));
            assert!((-4.0..0.0).contains(&p.vel.y));
            assert!((20..40).contains(&p.lifetime));
            assert!((2.0..7.0).contains(&p.size));
            assert_eq!(p.color[3], 1.0);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(5);
        let block = Block::new(60.0, 20.0, 0.0, 0.0);
        let mut particles = burst(&block, 20, &mut rng);
        for _ in 0..40 {
            update_particles(&mut particles);
        }
        update_particles(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            color: [1.0; 4],
            size: 3.0,
            lifetime: 2,
        };
        p.update();
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert_eq!(p.lifetime, 1);
        p.update();
        assert!(!p.is_alive());
    }
}
