//! Back-and-forth motion of the falling block
//!
//! Linear sweep between the playfield edges. One edge-to-edge pass takes
//! `sweep_seconds / speed`, so the period shrinks as speed grows.

use serde::{Deserialize, Serialize};

use super::block::Block;
use crate::travel_range;
use crate::tuning::Tuning;

/// Direction of horizontal travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Drives the falling block's horizontal offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oscillator {
    pub direction: Direction,
}

impl Oscillator {
    /// Oscillator heading away from whichever edge `x` is closer to
    pub fn heading_inward(block: &Block, playfield_width: f32) -> Self {
        let (min, max) = travel_range(block.width, playfield_width);
        let direction = if (block.x - min) <= (max - block.x) {
            Direction::Right
        } else {
            Direction::Left
        };
        Self { direction }
    }

    /// Horizontal velocity in units per second at `speed`
    #[inline]
    pub fn velocity(speed: f32, tuning: &Tuning) -> f32 {
        tuning.playfield_width * speed.abs() / tuning.sweep_seconds
    }

    /// Advance `block` by `dt` seconds, returning the moved block
    ///
    /// Leaving the travel range flips the direction and pins the block to the
    /// edge it crossed. Malformed blocks are returned untouched.
    pub fn advance(&mut self, block: Block, speed: f32, dt: f32, tuning: &Tuning) -> Block {
        if !block.is_well_formed() || !speed.is_finite() || !dt.is_finite() {
            return block;
        }

        let (min, max) = travel_range(block.width, tuning.playfield_width);
        let mut x = block.x + self.direction.sign() * Self::velocity(speed, tuning) * dt;

        if x > max {
            x = max;
            self.direction = self.direction.reversed();
        } else if x < min {
            x = min;
            self.direction = self.direction.reversed();
        }

        block.with_x(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn falling(x: f32) -> Block {
        Block::new(60.0, 20.0, 20.0, x)
    }

    #[test]
    fn test_moves_linearly() {
        let tuning = Tuning::default();
        let mut osc = Oscillator::default();
        // 360 wide, speed 2.0, 2s sweep -> 360 units/s
        let b = osc.advance(falling(0.0), 2.0, 0.5, &tuning);
        assert!((b.x - 180.0).abs() < 1e-3);
        assert_eq!(osc.direction, Direction::Right);
    }

    #[test]
    fn test_reverses_at_right_edge() {
        let tuning = Tuning::default();
        let mut osc = Oscillator::default();
        let b = osc.advance(falling(320.0), 2.0, 0.1, &tuning);
        assert_eq!(b.x, 330.0);
        assert_eq!(osc.direction, Direction::Left);

        let b = osc.advance(b, 2.0, SIM_DT, &tuning);
        assert!(b.x < 330.0);
    }

    #[test]
    fn test_reverses_at_left_edge() {
        let tuning = Tuning::default();
        let mut osc = Oscillator {
            direction: Direction::Left,
        };
        let b = osc.advance(falling(-20.0), 2.0, 0.1, &tuning);
        assert_eq!(b.x, -30.0);
        assert_eq!(osc.direction, Direction::Right);
    }

    #[test]
    fn test_period_shrinks_with_speed() {
        let tuning = Tuning::default();
        assert!(Oscillator::velocity(4.0, &tuning) > Oscillator::velocity(2.0, &tuning));
        assert_eq!(
            Oscillator::velocity(-2.0, &tuning),
            Oscillator::velocity(2.0, &tuning)
        );
    }

    #[test]
    fn test_stays_in_range_over_many_ticks() {
        let tuning = Tuning::default();
        let mut osc = Oscillator::default();
        let mut b = falling(0.0);
        for _ in 0..10_000 {
            b = osc.advance(b, 7.3, SIM_DT, &tuning);
            assert!(b.x >= -30.0 && b.x <= 330.0);
        }
    }

    #[test]
    fn test_still_moves_at_speed_ceiling() {
        let tuning = Tuning::default();
        let mut osc = Oscillator::default();
        let b = osc.advance(falling(-30.0), tuning.max_speed, SIM_DT, &tuning);
        assert_eq!(b.x, 330.0);
        let b = osc.advance(b, tuning.max_speed, SIM_DT, &tuning);
        assert_eq!(b.x, -30.0);
    }

    #[test]
    fn test_heading_inward() {
        assert_eq!(
            Oscillator::heading_inward(&falling(-30.0), 360.0).direction,
            Direction::Right
        );
        assert_eq!(
            Oscillator::heading_inward(&falling(330.0), 360.0).direction,
            Direction::Left
        );
    }

    #[test]
    fn test_malformed_block_untouched() {
        let tuning = Tuning::default();
        let mut osc = Oscillator::default();
        let bad = Block::new(0.0, 20.0, 0.0, 10.0);
        assert_eq!(osc.advance(bad, 2.0, SIM_DT, &tuning), bad);
    }
}
